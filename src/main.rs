mod commands;
pub mod config;
pub mod fumo_context;
mod handlers;
mod server;
mod stats;
mod utils;

use dotenv::dotenv;

use eyre::Result;
use twilight_gateway::CloseFrame;

use std::{sync::Arc, time::Duration};

use crate::{
    config::BotConfig, fumo_context::FumoContext, handlers::event_loop,
    server::run_server,
};

use tokio::{signal, sync::oneshot::channel};

#[tokio::main(worker_threads = 4)]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    if dotenv().is_err() {
        tracing::debug!("No .env file found, using process environment");
    }

    BotConfig::init()?;
    let config = BotConfig::get();

    let (ctx, mut shards) = FumoContext::new(&config.token).await?;
    let ctx = Arc::new(ctx);

    tracing::info!("Setting global commands...");

    let commands = commands::global_commands();
    ctx.interaction().set_global_commands(&commands).await?;

    // Messages sent before restart keep working
    ctx.sessions
        .add_persistent(
            commands::persistent::config(false)?,
            commands::persistent::pages(),
        )
        .await?;

    // Spawn http server
    let server_tx = {
        let server_ctx = Arc::clone(&ctx);
        let (tx, rx) = channel::<()>();
        tokio::spawn(run_server(server_ctx, config.metrics_port, rx));

        tx
    };

    // Run discord event loop
    let event_ctx = Arc::clone(&ctx);

    tokio::select! {
        _ = event_loop(event_ctx, &mut shards) => tracing::error!("Error in event loop!"),
        res = signal::ctrl_c() => match res {
            Ok(_) => tracing::info!("Got Ctrl+C"),
            Err(e) => tracing::error!("Can't get Ctrl+C signal: {e}"),
        }
    }

    // Close everything
    for shard in shards.iter_mut() {
        let reason = CloseFrame::new(1000, "Closing connection");
        let res = shard.close(reason).await;

        match res {
            Ok(_) => tracing::info!("Closed shard"),
            Err(e) => tracing::warn!("Failed to close shard: {e:?}"),
        }
    }

    if server_tx.send(()).is_err() {
        tracing::warn!("Failed to close http server!");
    }

    tracing::info!(
        sessions = ctx.sessions.active_count().await,
        "Dropping running paginators"
    );

    // Wait for all threads complete peacefully
    tokio::time::sleep(Duration::from_secs(1)).await;

    tracing::info!("Bye!!!");

    Ok(())
}
