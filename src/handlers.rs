use crate::commands;
use crate::fumo_context::FumoContext;
use crate::utils::interaction::{InteractionCommand, InteractionComponent};

use std::sync::Arc;

use fumo_paginator::{ComponentEvent, Dispatch};
use tokio_stream::StreamExt;
use twilight_gateway::{stream::ShardEventStream, Event, Shard};
use twilight_model::application::interaction::{Interaction, InteractionData};

pub async fn event_loop(ctx: Arc<FumoContext>, shards: &mut [Shard]) {
    let mut events = ShardEventStream::new(shards.iter_mut());

    while let Some((shard, event)) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(source) => {
                tracing::warn!(shard = ?shard.id(), "Error receiving event: {source}");

                if source.is_fatal() {
                    break;
                }

                continue;
            }
        };

        let ctx = Arc::clone(&ctx);
        tokio::spawn(async move { handle_event(ctx, event).await });
    }
}

async fn handle_component(ctx: Arc<FumoContext>, component: InteractionComponent) {
    let route = match ctx.sessions.dispatch(component).await {
        Ok(Dispatch::Live) => "live",
        Ok(Dispatch::Persistent(outcome)) => {
            tracing::debug!(?outcome, "Persistent paginator handled click");
            "persistent"
        }
        Ok(Dispatch::Unrouted(component)) => {
            // Session is gone already, just ack so discord
            // doesn't show an error to the user
            tracing::debug!(
                custom_id = ?component.custom_id,
                "Got click for unknown paginator"
            );

            if let Err(e) = component.defer().await {
                tracing::warn!("Failed to acknowledge component: {e}");
            }

            "unrouted"
        }
        Err(e) => {
            tracing::warn!("Failed to handle component: {e}");
            "failed"
        }
    };

    ctx.stats.bot.buttons.with_label_values(&[route]).inc();
}

async fn handle_interaction(ctx: Arc<FumoContext>, interaction: Interaction) {
    let user_id = interaction.author_id();

    let Interaction {
        data,
        id,
        token,
        member,
        user,
        message,
        ..
    } = interaction;

    match data {
        Some(InteractionData::ApplicationCommand(data)) => {
            let cmd = InteractionCommand {
                data,
                id,
                token,
                member,
                user,
                http: Arc::clone(&ctx.http),
                application_id: ctx.application_id(),
            };

            let name = cmd.data.name.clone();

            if let Err(e) = commands::handle(&ctx, cmd).await {
                tracing::error!(command = %name, "Command failed: {e:?}");
            }
        }
        Some(InteractionData::MessageComponent(data)) => {
            let component = InteractionComponent {
                custom_id: Some(data.custom_id),
                message,
                id,
                token,
                user_id,
                http: Arc::clone(&ctx.http),
                application_id: ctx.application_id(),
            };

            handle_component(ctx, component).await;
        }
        _ => {}
    }
}

async fn handle_event(ctx: Arc<FumoContext>, event: Event) {
    match event {
        Event::InteractionCreate(interaction) => {
            handle_interaction(ctx, interaction.0).await
        }
        Event::Ready(ready) => {
            tracing::info!("Logged in as {}", ready.user.name)
        }
        _ => tracing::trace!(kind = ?event.kind(), "Got unhandled event"),
    }
}
