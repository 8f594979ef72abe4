pub mod pages;
pub mod persistent;

use eyre::Result;
use fumo_paginator::{Session, SessionState};
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::application::command::Command;

use crate::{fumo_context::FumoContext, utils::interaction::InteractionCommand};

use pages::PagesCommand;
use persistent::PersistentCommand;

pub fn global_commands() -> Vec<Command> {
    vec![
        PagesCommand::create_command().into(),
        PersistentCommand::create_command().into(),
    ]
}

pub async fn handle(ctx: &FumoContext, cmd: InteractionCommand) -> Result<()> {
    match cmd.data.name.as_str() {
        "pages" => {
            ctx.stats.bot.cmd.with_label_values(&["pages"]).inc();

            let command = PagesCommand::from_interaction((*cmd.data).clone().into())?;
            command.run(ctx, cmd).await
        }
        "persistent" => {
            ctx.stats.bot.cmd.with_label_values(&["persistent"]).inc();

            let command =
                PersistentCommand::from_interaction((*cmd.data).clone().into())?;
            command.run(ctx, cmd).await
        }
        name => {
            tracing::debug!("Got unknown command: {name}");
            Ok(())
        }
    }
}

/// Counts how paginator session ended once it's done
fn track_session(ctx: &FumoContext, session: Session) {
    let counters = ctx.stats.bot.sessions.clone();

    tokio::spawn(async move {
        let state = match session.finished().await {
            Some(SessionState::TimedOut) => "timed_out",
            Some(SessionState::Deleted) => "deleted",
            Some(SessionState::Active) => "failed",
            None => "panicked",
        };

        counters.with_label_values(&[state]).inc();
    });
}
