use eyre::Result;
use fumo_paginator::{ConfigError, PaginatorConfig};
use fumo_twilight::components::{emoji_button, NEXT_EMOJI, PREVIOUS_EMOJI, TRASH_EMOJI};
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::channel::message::{component::ButtonStyle, Embed};

use crate::{fumo_context::FumoContext, utils::interaction::InteractionCommand};

use super::pages::demo_pages;

// Must never change, old messages are found by these
pub const PREVIOUS_ID: &str = "persistent_pages:previous";
pub const NEXT_ID: &str = "persistent_pages:next";
pub const TRASH_ID: &str = "persistent_pages:trash";

const PAGES: usize = 5;

pub fn config(ephemeral: bool) -> Result<PaginatorConfig, ConfigError> {
    PaginatorConfig::builder()
        .previous_button(emoji_button(PREVIOUS_ID, PREVIOUS_EMOJI, ButtonStyle::Primary))
        .next_button(emoji_button(NEXT_ID, NEXT_EMOJI, ButtonStyle::Primary))
        .trash_button(emoji_button(TRASH_ID, TRASH_EMOJI, ButtonStyle::Danger))
        .page_counter_separator(" / ")
        .ephemeral(ephemeral)
        .timeout(None)
        .persistent(true)
        .build()
}

pub fn pages() -> Vec<Embed> {
    demo_pages(PAGES)
}

/// Show pages which keep working after bot restart
#[derive(CommandModel, CreateCommand, Debug)]
#[command(name = "persistent")]
pub struct PersistentCommand {
    /// Show pages only to you
    ephemeral: Option<bool>,
}

impl PersistentCommand {
    pub async fn run(
        self,
        ctx: &FumoContext,
        cmd: InteractionCommand,
    ) -> Result<()> {
        let config = config(self.ephemeral.unwrap_or(false))?;
        // Nothing to track, clicks go to the paginator registered on startup
        let session = ctx.sessions.start(config, cmd, pages()).await?;
        tracing::debug!(message = %session.message_id, "Sent persistent pages");

        Ok(())
    }
}
