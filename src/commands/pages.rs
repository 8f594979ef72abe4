use eyre::Result;
use fumo_paginator::PaginatorConfig;
use twilight_interactions::command::{CommandModel, CreateCommand};
use twilight_model::channel::message::Embed;
use twilight_util::builder::embed::{EmbedBuilder, EmbedFooterBuilder};

use crate::{
    config::BotConfig, fumo_context::FumoContext,
    utils::interaction::InteractionCommand,
};

use super::track_session;

const DEFAULT_PAGES: i64 = 5;
const MAX_PAGES: i64 = 25;

pub fn demo_pages(count: usize) -> Vec<Embed> {
    (1..=count)
        .map(|n| {
            EmbedBuilder::new()
                .color(123432)
                .title(format!("Page #{n}"))
                .description(format!("This is page number {n} out of {count}"))
                .footer(EmbedFooterBuilder::new("fumo pager"))
                .build()
        })
        .collect()
}

/// Show a few pages behind paginator buttons
#[derive(CommandModel, CreateCommand, Debug)]
#[command(name = "pages")]
pub struct PagesCommand {
    /// Amount of pages to show
    #[command(min_value = 1, max_value = 25)]
    count: Option<i64>,

    /// Text between page numbers in the counter
    separator: Option<String>,

    /// Page to start from
    #[command(min_value = 1, max_value = 25)]
    start: Option<i64>,

    /// Show pages only to you
    ephemeral: Option<bool>,

    /// Let everyone turn pages
    public: Option<bool>,
}

impl PagesCommand {
    pub fn config(&self, count: usize) -> Result<PaginatorConfig> {
        let initial_page = self
            .start
            .map(|start| (start.max(1) as usize - 1).min(count - 1))
            .unwrap_or(0);

        let mut builder = PaginatorConfig::builder()
            .timeout(BotConfig::get().paginator_timeout)
            .on_timeout_message("This paginator has timed out")
            .initial_page(initial_page)
            .ephemeral(self.ephemeral.unwrap_or(false))
            .interaction_check(!self.public.unwrap_or(false));

        if let Some(separator) = &self.separator {
            builder = builder.page_counter_separator(separator.as_str());
        }

        Ok(builder.build()?)
    }

    pub async fn run(
        self,
        ctx: &FumoContext,
        cmd: InteractionCommand,
    ) -> Result<()> {
        let count = self.count.unwrap_or(DEFAULT_PAGES).clamp(1, MAX_PAGES) as usize;
        let config = self.config(count)?;

        let session = ctx.sessions.start(config, cmd, demo_pages(count)).await?;
        track_session(ctx, session);

        Ok(())
    }
}
