use crate::stats::{BotMetrics, BotStats};
use crate::utils::interaction::InteractionComponent;

use fumo_paginator::SessionManager;
use twilight_gateway::{
    stream, Config, ConfigBuilder, EventTypeFlags, Intents, Shard, ShardId,
};
use twilight_http::client::InteractionClient;
use twilight_http::Client;
use twilight_model::id::{marker::ApplicationMarker, Id};

use std::sync::Arc;

use eyre::Result;

pub struct FumoContext {
    /// Every running paginator,
    /// button clicks are routed through it
    pub sessions: Arc<SessionManager<InteractionComponent>>,

    pub stats: BotMetrics,
    pub http: Arc<Client>,

    application_id: Id<ApplicationMarker>,
}

impl FumoContext {
    pub fn interaction(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }

    pub fn application_id(&self) -> Id<ApplicationMarker> {
        self.application_id
    }
}

impl FumoContext {
    pub async fn new(token: &str) -> Result<(FumoContext, Vec<Shard>)> {
        let http = Client::builder()
            .token(token.to_owned())
            .remember_invalid_token(false)
            .build();

        let http = Arc::new(http);

        // Interactions are delivered regardless of intents
        let config = Config::builder(token.to_owned(), Intents::GUILDS)
            .event_types(
                EventTypeFlags::READY | EventTypeFlags::INTERACTION_CREATE,
            )
            .build();

        let shards = stream::create_recommended(
            &http,
            config,
            |_shard_id: ShardId, builder: ConfigBuilder| builder.build(),
        )
        .await?
        .collect();

        let application_id =
            http.current_user().await?.model().await?.id.cast();

        let stats = BotMetrics::new(BotStats::new()?)?;

        let ctx = FumoContext {
            sessions: Arc::new(SessionManager::new()),
            stats,
            http,
            application_id,
        };

        Ok((ctx, shards))
    }
}
