use std::{slice, sync::Arc};

use async_trait::async_trait;
use fumo_paginator::{ComponentEvent, HostResult, Invocation};
use fumo_twilight::message::MessageBuilder;

use twilight_http::{client::InteractionClient, Client};
use twilight_model::{
    application::interaction::application_command::CommandData,
    channel::{message::Component, Message},
    guild::PartialMember,
    http::interaction::{
        InteractionResponse, InteractionResponseData, InteractionResponseType,
    },
    id::{
        marker::{ApplicationMarker, InteractionMarker, MessageMarker, UserMarker},
        Id,
    },
    user::User,
};
use twilight_util::builder::InteractionResponseDataBuilder;

fn response_data(builder: &MessageBuilder) -> InteractionResponseData {
    let mut data = InteractionResponseDataBuilder::new();

    if let Some(ref content) = builder.content {
        data = data.content(content)
    }

    if let Some(ref embed) = builder.embed {
        data = data.embeds([embed.clone()])
    }

    if let Some(ref components) = builder.components {
        data = data.components(components.clone())
    }

    if let Some(flags) = builder.flags {
        data = data.flags(flags);
    }

    data.build()
}

#[derive(Debug, Clone)]
pub struct InteractionCommand {
    pub data: Box<CommandData>,
    pub id: Id<InteractionMarker>,
    pub token: String,
    pub member: Option<PartialMember>,
    pub user: Option<User>,

    pub http: Arc<Client>,
    pub application_id: Id<ApplicationMarker>,
}

impl InteractionCommand {
    pub fn client(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }

    pub async fn response(&self, builder: &MessageBuilder) -> HostResult<()> {
        let response = InteractionResponse {
            kind: InteractionResponseType::ChannelMessageWithSource,
            data: Some(response_data(builder)),
        };

        self.client()
            .create_response(self.id, &self.token, &response)
            .await?;

        Ok(())
    }

    pub async fn update(&self, builder: &MessageBuilder) -> HostResult<Message> {
        let client = self.client();
        let mut req = client.update_response(&self.token);

        if let Some(ref content) = builder.content {
            req = req.content(Some(content.as_ref()))?;
        }

        if let Some(ref embed) = builder.embed {
            req = req.embeds(Some(slice::from_ref(embed)))?;
        }

        if let Some(ref components) = builder.components {
            req = req.components(Some(components.as_slice()))?;
        }

        Ok(req.await?.model().await?)
    }

    pub fn user_id(&self) -> Option<Id<UserMarker>> {
        if let Some(member) = &self.member {
            if let Some(user) = &member.user {
                return Some(user.id);
            }
        }

        if let Some(user) = &self.user {
            return Some(user.id);
        }

        None
    }
}

#[async_trait]
impl Invocation for InteractionCommand {
    fn id(&self) -> Id<InteractionMarker> {
        self.id
    }

    fn user_id(&self) -> Option<Id<UserMarker>> {
        InteractionCommand::user_id(self)
    }

    async fn send(&self, builder: &MessageBuilder) -> HostResult<Id<MessageMarker>> {
        self.response(builder).await?;

        // Interaction responses don't return message,
        // so it has to be fetched separately
        let msg = self.client().response(&self.token).await?.model().await?;

        Ok(msg.id)
    }

    async fn edit_original(&self, builder: &MessageBuilder) -> HostResult<()> {
        self.update(builder).await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InteractionComponent {
    pub custom_id: Option<String>,
    pub message: Option<Message>,
    pub id: Id<InteractionMarker>,
    pub token: String,
    pub user_id: Option<Id<UserMarker>>,

    pub http: Arc<Client>,
    pub application_id: Id<ApplicationMarker>,
}

impl InteractionComponent {
    pub fn client(&self) -> InteractionClient<'_> {
        self.http.interaction(self.application_id)
    }

    async fn create_response(
        &self,
        kind: InteractionResponseType,
        data: Option<InteractionResponseData>,
    ) -> HostResult<()> {
        let response = InteractionResponse { kind, data };

        self.client()
            .create_response(self.id, &self.token, &response)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl ComponentEvent for InteractionComponent {
    fn id(&self) -> Id<InteractionMarker> {
        self.id
    }

    fn user_id(&self) -> Option<Id<UserMarker>> {
        self.user_id
    }

    fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.message.as_ref().map(|m| m.id)
    }

    fn message_components(&self) -> &[Component] {
        self.message
            .as_ref()
            .map(|m| m.components.as_slice())
            .unwrap_or_default()
    }

    fn message_owner(&self) -> Option<Id<UserMarker>> {
        self.message.as_ref()?.interaction.as_ref().map(|i| i.user.id)
    }

    async fn update_message(&self, builder: &MessageBuilder) -> HostResult<()> {
        let data = response_data(builder);

        self.create_response(InteractionResponseType::UpdateMessage, Some(data))
            .await
    }

    async fn defer(&self) -> HostResult<()> {
        self.create_response(InteractionResponseType::DeferredUpdateMessage, None)
            .await
    }

    async fn delete_message(&self) -> HostResult<()> {
        // After deferred update original response is the message itself
        self.client().delete_response(&self.token).await?;
        Ok(())
    }

    async fn respond_private(&self, builder: &MessageBuilder) -> HostResult<()> {
        let data = response_data(&builder.clone().ephemeral(true));

        self.create_response(
            InteractionResponseType::ChannelMessageWithSource,
            Some(data),
        )
        .await
    }
}
