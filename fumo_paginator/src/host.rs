//! Capabilities paginator needs from the chat platform.
//!
//! The bot implements these over twilight http client,
//! tests implement them with recording mocks.

use async_trait::async_trait;
use fumo_twilight::message::MessageBuilder;
use twilight_model::{
    channel::message::Component,
    id::{
        marker::{InteractionMarker, MessageMarker, UserMarker},
        Id,
    },
};

pub type HostError = Box<dyn std::error::Error + Send + Sync>;
pub type HostResult<T> = Result<T, HostError>;

/// Command invocation which started the paginator
#[async_trait]
pub trait Invocation: Send + Sync {
    fn id(&self) -> Id<InteractionMarker>;

    fn user_id(&self) -> Option<Id<UserMarker>>;

    /// Sends initial response and returns id of the created message
    async fn send(&self, builder: &MessageBuilder) -> HostResult<Id<MessageMarker>>;

    async fn edit_original(&self, builder: &MessageBuilder) -> HostResult<()>;
}

/// Button click on a paginated message
#[async_trait]
pub trait ComponentEvent: Send + Sync {
    fn id(&self) -> Id<InteractionMarker>;

    fn user_id(&self) -> Option<Id<UserMarker>>;

    fn custom_id(&self) -> Option<&str>;

    fn message_id(&self) -> Option<Id<MessageMarker>>;

    /// Components of the message the button is attached to
    fn message_components(&self) -> &[Component];

    /// User who ran the command that created the message
    fn message_owner(&self) -> Option<Id<UserMarker>>;

    /// Edits the message and acknowledges the event in one call
    async fn update_message(&self, builder: &MessageBuilder) -> HostResult<()>;

    async fn defer(&self) -> HostResult<()>;

    async fn delete_message(&self) -> HostResult<()>;

    async fn respond_private(&self, builder: &MessageBuilder) -> HostResult<()>;
}
