#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use fumo_paginator::{ComponentEvent, HostResult, Invocation};
use fumo_twilight::{components::buttons, message::MessageBuilder};
use twilight_model::{
    channel::message::{Component, Embed},
    id::{
        marker::{InteractionMarker, MessageMarker, UserMarker},
        Id,
    },
};
use twilight_util::builder::embed::EmbedBuilder;

pub const OWNER: u64 = 100;
pub const STRANGER: u64 = 200;
pub const INVOCATION: u64 = 1000;
pub const MESSAGE: u64 = 5000;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send(MessageBuilder),
    EditOriginal(MessageBuilder),
    Update(MessageBuilder),
    Defer,
    Delete,
    Private(MessageBuilder),
}

#[derive(Debug, Clone, Default)]
pub struct Log(Arc<Mutex<Vec<Call>>>);

impl Log {
    pub fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<Call> {
        self.0.lock().unwrap().last().cloned()
    }

    pub fn count(&self, f: impl Fn(&Call) -> bool) -> usize {
        self.0.lock().unwrap().iter().filter(|c| f(*c)).count()
    }
}

pub fn pages(titles: &[&str]) -> Vec<Embed> {
    titles
        .iter()
        .map(|t| EmbedBuilder::new().title(*t).build())
        .collect()
}

pub fn title(msg: &MessageBuilder) -> Option<&str> {
    msg.embed.as_ref()?.title.as_deref()
}

pub fn counter(msg: &MessageBuilder) -> Option<String> {
    let components = msg.components.as_deref()?;
    buttons(components).get(1)?.label.clone()
}

pub fn all_disabled(msg: &MessageBuilder) -> bool {
    let components = msg.components.as_deref().unwrap_or_default();
    let row = buttons(components);

    !row.is_empty() && row.iter().all(|b| b.disabled)
}

#[derive(Debug, Clone)]
pub struct MockInvocation {
    pub id: Id<InteractionMarker>,
    pub user: Option<Id<UserMarker>>,
    pub message_id: Id<MessageMarker>,
    pub fail_send: bool,
    pub log: Log,
}

impl MockInvocation {
    pub fn new(log: &Log) -> Self {
        Self {
            id: Id::new(INVOCATION),
            user: Some(Id::new(OWNER)),
            message_id: Id::new(MESSAGE),
            fail_send: false,
            log: log.clone(),
        }
    }
}

#[async_trait]
impl Invocation for MockInvocation {
    fn id(&self) -> Id<InteractionMarker> {
        self.id
    }

    fn user_id(&self) -> Option<Id<UserMarker>> {
        self.user
    }

    async fn send(&self, builder: &MessageBuilder) -> HostResult<Id<MessageMarker>> {
        if self.fail_send {
            return Err("unknown interaction".into());
        }

        self.log.push(Call::Send(builder.clone()));
        Ok(self.message_id)
    }

    async fn edit_original(&self, builder: &MessageBuilder) -> HostResult<()> {
        self.log.push(Call::EditOriginal(builder.clone()));
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct MockEvent {
    pub id: Id<InteractionMarker>,
    pub user: Option<Id<UserMarker>>,
    pub custom_id: Option<String>,
    pub message_id: Option<Id<MessageMarker>>,
    pub components: Vec<Component>,
    pub owner: Option<Id<UserMarker>>,
    pub fail_delete: bool,
    /// Slow network, update response takes this long
    pub delay: Option<Duration>,
    pub log: Log,
}

impl MockEvent {
    pub fn click(log: &Log, user: u64, custom_id: &str) -> Self {
        Self {
            id: Id::new(INVOCATION + 1),
            user: Some(Id::new(user)),
            custom_id: Some(custom_id.to_owned()),
            message_id: Some(Id::new(MESSAGE)),
            components: Vec::new(),
            owner: Some(Id::new(OWNER)),
            fail_delete: false,
            delay: None,
            log: log.clone(),
        }
    }
}

#[async_trait]
impl ComponentEvent for MockEvent {
    fn id(&self) -> Id<InteractionMarker> {
        self.id
    }

    fn user_id(&self) -> Option<Id<UserMarker>> {
        self.user
    }

    fn custom_id(&self) -> Option<&str> {
        self.custom_id.as_deref()
    }

    fn message_id(&self) -> Option<Id<MessageMarker>> {
        self.message_id
    }

    fn message_components(&self) -> &[Component] {
        &self.components
    }

    fn message_owner(&self) -> Option<Id<UserMarker>> {
        self.owner
    }

    async fn update_message(&self, builder: &MessageBuilder) -> HostResult<()> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.log.push(Call::Update(builder.clone()));
        Ok(())
    }

    async fn defer(&self) -> HostResult<()> {
        self.log.push(Call::Defer);
        Ok(())
    }

    async fn delete_message(&self) -> HostResult<()> {
        if self.fail_delete {
            return Err("unknown message".into());
        }

        self.log.push(Call::Delete);
        Ok(())
    }

    async fn respond_private(&self, builder: &MessageBuilder) -> HostResult<()> {
        self.log.push(Call::Private(builder.clone()));
        Ok(())
    }
}

/// Default button ids for [`INVOCATION`] started by [`OWNER`]
pub fn prev_id() -> String {
    format!("PREV_BTN:{INVOCATION}:{OWNER}")
}

pub fn next_id() -> String {
    format!("NEXT_BTN:{INVOCATION}:{OWNER}")
}

pub fn trash_id() -> String {
    format!("TRASH_BTN:{INVOCATION}:{OWNER}")
}
