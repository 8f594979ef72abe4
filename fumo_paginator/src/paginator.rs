use fumo_twilight::{
    components::{
        action_row, buttons, emoji_button, label_button, NEXT_EMOJI,
        PREVIOUS_EMOJI, TRASH_EMOJI,
    },
    message::MessageBuilder,
};
use twilight_model::{
    channel::message::{
        component::{Button, ButtonStyle},
        Component, Embed,
    },
    id::{
        marker::{InteractionMarker, MessageMarker, UserMarker},
        Id,
    },
};
use twilight_util::builder::embed::EmbedFooterBuilder;

use crate::{
    config::{ButtonKind, PaginatorConfig},
    error::{ConfigError, PaginatorResult},
    host::{ComponentEvent, Invocation},
};

const COUNTER_PREFIX: &str = "COUNTER";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    TimedOut,
    Deleted,
}

/// What happened to a single button click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Cursor moved, holds the new page index
    Navigated(usize),
    Deleted,
    /// Click came from someone who can't control the paginator
    Denied,
    /// Unknown button or paginator is not active anymore
    Ignored,
}

#[inline]
pub fn next_index(current: usize, total: usize) -> usize {
    if current + 1 >= total {
        0
    } else {
        current + 1
    }
}

#[inline]
pub fn previous_index(current: usize, total: usize) -> usize {
    if current == 0 {
        total.saturating_sub(1)
    } else {
        current - 1
    }
}

#[inline]
pub fn counter_label(current: usize, separator: &str, total: usize) -> String {
    format!("{}{separator}{total}", current + 1)
}

/// Reverse of [`counter_label`], returns 0-based page index
pub fn parse_counter_label(
    label: &str,
    separator: &str,
    total: usize,
) -> Option<usize> {
    if separator.is_empty() {
        return None;
    }

    let (current, _) = label.split_once(separator)?;
    let page: usize = current.trim().parse().ok()?;

    if (1..=total).contains(&page) {
        Some(page - 1)
    } else {
        None
    }
}

fn default_custom_id(
    prefix: &str,
    invocation_id: Id<InteractionMarker>,
    owner: Option<Id<UserMarker>>,
) -> String {
    match owner {
        Some(owner) => format!("{prefix}:{invocation_id}:{owner}"),
        None => format!("{prefix}:{invocation_id}"),
    }
}

/// Embed paginator controller.
///
/// Holds pre-built pages and a cyclic cursor over them, renders
/// `previous | counter | next | trash` buttons row and reacts to clicks.
/// Doesn't know anything about how events are delivered, see
/// [`SessionManager`](crate::SessionManager) for that.
#[derive(Debug)]
pub struct Paginator {
    config: PaginatorConfig,
    pages: Vec<Embed>,
    total_page_count: usize,
    current_page: usize,

    owner: Option<Id<UserMarker>>,
    invocation_id: Id<InteractionMarker>,

    previous_button: Button,
    next_button: Button,
    trash_button: Button,
    page_counter: Button,

    deleted: bool,
    state: SessionState,
}

impl Paginator {
    pub fn new(
        config: PaginatorConfig,
        invocation_id: Id<InteractionMarker>,
        owner: Option<Id<UserMarker>>,
        pages: Vec<Embed>,
    ) -> Result<Self, ConfigError> {
        if pages.is_empty() {
            return Err(ConfigError::EmptyPages);
        }

        let total_page_count = pages.len();
        let current_page = config.initial_page;

        if current_page >= total_page_count {
            return Err(ConfigError::InitialPageOutOfRange {
                initial: current_page,
                total: total_page_count,
            });
        }

        let make_button = |kind: ButtonKind, emoji: &str, style| {
            let default_id = || default_custom_id(kind.id_prefix(), invocation_id, owner);

            let mut button = config
                .custom_button(kind)
                .cloned()
                .unwrap_or_else(|| emoji_button(default_id(), emoji, style));

            // Discord won't accept a clickable button without id
            if button.custom_id.is_none() {
                button.custom_id = Some(default_id());
            }

            button.disabled = false;
            button
        };

        let previous_button =
            make_button(ButtonKind::Previous, PREVIOUS_EMOJI, ButtonStyle::Secondary);
        let next_button =
            make_button(ButtonKind::Next, NEXT_EMOJI, ButtonStyle::Secondary);
        let trash_button =
            make_button(ButtonKind::Trash, TRASH_EMOJI, ButtonStyle::Danger);

        // Persistent counter id must survive restarts too
        let counter_id = match (&previous_button.custom_id, config.persistent) {
            (Some(prev_id), true) => format!("{COUNTER_PREFIX}:{prev_id}"),
            _ => default_custom_id(COUNTER_PREFIX, invocation_id, owner),
        };

        let page_counter = label_button(
            counter_id,
            counter_label(current_page, &config.page_counter_separator, total_page_count),
            config.page_counter_style,
            true,
        );

        Ok(Self {
            config,
            pages,
            total_page_count,
            current_page,
            owner,
            invocation_id,
            previous_button,
            next_button,
            trash_button,
            page_counter,
            deleted: false,
            state: SessionState::Active,
        })
    }

    /// Rebuilds paginator from a message sent earlier,
    /// page is taken from `cursor` or the counter label
    pub(crate) fn restore<E: ComponentEvent + ?Sized>(
        config: PaginatorConfig,
        pages: Vec<Embed>,
        event: &E,
        cursor: Option<usize>,
    ) -> Result<Self, ConfigError> {
        let mut paginator =
            Self::new(config, event.id(), event.message_owner(), pages)?;

        let cursor = cursor
            .filter(|page| *page < paginator.total_page_count)
            .or_else(|| paginator.cursor_from(event.message_components()));

        if let Some(page) = cursor {
            paginator.current_page = page;
            paginator.refresh_counter();
        }

        Ok(paginator)
    }

    fn cursor_from(&self, components: &[Component]) -> Option<usize> {
        let counter_id = self.page_counter.custom_id.as_deref()?;

        buttons(components)
            .into_iter()
            .filter(|b| b.custom_id.as_deref() == Some(counter_id))
            .find_map(|b| {
                parse_counter_label(
                    b.label.as_deref()?,
                    &self.config.page_counter_separator,
                    self.total_page_count,
                )
            })
    }

    pub(crate) fn config(&self) -> &PaginatorConfig {
        &self.config
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn total_page_count(&self) -> usize {
        self.total_page_count
    }

    pub fn owner(&self) -> Option<Id<UserMarker>> {
        self.owner
    }

    pub fn invocation_id(&self) -> Id<InteractionMarker> {
        self.invocation_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    pub fn counter_label(&self) -> &str {
        self.page_counter.label.as_deref().unwrap_or_default()
    }

    pub fn page(&self) -> &Embed {
        &self.pages[self.current_page]
    }

    /// Custom ids of the three clickable buttons
    pub fn custom_ids(&self) -> impl Iterator<Item = &str> {
        [&self.previous_button, &self.next_button, &self.trash_button]
            .into_iter()
            .filter_map(|b| b.custom_id.as_deref())
    }

    pub fn button_kind(&self, custom_id: &str) -> Option<ButtonKind> {
        let is = |b: &Button| b.custom_id.as_deref() == Some(custom_id);

        if is(&self.previous_button) {
            Some(ButtonKind::Previous)
        } else if is(&self.next_button) {
            Some(ButtonKind::Next)
        } else if is(&self.trash_button) {
            Some(ButtonKind::Trash)
        } else {
            None
        }
    }

    pub fn components(&self) -> Vec<Component> {
        vec![action_row([
            self.previous_button.clone(),
            self.page_counter.clone(),
            self.next_button.clone(),
            self.trash_button.clone(),
        ])]
    }

    /// Current page together with buttons
    pub fn message(&self) -> MessageBuilder {
        MessageBuilder::new()
            .embed(self.page().clone())
            .components(self.components())
    }

    fn refresh_counter(&mut self) {
        self.page_counter.label = Some(counter_label(
            self.current_page,
            &self.config.page_counter_separator,
            self.total_page_count,
        ));
    }

    fn set_disabled(&mut self, disabled: bool) {
        self.previous_button.disabled = disabled;
        self.next_button.disabled = disabled;
        self.trash_button.disabled = disabled;
    }

    /// Sends the first page as a response to the command
    pub async fn send<I: Invocation + ?Sized>(
        &self,
        invocation: &I,
    ) -> PaginatorResult<Id<MessageMarker>> {
        let msg = self.message().ephemeral(self.config.ephemeral);
        let message_id = invocation.send(&msg).await?;

        Ok(message_id)
    }

    /// Checks if the user is allowed to press buttons,
    /// tells them privately if they are not
    pub async fn interaction_check<E: ComponentEvent + ?Sized>(
        &self,
        event: &E,
    ) -> PaginatorResult<bool> {
        if !self.config.interaction_check {
            return Ok(true);
        }

        let allowed = match (event.user_id(), self.owner) {
            (Some(user), Some(owner)) => user == owner,
            _ => false,
        };

        if !allowed {
            let msg = self.config.interaction_check_message.to_message();
            event.respond_private(&msg).await?;
        }

        Ok(allowed)
    }

    pub async fn handle_component<E: ComponentEvent + ?Sized>(
        &mut self,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        if self.state != SessionState::Active {
            event.defer().await?;
            return Ok(Outcome::Ignored);
        }

        if !self.interaction_check(event).await? {
            tracing::debug!(
                invocation = %self.invocation_id,
                user = ?event.user_id(),
                "Denied paginator interaction"
            );
            return Ok(Outcome::Denied);
        }

        match event.custom_id().and_then(|id| self.button_kind(id)) {
            Some(ButtonKind::Previous) => self.on_previous(event).await,
            Some(ButtonKind::Next) => self.on_next(event).await,
            Some(ButtonKind::Trash) => self.on_delete(event).await,
            None => {
                tracing::debug!(
                    custom_id = ?event.custom_id(),
                    "Unknown paginator component"
                );
                event.defer().await?;
                Ok(Outcome::Ignored)
            }
        }
    }

    pub async fn on_previous<E: ComponentEvent + ?Sized>(
        &mut self,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        self.current_page =
            previous_index(self.current_page, self.total_page_count);
        self.refresh_counter();

        event.update_message(&self.message()).await?;

        Ok(Outcome::Navigated(self.current_page))
    }

    pub async fn on_next<E: ComponentEvent + ?Sized>(
        &mut self,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        self.current_page = next_index(self.current_page, self.total_page_count);
        self.refresh_counter();

        event.update_message(&self.message()).await?;

        Ok(Outcome::Navigated(self.current_page))
    }

    pub async fn on_delete<E: ComponentEvent + ?Sized>(
        &mut self,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        // Flag goes first, timeout must never edit a removed message
        self.deleted = true;
        self.state = SessionState::Deleted;

        event.defer().await?;
        event.delete_message().await?;

        Ok(Outcome::Deleted)
    }

    pub async fn on_timeout<I: Invocation + ?Sized>(
        &mut self,
        invocation: &I,
    ) -> PaginatorResult<()> {
        if self.state != SessionState::Active || self.deleted {
            return Ok(());
        }

        self.state = SessionState::TimedOut;
        self.set_disabled(true);

        if let Some(text) = &self.config.on_timeout_message {
            let footer = EmbedFooterBuilder::new(text.as_str()).build();
            self.pages[self.current_page].footer = Some(footer);
        }

        invocation.edit_original(&self.message()).await?;

        Ok(())
    }
}
