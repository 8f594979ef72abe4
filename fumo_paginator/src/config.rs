use std::{fmt, time::Duration};

use fumo_twilight::message::MessageBuilder;
use twilight_model::channel::message::{
    component::{Button, ButtonStyle},
    Embed,
};
use twilight_util::builder::embed::EmbedBuilder;

use crate::error::ConfigError;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
pub const DEFAULT_SEPARATOR: &str = "/";
pub const DEFAULT_CHECK_MESSAGE: &str =
    "You cannot control this pagination because you did not execute it.";

const RED: u32 = 0xE74C3C;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonKind {
    Previous,
    Next,
    Trash,
}

impl ButtonKind {
    pub const ALL: [ButtonKind; 3] =
        [ButtonKind::Previous, ButtonKind::Next, ButtonKind::Trash];

    /// Prefix of the generated custom id
    pub fn id_prefix(&self) -> &'static str {
        match self {
            ButtonKind::Previous => "PREV_BTN",
            ButtonKind::Next => "NEXT_BTN",
            ButtonKind::Trash => "TRASH_BTN",
        }
    }
}

impl fmt::Display for ButtonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ButtonKind::Previous => f.write_str("previous"),
            ButtonKind::Next => f.write_str("next"),
            ButtonKind::Trash => f.write_str("trash"),
        }
    }
}

/// Message sent privately to anyone who
/// is not allowed to control the paginator
#[derive(Debug, Clone, PartialEq)]
pub enum CheckMessage {
    Text(String),
    Embed(Embed),
}

impl CheckMessage {
    pub fn to_message(&self) -> MessageBuilder {
        let msg = match self {
            CheckMessage::Text(text) => MessageBuilder::new().content(text),
            CheckMessage::Embed(embed) => {
                MessageBuilder::new().embed(embed.clone())
            }
        };

        msg.ephemeral(true)
    }
}

impl Default for CheckMessage {
    fn default() -> Self {
        let embed = EmbedBuilder::new()
            .description(DEFAULT_CHECK_MESSAGE)
            .color(RED)
            .build();

        CheckMessage::Embed(embed)
    }
}

impl From<&str> for CheckMessage {
    fn from(value: &str) -> Self {
        CheckMessage::Text(value.to_owned())
    }
}

impl From<String> for CheckMessage {
    fn from(value: String) -> Self {
        CheckMessage::Text(value)
    }
}

impl From<Embed> for CheckMessage {
    fn from(value: Embed) -> Self {
        CheckMessage::Embed(value)
    }
}

/// Validated paginator options, can be reused for many sessions
#[derive(Debug, Clone)]
pub struct PaginatorConfig {
    pub(crate) timeout: Option<Duration>,
    pub(crate) previous_button: Option<Button>,
    pub(crate) next_button: Option<Button>,
    pub(crate) trash_button: Option<Button>,
    pub(crate) page_counter_separator: String,
    pub(crate) page_counter_style: ButtonStyle,
    pub(crate) initial_page: usize,
    pub(crate) on_timeout_message: Option<String>,
    pub(crate) interaction_check: bool,
    pub(crate) interaction_check_message: CheckMessage,
    pub(crate) ephemeral: bool,
    pub(crate) persistent: bool,
}

impl Default for PaginatorConfig {
    fn default() -> Self {
        Self {
            timeout: Some(DEFAULT_TIMEOUT),
            previous_button: None,
            next_button: None,
            trash_button: None,
            page_counter_separator: DEFAULT_SEPARATOR.to_owned(),
            page_counter_style: ButtonStyle::Secondary,
            initial_page: 0,
            on_timeout_message: None,
            interaction_check: true,
            interaction_check_message: CheckMessage::default(),
            ephemeral: false,
            persistent: false,
        }
    }
}

impl PaginatorConfig {
    pub fn builder() -> PaginatorBuilder {
        PaginatorBuilder::default()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn separator(&self) -> &str {
        &self.page_counter_separator
    }

    pub fn initial_page(&self) -> usize {
        self.initial_page
    }

    pub fn is_persistent(&self) -> bool {
        self.persistent
    }

    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral
    }

    pub(crate) fn custom_button(&self, kind: ButtonKind) -> Option<&Button> {
        match kind {
            ButtonKind::Previous => self.previous_button.as_ref(),
            ButtonKind::Next => self.next_button.as_ref(),
            ButtonKind::Trash => self.trash_button.as_ref(),
        }
    }
}

#[derive(Debug, Default)]
pub struct PaginatorBuilder {
    config: PaginatorConfig,
}

impl PaginatorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` disables the idle timeout
    pub fn timeout(mut self, timeout: impl Into<Option<Duration>>) -> Self {
        self.config.timeout = timeout.into();
        self
    }

    pub fn previous_button(mut self, button: Button) -> Self {
        self.config.previous_button = Some(button);
        self
    }

    pub fn next_button(mut self, button: Button) -> Self {
        self.config.next_button = Some(button);
        self
    }

    pub fn trash_button(mut self, button: Button) -> Self {
        self.config.trash_button = Some(button);
        self
    }

    pub fn page_counter_separator(mut self, separator: impl Into<String>) -> Self {
        self.config.page_counter_separator = separator.into();
        self
    }

    pub fn page_counter_style(mut self, style: ButtonStyle) -> Self {
        self.config.page_counter_style = style;
        self
    }

    pub fn initial_page(mut self, page: usize) -> Self {
        self.config.initial_page = page;
        self
    }

    pub fn on_timeout_message(mut self, message: impl Into<String>) -> Self {
        self.config.on_timeout_message = Some(message.into());
        self
    }

    pub fn interaction_check(mut self, check: bool) -> Self {
        self.config.interaction_check = check;
        self
    }

    pub fn interaction_check_message(
        mut self,
        message: impl Into<CheckMessage>,
    ) -> Self {
        self.config.interaction_check_message = message.into();
        self
    }

    pub fn ephemeral(mut self, ephemeral: bool) -> Self {
        self.config.ephemeral = ephemeral;
        self
    }

    pub fn persistent(mut self, persistent: bool) -> Self {
        self.config.persistent = persistent;
        self
    }

    pub fn build(self) -> Result<PaginatorConfig, ConfigError> {
        let config = self.config;

        let mut custom_ids: Vec<&str> = Vec::with_capacity(ButtonKind::ALL.len());

        for kind in ButtonKind::ALL {
            let Some(id) = config.custom_button(kind).and_then(|b| b.custom_id.as_deref())
            else {
                continue;
            };

            // Click would always resolve to the first button with this id
            if custom_ids.contains(&id) {
                return Err(ConfigError::DuplicateCustomId(id.to_owned()));
            }

            custom_ids.push(id);
        }

        if config.persistent {
            if let Some(timeout) = config.timeout {
                return Err(ConfigError::PersistentWithTimeout(timeout));
            }

            // Stable ids are the only way to find the paginator
            // again after restart
            for kind in ButtonKind::ALL {
                let has_id = config
                    .custom_button(kind)
                    .and_then(|b| b.custom_id.as_ref())
                    .is_some();

                if !has_id {
                    return Err(ConfigError::MissingCustomId(kind));
                }
            }
        }

        Ok(config)
    }
}
