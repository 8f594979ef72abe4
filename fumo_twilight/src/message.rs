use twilight_model::channel::message::{Component, Embed, MessageFlags};

/// Everything that can be sent or edited through an interaction response
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MessageBuilder {
    pub content: Option<String>,
    pub embed: Option<Embed>,
    pub components: Option<Vec<Component>>,
    pub flags: Option<MessageFlags>,
}

impl MessageBuilder {
    pub fn new() -> Self {
        MessageBuilder {
            ..Default::default()
        }
    }

    pub fn flags(mut self, flags: impl Into<MessageFlags>) -> Self {
        self.flags = Some(flags.into());
        self
    }

    /// Shortcut for the only flag paginator cares about
    pub fn ephemeral(self, ephemeral: bool) -> Self {
        if ephemeral {
            self.flags(MessageFlags::EPHEMERAL)
        } else {
            self
        }
    }

    pub fn is_ephemeral(&self) -> bool {
        self.flags
            .map(|f| f.contains(MessageFlags::EPHEMERAL))
            .unwrap_or(false)
    }

    pub fn content(mut self, s: impl Into<String>) -> Self {
        self.content = Some(s.into());
        self
    }

    pub fn embed(mut self, e: impl Into<Embed>) -> Self {
        self.embed = Some(e.into());
        self
    }

    pub fn components(mut self, components: Vec<Component>) -> Self {
        self.components = Some(components);
        self
    }
}
