use thiserror::Error;
use twilight_model::id::{marker::InteractionMarker, Id};

use crate::{config::ButtonKind, host::HostError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("persistent paginator must not have a timeout, got `{0:?}`")]
    PersistentWithTimeout(std::time::Duration),
    #[error("persistent paginator needs a custom id on the {0} button")]
    MissingCustomId(ButtonKind),
    #[error("custom id `{0}` is used by more than one button")]
    DuplicateCustomId(String),
    #[error("paginator needs at least one page")]
    EmptyPages,
    #[error("initial page `{initial}` is out of range for `{total}` pages")]
    InitialPageOutOfRange { initial: usize, total: usize },
    #[error("expected a persistent paginator")]
    NotPersistent,
}

#[derive(Error, Debug)]
pub enum PaginatorError {
    #[error("invalid paginator config: {0}")]
    Config(#[from] ConfigError),
    #[error("only one paginator per command is allowed, interaction `{0}` already has one")]
    DuplicateSession(Id<InteractionMarker>),
    #[error("host request failed: {0}")]
    Host(#[from] HostError),
}

pub type PaginatorResult<T> = Result<T, PaginatorError>;
