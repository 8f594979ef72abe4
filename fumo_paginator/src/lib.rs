//! Embed paginator for twilight bots.
//!
//! ```ignore
//! let config = PaginatorConfig::builder()
//!     .timeout(Duration::from_secs(30))
//!     .on_timeout_message("Timed out")
//!     .build()?;
//!
//! ctx.sessions.start(config, cmd, embeds).await?;
//! ```
//!
//! Button clicks are fed back with [`SessionManager::dispatch`].

mod paginator;
mod session;

pub mod config;
pub mod error;
pub mod host;

pub use config::{ButtonKind, CheckMessage, PaginatorBuilder, PaginatorConfig};
pub use error::{ConfigError, PaginatorError, PaginatorResult};
pub use host::{ComponentEvent, HostError, HostResult, Invocation};
pub use paginator::{
    counter_label, next_index, parse_counter_label, previous_index, Outcome,
    Paginator, SessionState,
};
pub use session::{Dispatch, PersistentPaginator, Session, SessionManager};
