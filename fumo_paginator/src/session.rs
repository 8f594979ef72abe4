use std::{collections::HashMap, sync::Arc};

use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
    time::{self, Instant},
};
use twilight_model::{
    channel::message::Embed,
    id::{
        marker::{InteractionMarker, MessageMarker},
        Id,
    },
};

use crate::{
    config::PaginatorConfig,
    error::{ConfigError, PaginatorError, PaginatorResult},
    host::{ComponentEvent, Invocation},
    paginator::{Outcome, Paginator, SessionState},
};

/// Button clicks waiting for a busy session
const EVENT_QUEUE: usize = 16;

/// Where [`SessionManager::dispatch`] sent the event
#[derive(Debug)]
pub enum Dispatch<E> {
    /// Queued to a running session
    Live,
    /// Handled right away by a persistent paginator
    Persistent(Outcome),
    /// Not a paginator event, given back to the caller
    Unrouted(E),
}

/// Running paginator session
#[derive(Debug)]
pub struct Session {
    pub invocation_id: Id<InteractionMarker>,
    pub message_id: Id<MessageMarker>,
    /// `None` for persistent paginators, their clicks are
    /// served by the registered [`PersistentPaginator`]
    handle: Option<JoinHandle<SessionState>>,
}

impl Session {
    pub fn is_persistent(&self) -> bool {
        self.handle.is_none()
    }

    /// Waits until session reaches its final state.
    /// Persistent sessions never end and report `Active` right away.
    pub async fn finished(self) -> Option<SessionState> {
        match self.handle {
            Some(handle) => handle.await.ok(),
            None => Some(SessionState::Active),
        }
    }
}

/// Paginator which is able to handle clicks on its messages
/// without any in-memory state, e.g. after a restart
#[derive(Debug)]
pub struct PersistentPaginator {
    config: PaginatorConfig,
    pages: Vec<Embed>,
    custom_ids: Vec<String>,
}

impl PersistentPaginator {
    pub fn new(
        config: PaginatorConfig,
        pages: Vec<Embed>,
    ) -> Result<Self, ConfigError> {
        if !config.is_persistent() {
            return Err(ConfigError::NotPersistent);
        }

        // Custom ids are guaranteed by the config validation
        // so any interaction id works here
        let paginator =
            Paginator::new(config.clone(), Id::new(1), None, pages.clone())?;
        let custom_ids = paginator.custom_ids().map(ToOwned::to_owned).collect();

        Ok(Self {
            config,
            pages,
            custom_ids,
        })
    }

    pub fn matches(&self, custom_id: &str) -> bool {
        self.custom_ids.iter().any(|id| id == custom_id)
    }

    pub async fn handle<E: ComponentEvent + ?Sized>(
        &self,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        self.handle_at(event, None).await
    }

    /// Same as [`handle`](Self::handle) but `cursor` wins over
    /// the counter label found in the message
    async fn handle_at<E: ComponentEvent + ?Sized>(
        &self,
        event: &E,
        cursor: Option<usize>,
    ) -> PaginatorResult<Outcome> {
        let mut paginator = Paginator::restore(
            self.config.clone(),
            self.pages.clone(),
            event,
            cursor,
        )?;

        paginator.handle_component(event).await
    }
}

/// Clicks on one persistent message which are being handled right now.
///
/// Events carry the message as it was at click time, so a click queued
/// behind another one would see a stale counter label.
#[derive(Debug, Default)]
struct InFlight {
    cursor: Option<usize>,
}

#[derive(Debug)]
struct Registry<E> {
    sessions: HashMap<Id<InteractionMarker>, mpsc::Sender<E>>,
    messages: HashMap<Id<MessageMarker>, Id<InteractionMarker>>,
}

impl<E> Default for Registry<E> {
    fn default() -> Self {
        Self {
            sessions: HashMap::new(),
            messages: HashMap::new(),
        }
    }
}

/// Owns every running paginator session.
///
/// Only one session per command invocation is allowed,
/// entry is removed as soon as session ends in any way.
#[derive(Debug)]
pub struct SessionManager<E> {
    registry: Mutex<Registry<E>>,
    persistent: Mutex<Vec<Arc<PersistentPaginator>>>,
    in_flight: Mutex<HashMap<Id<MessageMarker>, Arc<Mutex<InFlight>>>>,
}

impl<E> Default for SessionManager<E> {
    fn default() -> Self {
        Self {
            registry: Mutex::new(Registry::default()),
            persistent: Mutex::new(Vec::new()),
            in_flight: Mutex::new(HashMap::new()),
        }
    }
}

impl<E: ComponentEvent + 'static> SessionManager<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_active(&self, invocation_id: Id<InteractionMarker>) -> bool {
        self.registry.lock().await.sessions.contains_key(&invocation_id)
    }

    pub async fn active_count(&self) -> usize {
        self.registry.lock().await.sessions.len()
    }

    async fn reserve(
        &self,
        invocation_id: Id<InteractionMarker>,
        tx: mpsc::Sender<E>,
    ) -> PaginatorResult<()> {
        let mut registry = self.registry.lock().await;

        if registry.sessions.contains_key(&invocation_id) {
            return Err(PaginatorError::DuplicateSession(invocation_id));
        }

        registry.sessions.insert(invocation_id, tx);

        Ok(())
    }

    async fn bind_message(
        &self,
        invocation_id: Id<InteractionMarker>,
        message_id: Id<MessageMarker>,
    ) {
        let mut registry = self.registry.lock().await;
        registry.messages.insert(message_id, invocation_id);
    }

    async fn release(&self, invocation_id: Id<InteractionMarker>) {
        let mut registry = self.registry.lock().await;

        registry.sessions.remove(&invocation_id);
        registry.messages.retain(|_, id| *id != invocation_id);
    }

    /// Sends first page and spawns a task that serves
    /// button clicks until timeout or deletion.
    ///
    /// Persistent paginators are only sent, their clicks go to
    /// the one registered with [`add_persistent`](Self::add_persistent).
    pub async fn start<I: Invocation + 'static>(
        self: &Arc<Self>,
        config: PaginatorConfig,
        invocation: I,
        pages: Vec<Embed>,
    ) -> PaginatorResult<Session> {
        let invocation_id = invocation.id();
        let (tx, rx) = mpsc::channel(EVENT_QUEUE);

        self.reserve(invocation_id, tx).await?;

        let paginator =
            match Paginator::new(config, invocation_id, invocation.user_id(), pages) {
                Ok(paginator) => paginator,
                Err(e) => {
                    self.release(invocation_id).await;
                    return Err(e.into());
                }
            };

        let message_id = match paginator.send(&invocation).await {
            Ok(id) => id,
            Err(e) => {
                self.release(invocation_id).await;
                return Err(e);
            }
        };

        if paginator.config().is_persistent() {
            self.release(invocation_id).await;

            if !self.has_persistent(&paginator).await {
                tracing::warn!(
                    invocation = %invocation_id,
                    "Persistent paginator was sent but never registered, clicks won't be handled"
                );
            }

            tracing::info!(
                invocation = %invocation_id,
                message = %message_id,
                "Sent persistent paginator"
            );

            return Ok(Session {
                invocation_id,
                message_id,
                handle: None,
            });
        }

        self.bind_message(invocation_id, message_id).await;

        tracing::info!(
            invocation = %invocation_id,
            message = %message_id,
            pages = paginator.total_page_count(),
            "Started paginator"
        );

        let manager = Arc::clone(self);
        let handle = tokio::spawn(async move {
            let mut paginator = paginator;

            if let Err(e) = serve(&mut paginator, &invocation, rx).await {
                tracing::warn!(
                    invocation = %invocation_id,
                    "Paginator session ended with error: {e}"
                );
            }

            manager.release(invocation_id).await;

            tracing::debug!(
                invocation = %invocation_id,
                state = ?paginator.state(),
                "Released paginator session"
            );

            paginator.state()
        });

        Ok(Session {
            invocation_id,
            message_id,
            handle: Some(handle),
        })
    }

    async fn has_persistent(&self, paginator: &Paginator) -> bool {
        let persistent = self.persistent.lock().await;

        paginator
            .custom_ids()
            .any(|id| persistent.iter().any(|p| p.matches(id)))
    }

    pub async fn add_persistent(
        &self,
        config: PaginatorConfig,
        pages: Vec<Embed>,
    ) -> PaginatorResult<()> {
        let paginator = PersistentPaginator::new(config, pages)?;
        self.persistent.lock().await.push(Arc::new(paginator));

        Ok(())
    }

    /// Routes a button click to the session that owns the message,
    /// falls back to persistent paginators by custom id
    pub async fn dispatch(&self, event: E) -> PaginatorResult<Dispatch<E>> {
        let sender = match event.message_id() {
            Some(message_id) => {
                let registry = self.registry.lock().await;

                registry
                    .messages
                    .get(&message_id)
                    .and_then(|id| registry.sessions.get(id))
                    .cloned()
            }
            None => None,
        };

        let event = match sender {
            Some(tx) => match tx.send(event).await {
                Ok(()) => return Ok(Dispatch::Live),
                // Session finished while we were looking it up
                Err(mpsc::error::SendError(event)) => event,
            },
            None => event,
        };

        let persistent = match event.custom_id() {
            Some(custom_id) => self
                .persistent
                .lock()
                .await
                .iter()
                .find(|p| p.matches(custom_id))
                .cloned(),
            None => None,
        };

        match persistent {
            Some(paginator) => {
                let outcome = match event.message_id() {
                    Some(message_id) => {
                        self.handle_persistent(&paginator, message_id, &event)
                            .await?
                    }
                    None => paginator.handle(&event).await?,
                };

                Ok(Dispatch::Persistent(outcome))
            }
            None => Ok(Dispatch::Unrouted(event)),
        }
    }

    /// Clicks on the same persistent message are handled one by one,
    /// each continuing from the page the previous one ended on
    async fn handle_persistent(
        &self,
        paginator: &PersistentPaginator,
        message_id: Id<MessageMarker>,
        event: &E,
    ) -> PaginatorResult<Outcome> {
        let slot = Arc::clone(self.in_flight.lock().await.entry(message_id).or_default());

        let res = {
            let mut in_flight = slot.lock().await;
            let res = paginator.handle_at(event, in_flight.cursor).await;

            if let Ok(Outcome::Navigated(page)) = res {
                in_flight.cursor = Some(page);
            }

            res
        };

        let mut messages = self.in_flight.lock().await;

        // Only the map and this call hold it, nobody is waiting
        if Arc::strong_count(&slot) == 2 {
            messages.remove(&message_id);
        }

        res
    }
}

/// Session loop, every event for one paginator goes through here
/// one by one so edits never overlap
async fn serve<I, E>(
    paginator: &mut Paginator,
    invocation: &I,
    mut rx: mpsc::Receiver<E>,
) -> PaginatorResult<()>
where
    I: Invocation + ?Sized,
    E: ComponentEvent,
{
    let idle = paginator.config().timeout();
    let mut deadline = idle.map(|idle| Instant::now() + idle);

    loop {
        let next = match deadline {
            Some(deadline) => match time::timeout_at(deadline, rx.recv()).await {
                Ok(next) => next,
                Err(_) => {
                    tracing::debug!(
                        invocation = %paginator.invocation_id(),
                        "Paginator timed out"
                    );
                    return paginator.on_timeout(invocation).await;
                }
            },
            None => rx.recv().await,
        };

        let Some(event) = next else {
            return Ok(());
        };

        match paginator.handle_component(&event).await? {
            Outcome::Deleted => return Ok(()),
            // Strangers clicking around don't keep paginator alive
            Outcome::Denied => {}
            Outcome::Navigated(_) | Outcome::Ignored => {
                deadline = idle.map(|idle| Instant::now() + idle);
            }
        }
    }
}
