mod common;

use std::{sync::Arc, time::Duration};

use common::*;
use fumo_paginator::{
    ConfigError, Dispatch, Outcome, PaginatorConfig, PaginatorError,
    SessionManager, SessionState,
};
use fumo_twilight::components::{action_row, emoji_button, label_button};
use twilight_model::{channel::message::component::ButtonStyle, id::Id};

fn manager() -> Arc<SessionManager<MockEvent>> {
    Arc::new(SessionManager::new())
}

fn timeout_config(secs: u64) -> PaginatorConfig {
    PaginatorConfig::builder()
        .timeout(Duration::from_secs(secs))
        .build()
        .unwrap()
}

async fn sleep(secs: u64) {
    tokio::time::sleep(Duration::from_secs(secs)).await;
}

#[tokio::test(start_paused = true)]
async fn test_duplicate_start_until_deleted() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    let session = sessions
        .start(timeout_config(60), inv.clone(), pages(&["A", "B"]))
        .await
        .unwrap();
    assert!(sessions.is_active(inv.id).await);

    let err = sessions
        .start(timeout_config(60), inv.clone(), pages(&["A", "B"]))
        .await
        .unwrap_err();
    assert!(matches!(err, PaginatorError::DuplicateSession(id) if id == inv.id));
    assert_eq!(log.count(|c| matches!(c, Call::Send(_))), 1);

    let click = MockEvent::click(&log, OWNER, &trash_id());
    assert!(matches!(sessions.dispatch(click).await.unwrap(), Dispatch::Live));

    assert_eq!(session.finished().await, Some(SessionState::Deleted));
    assert!(!sessions.is_active(inv.id).await);

    sessions
        .start(timeout_config(60), inv, pages(&["A", "B"]))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_restart_after_timeout() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    let session = sessions
        .start(timeout_config(10), inv.clone(), pages(&["A"]))
        .await
        .unwrap();

    assert_eq!(session.finished().await, Some(SessionState::TimedOut));
    assert!(!sessions.is_active(inv.id).await);
    assert_eq!(sessions.active_count().await, 0);
    assert!(matches!(log.last(), Some(Call::EditOriginal(msg)) if all_disabled(&msg)));

    sessions
        .start(timeout_config(10), inv, pages(&["A"]))
        .await
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_events_are_served_in_order() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    let session = sessions
        .start(timeout_config(60), inv, pages(&["A", "B", "C"]))
        .await
        .unwrap();
    assert_eq!(session.message_id, Id::new(MESSAGE));

    for custom_id in [next_id(), next_id(), prev_id(), trash_id()] {
        let click = MockEvent::click(&log, OWNER, &custom_id);
        assert!(matches!(sessions.dispatch(click).await.unwrap(), Dispatch::Live));
    }

    assert_eq!(session.finished().await, Some(SessionState::Deleted));

    let counters: Vec<_> = log
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            Call::Update(msg) => counter(&msg),
            _ => None,
        })
        .collect();

    assert_eq!(counters, ["2/3", "3/3", "2/3"]);
    let calls = log.calls();
    assert_eq!(&calls[calls.len() - 2..], &[Call::Defer, Call::Delete]);
}

#[tokio::test(start_paused = true)]
async fn test_navigation_resets_idle_timer() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    sessions
        .start(timeout_config(10), inv.clone(), pages(&["A", "B"]))
        .await
        .unwrap();

    sleep(6).await;
    sessions
        .dispatch(MockEvent::click(&log, OWNER, &next_id()))
        .await
        .unwrap();
    sleep(6).await;

    assert!(sessions.is_active(inv.id).await);

    sleep(6).await;
    assert!(!sessions.is_active(inv.id).await);
}

#[tokio::test(start_paused = true)]
async fn test_strangers_do_not_reset_idle_timer() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    sessions
        .start(timeout_config(10), inv.clone(), pages(&["A", "B"]))
        .await
        .unwrap();

    sleep(6).await;
    sessions
        .dispatch(MockEvent::click(&log, STRANGER, &next_id()))
        .await
        .unwrap();
    sleep(6).await;

    assert!(!sessions.is_active(inv.id).await);
    assert_eq!(log.count(|c| matches!(c, Call::Private(_))), 1);
    assert_eq!(log.count(|c| matches!(c, Call::Update(_))), 0);
}

#[tokio::test(start_paused = true)]
async fn test_no_timeout_keeps_session() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    let cfg = PaginatorConfig::builder().timeout(None).build().unwrap();
    sessions.start(cfg, inv.clone(), pages(&["A"])).await.unwrap();

    sleep(60 * 60 * 24).await;
    assert!(sessions.is_active(inv.id).await);
    assert_eq!(log.count(|c| matches!(c, Call::EditOriginal(_))), 0);
}

#[tokio::test]
async fn test_unrouted_event() {
    let log = Log::default();
    let sessions = manager();

    let mut click = MockEvent::click(&log, OWNER, "whatever");
    click.message_id = Some(Id::new(42));

    assert!(matches!(
        sessions.dispatch(click).await.unwrap(),
        Dispatch::Unrouted(_)
    ));
    assert!(log.calls().is_empty());
}

#[tokio::test]
async fn test_failed_start_releases_entry() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    let err = sessions
        .start(PaginatorConfig::default(), inv.clone(), Vec::new())
        .await
        .unwrap_err();
    assert!(matches!(err, PaginatorError::Config(ConfigError::EmptyPages)));
    assert!(!sessions.is_active(inv.id).await);

    let mut broken = inv.clone();
    broken.fail_send = true;

    let err = sessions
        .start(PaginatorConfig::default(), broken, pages(&["A"]))
        .await
        .unwrap_err();
    assert!(matches!(err, PaginatorError::Host(_)));
    assert!(!sessions.is_active(inv.id).await);

    sessions
        .start(PaginatorConfig::default(), inv, pages(&["A"]))
        .await
        .unwrap();
}

fn persistent_config() -> PaginatorConfig {
    PaginatorConfig::builder()
        .previous_button(emoji_button("pages:prev", "<", ButtonStyle::Primary))
        .next_button(emoji_button("pages:next", ">", ButtonStyle::Primary))
        .trash_button(emoji_button("pages:trash", "x", ButtonStyle::Danger))
        .persistent(true)
        .timeout(None)
        .build()
        .unwrap()
}

fn sent_message(counter_label: &str) -> Vec<twilight_model::channel::message::Component> {
    vec![action_row([
        emoji_button("pages:prev", "<", ButtonStyle::Primary),
        label_button("COUNTER:pages:prev", counter_label, ButtonStyle::Secondary, true),
        emoji_button("pages:next", ">", ButtonStyle::Primary),
        emoji_button("pages:trash", "x", ButtonStyle::Danger),
    ])]
}

#[tokio::test]
async fn test_persistent_after_restart() {
    let log = Log::default();
    let sessions = manager();

    sessions
        .add_persistent(persistent_config(), pages(&["A", "B", "C"]))
        .await
        .unwrap();

    // Message is unknown to the fresh manager
    let mut click = MockEvent::click(&log, OWNER, "pages:next");
    click.components = sent_message("2/3");

    match sessions.dispatch(click).await.unwrap() {
        Dispatch::Persistent(outcome) => assert_eq!(outcome, Outcome::Navigated(2)),
        other => panic!("expected persistent dispatch, got {other:?}"),
    }

    match log.last() {
        Some(Call::Update(msg)) => {
            assert_eq!(title(&msg), Some("C"));
            assert_eq!(counter(&msg).as_deref(), Some("3/3"));
        }
        other => panic!("expected update, got {other:?}"),
    }

    // Broken label falls back to the initial page
    let mut click = MockEvent::click(&log, OWNER, "pages:prev");
    click.components = sent_message("???");

    match sessions.dispatch(click).await.unwrap() {
        Dispatch::Persistent(outcome) => assert_eq!(outcome, Outcome::Navigated(2)),
        other => panic!("expected persistent dispatch, got {other:?}"),
    }
}

#[tokio::test]
async fn test_persistent_checks_owner() {
    let log = Log::default();
    let sessions = manager();

    sessions
        .add_persistent(persistent_config(), pages(&["A", "B"]))
        .await
        .unwrap();

    let mut click = MockEvent::click(&log, STRANGER, "pages:trash");
    click.components = sent_message("1/2");

    assert!(matches!(
        sessions.dispatch(click).await.unwrap(),
        Dispatch::Persistent(Outcome::Denied)
    ));
    assert_eq!(log.count(|c| matches!(c, Call::Delete)), 0);

    let mut click = MockEvent::click(&log, OWNER, "pages:trash");
    click.components = sent_message("1/2");

    assert!(matches!(
        sessions.dispatch(click).await.unwrap(),
        Dispatch::Persistent(Outcome::Deleted)
    ));
    assert_eq!(log.count(|c| matches!(c, Call::Delete)), 1);
}

#[tokio::test]
async fn test_add_persistent_requires_persistent_config() {
    let sessions = manager();

    let err = sessions
        .add_persistent(PaginatorConfig::default(), pages(&["A"]))
        .await
        .unwrap_err();

    assert!(matches!(err, PaginatorError::Config(ConfigError::NotPersistent)));
}

#[tokio::test]
async fn test_persistent_start_is_not_tracked() {
    let log = Log::default();
    let sessions = manager();
    let inv = MockInvocation::new(&log);

    sessions
        .add_persistent(persistent_config(), pages(&["A", "B", "C"]))
        .await
        .unwrap();

    let session = sessions
        .start(persistent_config(), inv.clone(), pages(&["A", "B", "C"]))
        .await
        .unwrap();

    assert!(session.is_persistent());
    assert_eq!(session.message_id, Id::new(MESSAGE));
    assert!(!sessions.is_active(inv.id).await);
    assert_eq!(sessions.active_count().await, 0);

    let sent = match log.last() {
        Some(Call::Send(msg)) => msg,
        other => panic!("expected send, got {other:?}"),
    };

    let mut click = MockEvent::click(&log, OWNER, "pages:next");
    click.components = sent.components.unwrap();

    match sessions.dispatch(click).await.unwrap() {
        Dispatch::Persistent(outcome) => assert_eq!(outcome, Outcome::Navigated(1)),
        other => panic!("expected persistent dispatch, got {other:?}"),
    }

    assert_eq!(session.finished().await, Some(SessionState::Active));
}

#[tokio::test(start_paused = true)]
async fn test_fast_persistent_clicks_are_not_lost() {
    let log = Log::default();
    let sessions = manager();

    sessions
        .add_persistent(persistent_config(), pages(&["A", "B", "C"]))
        .await
        .unwrap();

    // Both clicks happened before the first update went out,
    // so both carry the same counter
    let mut first = MockEvent::click(&log, OWNER, "pages:next");
    first.components = sent_message("1/3");
    first.delay = Some(Duration::from_millis(300));
    let second = first.clone();

    let (first, second) =
        tokio::join!(sessions.dispatch(first), sessions.dispatch(second));

    assert!(matches!(first.unwrap(), Dispatch::Persistent(Outcome::Navigated(1))));
    assert!(matches!(second.unwrap(), Dispatch::Persistent(Outcome::Navigated(2))));

    // Later clicks trust the message again
    let mut click = MockEvent::click(&log, OWNER, "pages:prev");
    click.components = sent_message("3/3");

    assert!(matches!(
        sessions.dispatch(click).await.unwrap(),
        Dispatch::Persistent(Outcome::Navigated(1))
    ));
}
