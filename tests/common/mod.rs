//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_repository;

use std::time::Duration;

use userflow::domain::{Gender, User};
use userflow::users::{EventStream, SingleEvent, UserItem};

const WAIT_TIMEOUT: Duration = Duration::from_secs(2);

/// Domain user with predictable fields derived from `id`.
pub fn user(id: &str) -> User {
    User {
        id: id.to_string(),
        email: format!("{}@example.com", id),
        first_name: id.to_uppercase(),
        last_name: "Doe".to_string(),
        avatar: format!("https://example.com/{}.png", id),
        gender: Gender::Female,
    }
}

pub fn item(id: &str) -> UserItem {
    UserItem::from(user(id))
}

/// Poll `condition` until it holds, failing the test after a timeout.
pub async fn wait_until<F: FnMut() -> bool>(mut condition: F) {
    tokio::time::timeout(WAIT_TIMEOUT, async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// Give spawned tasks a chance to react to something that should be ignored.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

/// Next single event, failing the test after a timeout.
pub async fn next_event(events: &EventStream) -> SingleEvent {
    tokio::time::timeout(WAIT_TIMEOUT, events.recv())
        .await
        .expect("no event in time")
        .expect("event stream closed")
}
