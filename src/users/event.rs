//! One-shot events and the event sink.

use std::sync::Arc;

use futures::Stream;
use tokio::sync::{mpsc, Mutex};

use crate::domain::UserError;

use super::change::{GetUserChange, PartialChange, RefreshChange, RemoveUserChange};
use super::state::UserItem;

/// Side-effect notification for the view. Never replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum SingleEvent {
    GetUsersError(UserError),
    RefreshSuccess,
    RefreshFailure(UserError),
    RemoveUserSuccess(UserItem),
    RemoveUserFailure { user: UserItem, error: UserError },
}

impl SingleEvent {
    /// Map a change to its event, if it has one.
    ///
    /// `Loading` and `Data` changes never produce events.
    pub fn from_change(change: &PartialChange) -> Option<Self> {
        match change {
            PartialChange::GetUser(GetUserChange::Error(error)) => {
                Some(SingleEvent::GetUsersError(error.clone()))
            }
            PartialChange::GetUser(GetUserChange::Loading | GetUserChange::Data(_)) => None,
            PartialChange::Refresh(RefreshChange::Success) => Some(SingleEvent::RefreshSuccess),
            PartialChange::Refresh(RefreshChange::Failure(error)) => {
                Some(SingleEvent::RefreshFailure(error.clone()))
            }
            PartialChange::Refresh(RefreshChange::Loading) => None,
            PartialChange::RemoveUser(RemoveUserChange::Success(user)) => {
                Some(SingleEvent::RemoveUserSuccess(user.clone()))
            }
            PartialChange::RemoveUser(RemoveUserChange::Failure { user, error }) => {
                Some(SingleEvent::RemoveUserFailure {
                    user: user.clone(),
                    error: error.clone(),
                })
            }
        }
    }
}

/// Writing half of the event channel, owned by the store's fold task.
pub struct EventSink {
    sender: mpsc::Sender<SingleEvent>,
}

impl EventSink {
    /// Create a sink with a bounded buffer and its consuming stream.
    pub fn new(capacity: usize) -> (Self, EventStream) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            Self { sender },
            EventStream {
                receiver: Arc::new(Mutex::new(receiver)),
            },
        )
    }

    /// Forward the event for `change`, if any.
    ///
    /// Waits while the buffer is full. A closed stream is logged and ignored.
    pub async fn dispatch(&self, change: &PartialChange) {
        let Some(event) = SingleEvent::from_change(change) else {
            return;
        };
        tracing::debug!(event = ?event, "Sending single event");
        if self.sender.send(event).await.is_err() {
            tracing::trace!("Single event dropped (event stream gone)");
        }
    }
}

/// Consuming side of the event channel.
///
/// Clones share one receiver: each event reaches exactly one of them.
#[derive(Clone)]
pub struct EventStream {
    receiver: Arc<Mutex<mpsc::Receiver<SingleEvent>>>,
}

impl EventStream {
    /// Wait for the next event. `None` once the store is gone.
    pub async fn recv(&self) -> Option<SingleEvent> {
        self.receiver.lock().await.recv().await
    }

    /// Take an already-buffered event without waiting.
    pub fn try_recv(&self) -> Option<SingleEvent> {
        let mut receiver = self.receiver.try_lock().ok()?;
        receiver.try_recv().ok()
    }

    /// Adapt into a [`Stream`].
    pub fn into_stream(self) -> impl Stream<Item = SingleEvent> + Send + 'static {
        futures::stream::unfold(self, |events| async move {
            let event = events.recv().await?;
            Some((event, events))
        })
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Gender;
    use futures::StreamExt;

    fn item(id: &str) -> UserItem {
        UserItem {
            id: id.to_string(),
            email: format!("{}@example.com", id),
            avatar: String::new(),
            first_name: id.to_string(),
            last_name: "Test".to_string(),
            gender: Gender::Female,
        }
    }

    #[test]
    fn loading_and_data_have_no_event() {
        assert!(SingleEvent::from_change(&GetUserChange::Loading.into()).is_none());
        assert!(SingleEvent::from_change(&GetUserChange::Data(vec![item("a")]).into()).is_none());
        assert!(SingleEvent::from_change(&RefreshChange::Loading.into()).is_none());
    }

    #[test]
    fn outcomes_map_to_events() {
        assert_eq!(
            SingleEvent::from_change(&GetUserChange::Error(UserError::NetworkError).into()),
            Some(SingleEvent::GetUsersError(UserError::NetworkError))
        );
        assert_eq!(
            SingleEvent::from_change(&RefreshChange::Success.into()),
            Some(SingleEvent::RefreshSuccess)
        );
        assert_eq!(
            SingleEvent::from_change(&RefreshChange::Failure(UserError::ServerError).into()),
            Some(SingleEvent::RefreshFailure(UserError::ServerError))
        );
        assert_eq!(
            SingleEvent::from_change(&RemoveUserChange::Success(item("a")).into()),
            Some(SingleEvent::RemoveUserSuccess(item("a")))
        );
        assert_eq!(
            SingleEvent::from_change(
                &RemoveUserChange::Failure {
                    user: item("a"),
                    error: UserError::NetworkError,
                }
                .into()
            ),
            Some(SingleEvent::RemoveUserFailure {
                user: item("a"),
                error: UserError::NetworkError,
            })
        );
    }

    #[tokio::test]
    async fn each_event_is_delivered_once() {
        let (sink, events) = EventSink::new(8);
        let other = events.clone();

        sink.dispatch(&RefreshChange::Success.into()).await;
        sink.dispatch(&RefreshChange::Loading.into()).await;

        assert_eq!(events.recv().await, Some(SingleEvent::RefreshSuccess));
        assert!(other.try_recv().is_none());
    }

    #[tokio::test]
    async fn stream_ends_when_sink_dropped() {
        let (sink, events) = EventSink::new(8);
        sink.dispatch(&GetUserChange::Error(UserError::ServerError).into())
            .await;
        drop(sink);

        let collected: Vec<_> = events.into_stream().collect().await;
        assert_eq!(collected, vec![SingleEvent::GetUsersError(UserError::ServerError)]);
    }

    #[tokio::test]
    async fn dispatch_after_stream_dropped_is_ignored() {
        let (sink, events) = EventSink::new(1);
        drop(events);
        sink.dispatch(&RefreshChange::Success.into()).await;
    }
}
