//! Intent bus: multicast, bounded, non-blocking submission.
//!
//! Every subscriber owns a bounded queue. An intent is accepted only if
//! every live subscriber has room for it; otherwise it is dropped for all
//! of them, so subscribers never disagree on which intents exist.
//!
//! Overflow drops the new intent. Under a burst this loses user actions;
//! [`IntentBus::try_submit`] reports it through [`SubmitOutcome`].

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mvi::Intent;

/// Default number of intents buffered per subscriber.
pub const DEFAULT_INTENT_BUFFER: usize = 64;

/// Result of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Buffered for every live subscriber.
    Delivered { subscribers: usize },
    /// At least one subscriber buffer was full; the intent was discarded.
    Dropped,
    /// Nobody is listening; the intent was discarded.
    NoSubscribers,
}

pub struct IntentBus<I> {
    subscribers: Arc<Mutex<Vec<mpsc::Sender<I>>>>,
    capacity: usize,
}

impl<I> Clone for IntentBus<I> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
            capacity: self.capacity,
        }
    }
}

impl<I: Intent> IntentBus<I> {
    /// Create a bus whose subscribers each buffer up to `capacity` intents.
    pub fn new(capacity: usize) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
            capacity: capacity.max(1),
        }
    }

    /// Register a new subscriber. It sees intents submitted from now on.
    pub fn subscribe(&self) -> IntentSubscription<I> {
        let (sender, receiver) = mpsc::channel(self.capacity);
        self.subscribers.lock().push(sender);
        IntentSubscription { receiver }
    }

    /// Submit an intent, discarding it silently if it cannot be buffered.
    pub fn submit(&self, intent: I) {
        let _ = self.try_submit(intent);
    }

    /// Submit an intent and report what happened to it. Never blocks.
    pub fn try_submit(&self, intent: I) -> SubmitOutcome {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| !sender.is_closed());

        if subscribers.is_empty() {
            tracing::trace!(intent = ?intent, "Intent discarded (no subscribers)");
            return SubmitOutcome::NoSubscribers;
        }

        // Only this lock holder sends, so capacity can only grow until we do.
        if subscribers.iter().any(|sender| sender.capacity() == 0) {
            tracing::warn!(intent = ?intent, "Intent dropped (buffer full)");
            return SubmitOutcome::Dropped;
        }

        for sender in subscribers.iter() {
            if sender.try_send(intent.clone()).is_err() {
                tracing::trace!("Intent subscriber went away during submit");
            }
        }

        SubmitOutcome::Delivered {
            subscribers: subscribers.len(),
        }
    }

    /// Number of live subscribers.
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.subscribers.lock();
        subscribers.retain(|sender| !sender.is_closed());
        subscribers.len()
    }
}

/// One subscriber's view of the bus.
pub struct IntentSubscription<I> {
    receiver: mpsc::Receiver<I>,
}

impl<I> Stream for IntentSubscription<I> {
    type Item = I;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.receiver.poll_recv(cx)
    }
}
