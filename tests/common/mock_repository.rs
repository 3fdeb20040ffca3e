//! Scripted user repository: every async result is completed by the test.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::channel::{mpsc, oneshot};
use futures::StreamExt;
use parking_lot::Mutex;

use userflow::domain::{User, UserError, UserRepository, UsersStream};

type UsersResult = Result<Vec<User>, UserError>;

#[derive(Default)]
pub struct MockRepository {
    fetches: AtomicUsize,
    queries: Mutex<Vec<mpsc::UnboundedSender<UsersResult>>>,
    refreshes: AtomicUsize,
    pending_refreshes: Mutex<VecDeque<oneshot::Sender<Result<(), UserError>>>>,
    pending_removals: Mutex<HashMap<String, oneshot::Sender<Result<(), UserError>>>>,
    panicking_removals: Mutex<HashSet<String>>,
}

impl MockRepository {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of GetUsers subscriptions made so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    /// Emit on the most recent GetUsers subscription.
    pub fn emit_users(&self, result: UsersResult) -> bool {
        self.queries
            .lock()
            .last()
            .map(|sender| sender.unbounded_send(result).is_ok())
            .unwrap_or(false)
    }

    pub fn refresh_count(&self) -> usize {
        self.refreshes.load(Ordering::SeqCst)
    }

    /// Complete the oldest pending refresh.
    pub fn complete_refresh(&self, result: Result<(), UserError>) -> bool {
        match self.pending_refreshes.lock().pop_front() {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }

    /// Ids of removals waiting for completion.
    pub fn pending_removals(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.pending_removals.lock().keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn complete_remove(&self, id: &str, result: Result<(), UserError>) -> bool {
        match self.pending_removals.lock().remove(id) {
            Some(sender) => sender.send(result).is_ok(),
            None => false,
        }
    }

    /// Make the next removal of `id` panic inside the pipeline.
    pub fn panic_on_remove(&self, id: &str) {
        self.panicking_removals.lock().insert(id.to_string());
    }
}

#[async_trait]
impl UserRepository for MockRepository {
    fn get_users(&self) -> UsersStream {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = mpsc::unbounded();
        self.queries.lock().push(sender);
        receiver.boxed()
    }

    async fn refresh(&self) -> Result<(), UserError> {
        self.refreshes.fetch_add(1, Ordering::SeqCst);
        let (sender, receiver) = oneshot::channel();
        self.pending_refreshes.lock().push_back(sender);
        receiver.await.unwrap_or(Err(UserError::ServerError))
    }

    async fn remove(&self, user: User) -> Result<(), UserError> {
        if self.panicking_removals.lock().remove(&user.id) {
            panic!("remove exploded for {}", user.id);
        }
        let (sender, receiver) = oneshot::channel();
        self.pending_removals.lock().insert(user.id, sender);
        receiver.await.unwrap_or(Err(UserError::ServerError))
    }
}
