//! State store: folds derived changes into the published view state.
//!
//! The store owns a small task tree on the tokio runtime:
//! - one task per derivation branch, forwarding changes into a bounded queue
//! - one fold task that raises events and applies the reducer in arrival order
//!
//! Panics inside any of them are caught here, logged, and recorded in
//! [`UserListStore::last_pipeline_error`]. A panic inside one repository
//! operation is caught by its branch and ends only that operation. The
//! state channel keeps its last good value.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::stream::{BoxStream, Stream, StreamExt};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use crate::bus::{IntentBus, IntentSubscription, SubmitOutcome};
use crate::config::PipelineConfig;
use crate::domain::UserRepository;
use crate::mvi::Reducer;

use super::change::PartialChange;
use super::derivation::{Branch, UserListDerivation};
use super::error::{panic_message, LifecycleError, PipelineError, PipelineErrors};
use super::event::{EventSink, EventStream};
use super::intent::ViewIntent;
use super::reducer::UserListReducer;
use super::state::ViewState;

/// Everything created by `new()` and consumed by `start()`.
struct Prepared {
    subscriptions: Vec<(Branch, IntentSubscription<ViewIntent>)>,
    derivation: UserListDerivation,
    state_tx: watch::Sender<ViewState>,
    event_sink: EventSink,
    change_buffer: usize,
}

enum Lifecycle {
    Created(Box<Prepared>),
    Running(Vec<JoinHandle<()>>),
    Disposed,
}

/// Reactive store for the user list screen.
///
/// Lifecycle: [`new`](Self::new) → [`start`](Self::start) →
/// [`dispose`](Self::dispose). Branches subscribe to the intent bus in
/// `new`, so intents submitted before `start` are buffered, not lost.
pub struct UserListStore {
    bus: IntentBus<ViewIntent>,
    state_rx: watch::Receiver<ViewState>,
    events: EventStream,
    errors: PipelineErrors,
    lifecycle: Mutex<Lifecycle>,
}

impl UserListStore {
    pub fn new(repository: Arc<dyn UserRepository>, config: &PipelineConfig) -> Self {
        let bus = IntentBus::new(config.intent_buffer);
        let (state_tx, state_rx) = watch::channel(ViewState::initial());
        let (event_sink, events) = EventSink::new(config.event_buffer.max(1));
        let errors = PipelineErrors::default();

        let prepared = Prepared {
            subscriptions: UserListDerivation::subscribe(&bus),
            derivation: UserListDerivation::new(repository, state_rx.clone(), errors.clone()),
            state_tx,
            event_sink,
            change_buffer: config.change_buffer.max(1),
        };

        Self {
            bus,
            state_rx,
            events,
            errors,
            lifecycle: Mutex::new(Lifecycle::Created(Box::new(prepared))),
        }
    }

    /// Spawn the pipeline on the current tokio runtime.
    pub fn start(&self) -> Result<(), LifecycleError> {
        let runtime =
            tokio::runtime::Handle::try_current().map_err(|_| LifecycleError::NoRuntime)?;

        let mut lifecycle = self.lifecycle.lock();
        let prepared = match std::mem::replace(&mut *lifecycle, Lifecycle::Disposed) {
            Lifecycle::Created(prepared) => prepared,
            Lifecycle::Running(tasks) => {
                *lifecycle = Lifecycle::Running(tasks);
                return Err(LifecycleError::AlreadyStarted);
            }
            Lifecycle::Disposed => return Err(LifecycleError::Disposed),
        };

        let Prepared {
            subscriptions,
            derivation,
            state_tx,
            event_sink,
            change_buffer,
        } = *prepared;

        let (change_tx, change_rx) = mpsc::channel(change_buffer);
        let mut tasks = Vec::with_capacity(subscriptions.len() + 1);

        for (branch, intents) in subscriptions {
            let changes = derivation.branch(branch, intents);
            tasks.push(runtime.spawn(run_branch(
                branch,
                changes,
                change_tx.clone(),
                self.errors.clone(),
            )));
        }
        drop(change_tx);

        tasks.push(runtime.spawn(fold_changes(
            change_rx,
            event_sink,
            state_tx,
            self.errors.clone(),
        )));

        *lifecycle = Lifecycle::Running(tasks);
        tracing::info!(branches = Branch::ALL.len(), "User list store started");
        Ok(())
    }

    /// Cancel every task. Idempotent.
    ///
    /// The last published state stays readable; no further updates follow.
    pub fn dispose(&self) {
        let mut lifecycle = self.lifecycle.lock();
        match std::mem::replace(&mut *lifecycle, Lifecycle::Disposed) {
            Lifecycle::Running(tasks) => {
                for task in &tasks {
                    task.abort();
                }
                tracing::info!("User list store disposed");
            }
            Lifecycle::Created(_) => {
                tracing::debug!("User list store disposed before start");
            }
            Lifecycle::Disposed => {}
        }
    }

    pub fn is_running(&self) -> bool {
        matches!(*self.lifecycle.lock(), Lifecycle::Running(_))
    }

    /// Submit an intent. Never blocks; dropped silently if the bus is full.
    pub fn submit(&self, intent: ViewIntent) {
        self.bus.submit(intent);
    }

    /// Submit an intent and report whether it was buffered.
    pub fn try_submit(&self, intent: ViewIntent) -> SubmitOutcome {
        self.bus.try_submit(intent)
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> ViewState {
        self.state_rx.borrow().clone()
    }

    /// Current state first, then every subsequent update.
    ///
    /// Intermediate values may be skipped by a slow consumer; the latest one
    /// is always delivered.
    pub fn state_stream(&self) -> impl Stream<Item = ViewState> + Send + 'static {
        let mut receiver = self.state_rx.clone();
        receiver.mark_changed();
        futures::stream::unfold(receiver, |mut receiver| async move {
            receiver.changed().await.ok()?;
            let state = receiver.borrow_and_update().clone();
            Some((state, receiver))
        })
    }

    /// One-shot events. Clones compete; nothing is replayed.
    pub fn events(&self) -> EventStream {
        self.events.clone()
    }

    /// Most recent pipeline error suppressed by the store, if any.
    pub fn last_pipeline_error(&self) -> Option<PipelineError> {
        self.errors.last()
    }
}

impl Drop for UserListStore {
    fn drop(&mut self) {
        self.dispose();
    }
}

async fn run_branch(
    branch: Branch,
    mut changes: BoxStream<'static, PartialChange>,
    sink: mpsc::Sender<PartialChange>,
    errors: PipelineErrors,
) {
    let forward = async move {
        while let Some(change) = changes.next().await {
            tracing::trace!(%branch, change = ?change, "Partial change");
            if sink.send(change).await.is_err() {
                break;
            }
        }
    };

    match AssertUnwindSafe(forward).catch_unwind().await {
        Ok(()) => tracing::debug!(%branch, "Branch completed"),
        Err(payload) => errors.record(PipelineError::BranchPanicked {
            branch: branch.name(),
            message: panic_message(payload.as_ref()),
        }),
    }
}

async fn fold_changes(
    mut changes: mpsc::Receiver<PartialChange>,
    events: EventSink,
    state: watch::Sender<ViewState>,
    errors: PipelineErrors,
) {
    let mut current = state.borrow().clone();

    while let Some(change) = changes.recv().await {
        events.dispatch(&change).await;

        let reduced = std::panic::catch_unwind(AssertUnwindSafe(|| {
            UserListReducer::reduce(current.clone(), change)
        }));

        match reduced {
            Ok(next) => {
                if next != current {
                    state.send_replace(next.clone());
                    current = next;
                }
            }
            Err(payload) => errors.record(PipelineError::ReducerPanicked {
                message: panic_message(payload.as_ref()),
            }),
        }
    }

    tracing::debug!("Change stream closed");
}
