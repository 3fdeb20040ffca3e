//! Partial-change derivation: one branch per intent kind.
//!
//! ```text
//!             ┌─ Initial ─ take_first ─ flat_map_concat ─ GetUsers ──┐
//! IntentBus ──┼─ Refresh ─ guard ───── flat_map_first ── refresh ───┼──→ PartialChange
//!             ├─ Retry ─── guard ───── flat_map_first ── GetUsers ──┤
//!             └─ Remove ────────────── flat_map_merge ── remove ────┘
//! ```
//!
//! Guards read the store's current state at the moment an intent is
//! pulled from the bus. Each repository operation runs under its own
//! `catch_unwind`: a panic ends that operation only, its branch keeps
//! serving later intents.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::ready;
use futures::stream::{self, BoxStream, Stream, StreamExt};
use tokio::sync::watch;

use crate::bus::{IntentBus, IntentSubscription};
use crate::domain::UserRepository;
use crate::flow::{flat_map_concat, flat_map_first, flat_map_merge, take_first};

use super::change::{GetUserChange, PartialChange, RefreshChange, RemoveUserChange};
use super::error::{panic_message, PipelineError, PipelineErrors};
use super::intent::ViewIntent;
use super::state::{UserItem, ViewState};

/// Identifies a derivation branch in logs and pipeline errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Branch {
    Initial,
    Refresh,
    Retry,
    RemoveUser,
}

impl Branch {
    pub const ALL: [Branch; 4] = [
        Branch::Initial,
        Branch::Refresh,
        Branch::Retry,
        Branch::RemoveUser,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Branch::Initial => "initial",
            Branch::Refresh => "refresh",
            Branch::Retry => "retry",
            Branch::RemoveUser => "remove_user",
        }
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Builds the change stream of each branch.
#[derive(Clone)]
pub struct UserListDerivation {
    repository: Arc<dyn UserRepository>,
    state: watch::Receiver<ViewState>,
    errors: PipelineErrors,
}

impl UserListDerivation {
    pub fn new(
        repository: Arc<dyn UserRepository>,
        state: watch::Receiver<ViewState>,
        errors: PipelineErrors,
    ) -> Self {
        Self {
            repository,
            state,
            errors,
        }
    }

    /// Subscribe every branch to `bus`, ready to be turned into streams.
    pub fn subscribe(
        bus: &IntentBus<ViewIntent>,
    ) -> Vec<(Branch, IntentSubscription<ViewIntent>)> {
        Branch::ALL
            .into_iter()
            .map(|branch| (branch, bus.subscribe()))
            .collect()
    }

    /// Change stream for `branch`, reading intents from `intents`.
    pub fn branch<S>(&self, branch: Branch, intents: S) -> BoxStream<'static, PartialChange>
    where
        S: Stream<Item = ViewIntent> + Send + 'static,
    {
        match branch {
            Branch::Initial => self.initial(intents),
            Branch::Refresh => self.refresh(intents),
            Branch::Retry => self.retry(intents),
            Branch::RemoveUser => self.remove_user(intents),
        }
    }

    /// Only the first `Initial` is processed; later ones never reach the query.
    pub fn initial<S>(&self, intents: S) -> BoxStream<'static, PartialChange>
    where
        S: Stream<Item = ViewIntent> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let errors = self.errors.clone();
        let intents =
            take_first(intents.filter(|intent| ready(matches!(intent, ViewIntent::Initial))))
                .inspect(log_intent);

        flat_map_concat(intents, move |_| {
            contained(
                Branch::Initial,
                get_user_changes(Arc::clone(&repository)),
                errors.clone(),
            )
        })
        .boxed()
    }

    /// Refresh only from an idle, error-free state; ignored while in flight.
    pub fn refresh<S>(&self, intents: S) -> BoxStream<'static, PartialChange>
    where
        S: Stream<Item = ViewIntent> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let state = self.state.clone();
        let intents = intents
            .filter(move |intent| {
                ready(
                    matches!(intent, ViewIntent::Refresh)
                        && guard(&state, Branch::Refresh, ViewState::can_refresh),
                )
            })
            .inspect(log_intent);

        let errors = self.errors.clone();
        flat_map_first(intents, move |_| {
            contained(
                Branch::Refresh,
                refresh_changes(Arc::clone(&repository)),
                errors.clone(),
            )
        })
        .boxed()
    }

    /// Re-run the query only while an error is shown; ignored while in flight.
    pub fn retry<S>(&self, intents: S) -> BoxStream<'static, PartialChange>
    where
        S: Stream<Item = ViewIntent> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let state = self.state.clone();
        let intents = intents
            .filter(move |intent| {
                ready(
                    matches!(intent, ViewIntent::Retry)
                        && guard(&state, Branch::Retry, ViewState::can_retry),
                )
            })
            .inspect(log_intent);

        let errors = self.errors.clone();
        flat_map_first(intents, move |_| {
            contained(
                Branch::Retry,
                get_user_changes(Arc::clone(&repository)),
                errors.clone(),
            )
        })
        .boxed()
    }

    /// Every removal runs independently; outcomes arrive in completion order.
    pub fn remove_user<S>(&self, intents: S) -> BoxStream<'static, PartialChange>
    where
        S: Stream<Item = ViewIntent> + Send + 'static,
    {
        let repository = Arc::clone(&self.repository);
        let users = intents
            .inspect(|intent| {
                if matches!(intent, ViewIntent::RemoveUser(_)) {
                    log_intent(intent);
                }
            })
            .filter_map(|intent| {
                ready(match intent {
                    ViewIntent::RemoveUser(user) => Some(user),
                    _ => None,
                })
            });

        let errors = self.errors.clone();
        flat_map_merge(users, move |user| {
            contained(
                Branch::RemoveUser,
                remove_changes(Arc::clone(&repository), user),
                errors.clone(),
            )
        })
        .boxed()
    }
}

fn guard(
    state: &watch::Receiver<ViewState>,
    branch: Branch,
    allowed: fn(&ViewState) -> bool,
) -> bool {
    let pass = allowed(&state.borrow());
    if !pass {
        tracing::debug!(%branch, "Intent ignored by state guard");
    }
    pass
}

/// Ends `changes` at its first panic, recording it instead of unwinding
/// through the branch.
fn contained(
    branch: Branch,
    changes: BoxStream<'static, PartialChange>,
    errors: PipelineErrors,
) -> BoxStream<'static, PartialChange> {
    AssertUnwindSafe(changes)
        .catch_unwind()
        .filter_map(move |outcome| {
            ready(match outcome {
                Ok(change) => Some(change),
                Err(payload) => {
                    errors.record(PipelineError::OperationPanicked {
                        branch: branch.name(),
                        message: panic_message(payload.as_ref()),
                    });
                    None
                }
            })
        })
        .boxed()
}

fn log_intent(intent: &ViewIntent) {
    tracing::debug!(kind = intent.kind(), intent = ?intent, "Intent");
}

/// `Loading`, then one change per query emission.
///
/// The query is subscribed lazily, on first poll, so each trigger gets a
/// fresh subscription.
fn get_user_changes(repository: Arc<dyn UserRepository>) -> BoxStream<'static, PartialChange> {
    let results = stream::once(async move { repository.get_users() })
        .flatten()
        .inspect(|result| {
            tracing::debug!(users = ?result.as_ref().map(Vec::len), "GetUsers emitted");
        })
        .map(|result| {
            let change = match result {
                Ok(users) => {
                    GetUserChange::Data(users.into_iter().map(UserItem::from).collect())
                }
                Err(error) => GetUserChange::Error(error),
            };
            PartialChange::from(change)
        });

    stream::once(ready(PartialChange::from(GetUserChange::Loading)))
        .chain(results)
        .boxed()
}

fn refresh_changes(repository: Arc<dyn UserRepository>) -> BoxStream<'static, PartialChange> {
    let result = stream::once(async move {
        let change = match repository.refresh().await {
            Ok(()) => RefreshChange::Success,
            Err(error) => RefreshChange::Failure(error),
        };
        PartialChange::from(change)
    });

    stream::once(ready(PartialChange::from(RefreshChange::Loading)))
        .chain(result)
        .boxed()
}

fn remove_changes(
    repository: Arc<dyn UserRepository>,
    user: UserItem,
) -> BoxStream<'static, PartialChange> {
    stream::once(async move {
        let change = match repository.remove(user.to_domain()).await {
            Ok(()) => RemoveUserChange::Success(user),
            Err(error) => RemoveUserChange::Failure { user, error },
        };
        PartialChange::from(change)
    })
    .boxed()
}
