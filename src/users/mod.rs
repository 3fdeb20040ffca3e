//! User list feature module.
//!
//! # Architecture
//!
//! Uses MVI (Model-View-Intent) pattern:
//! - `intent.rs` - User actions (Initial, Refresh, Retry, RemoveUser)
//! - `change.rs` - Partial changes derived from async outcomes
//! - `state.rs` - View state and the `UserItem` projection
//! - `reducer.rs` - State transitions (pure, no side effects)
//! - `event.rs` - One-shot events and their sink
//! - `derivation.rs` - Per-intent branches with their concurrency policy
//! - `store.rs` - Lifecycle-scoped store wiring it all together

mod change;
mod derivation;
mod error;
mod event;
mod intent;
mod reducer;
mod state;
mod store;

pub use change::{GetUserChange, PartialChange, RefreshChange, RemoveUserChange};
pub use derivation::{Branch, UserListDerivation};
pub use error::{LifecycleError, PipelineError, PipelineErrors};
pub use event::{EventSink, EventStream, SingleEvent};
pub use intent::ViewIntent;
pub use reducer::UserListReducer;
pub use state::{UserItem, ViewState};
pub use store::UserListStore;
