//! Model-View-Intent (MVI) architecture primitives.
//!
//! This module provides base traits for implementing unidirectional
//! data flow between a UI boundary and a reactive store.
//!
//! # Architecture
//!
//! ```text
//! Intent ──→ async work ──→ Change ──→ Reducer ──→ State ──→ View
//!    ↑                         │                              │
//!    │                         └──→ one-shot events ──────────┤
//!    └────────────────────────────────────────────────────────┘
//! ```
//!
//! - **State**: Immutable representation of UI state
//! - **Intent**: User actions submitted by the view
//! - **Change**: Data-only instruction derived from an intent's async outcome
//! - **Reducer**: Pure function that folds changes into state

mod change;
mod intent;
mod reducer;
mod state;

pub use change::Change;
pub use intent::Intent;
pub use reducer::Reducer;
pub use state::UiState;
