//! Reducer trait for MVI architecture.

use super::change::Change;
use super::state::UiState;

/// Reducer transforms state based on partial changes.
///
/// The reducer is the only place where state transitions happen.
/// It must be a pure, total function: (State, Change) -> State
pub trait Reducer {
    /// The state type this reducer operates on.
    type State: UiState;

    /// The change type this reducer handles.
    type Change: Change;

    /// Apply a change and return the new state.
    ///
    /// This should be a pure function with no side effects.
    fn reduce(state: Self::State, change: Self::Change) -> Self::State;
}
