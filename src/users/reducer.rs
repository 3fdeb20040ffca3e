//! Reducer for the user list screen.

use crate::mvi::Reducer;

use super::change::{GetUserChange, PartialChange, RefreshChange};
use super::state::ViewState;

/// Reducer for user list state transitions.
///
/// Pure function. Removal outcomes leave state untouched: they only
/// exist to drive one-shot events.
pub struct UserListReducer;

impl Reducer for UserListReducer {
    type State = ViewState;
    type Change = PartialChange;

    fn reduce(state: Self::State, change: Self::Change) -> Self::State {
        match change {
            PartialChange::GetUser(change) => match change {
                GetUserChange::Loading => ViewState {
                    is_loading: true,
                    ..state
                },
                GetUserChange::Data(users) => ViewState {
                    users,
                    is_loading: false,
                    error: None,
                },
                GetUserChange::Error(error) => ViewState {
                    is_loading: false,
                    error: Some(error),
                    ..state
                },
            },

            PartialChange::Refresh(change) => match change {
                RefreshChange::Loading => ViewState {
                    is_loading: true,
                    ..state
                },
                // Users unchanged; the live query re-emits a fresh list separately.
                RefreshChange::Success => ViewState {
                    is_loading: false,
                    ..state
                },
                RefreshChange::Failure(error) => ViewState {
                    is_loading: false,
                    error: Some(error),
                    ..state
                },
            },

            PartialChange::RemoveUser(_) => state,
        }
    }
}
