//! Intents for the user list screen.

use crate::mvi::Intent;

use super::state::UserItem;

/// Intents that can be submitted by the user list view.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewIntent {
    /// Screen opened. Only the first occurrence is ever processed.
    Initial,

    /// Pull-to-refresh. Ignored while loading or while an error is shown.
    Refresh,

    /// Reload after an error. Ignored unless an error is shown.
    Retry,

    /// Remove a single user.
    RemoveUser(UserItem),
}

impl ViewIntent {
    /// Short tag used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ViewIntent::Initial => "initial",
            ViewIntent::Refresh => "refresh",
            ViewIntent::Retry => "retry",
            ViewIntent::RemoveUser(_) => "remove_user",
        }
    }
}

impl Intent for ViewIntent {}
