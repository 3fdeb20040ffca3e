//! Partial changes produced by the derivation branches.

use crate::domain::UserError;
use crate::mvi::Change;

use super::state::UserItem;

/// Outcome of the GetUsers query.
#[derive(Debug, Clone, PartialEq)]
pub enum GetUserChange {
    Loading,
    Data(Vec<UserItem>),
    Error(UserError),
}

/// Outcome of the one-shot refresh operation.
#[derive(Debug, Clone, PartialEq)]
pub enum RefreshChange {
    Loading,
    Success,
    Failure(UserError),
}

/// Outcome of a single removal.
#[derive(Debug, Clone, PartialEq)]
pub enum RemoveUserChange {
    Success(UserItem),
    Failure { user: UserItem, error: UserError },
}

/// Instruction for the reducer, grouped by origin.
#[derive(Debug, Clone, PartialEq)]
pub enum PartialChange {
    GetUser(GetUserChange),
    Refresh(RefreshChange),
    RemoveUser(RemoveUserChange),
}

impl Change for PartialChange {}

impl From<GetUserChange> for PartialChange {
    fn from(change: GetUserChange) -> Self {
        PartialChange::GetUser(change)
    }
}

impl From<RefreshChange> for PartialChange {
    fn from(change: RefreshChange) -> Self {
        PartialChange::Refresh(change)
    }
}

impl From<RemoveUserChange> for PartialChange {
    fn from(change: RemoveUserChange) -> Self {
        PartialChange::RemoveUser(change)
    }
}
