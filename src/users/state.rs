//! State for the user list screen.

use crate::domain::{Gender, User, UserError};
use crate::mvi::UiState;

/// Presentation projection of a domain [`User`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserItem {
    pub id: String,
    pub email: String,
    pub avatar: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Gender,
}

impl UserItem {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Convert back to the domain entity, e.g. before a removal.
    pub fn to_domain(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            avatar: self.avatar.clone(),
            gender: self.gender,
        }
    }
}

impl From<User> for UserItem {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            avatar: user.avatar,
            first_name: user.first_name,
            last_name: user.last_name,
            gender: user.gender,
        }
    }
}

/// Current state of the user list screen.
///
/// Replaced as a whole on every reduction. `users` only changes when a
/// fresh list arrives from the GetUsers query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ViewState {
    pub users: Vec<UserItem>,
    pub is_loading: bool,
    pub error: Option<UserError>,
}

impl UiState for ViewState {}

impl ViewState {
    /// Empty list, not loading, no error.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Whether a refresh may start from this state.
    pub fn can_refresh(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }

    /// Whether a retry may start from this state.
    pub fn can_retry(&self) -> bool {
        self.error.is_some()
    }
}
