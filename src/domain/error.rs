use thiserror::Error;

/// Failures returned by the user data layer.
///
/// These are domain errors: the store never propagates them as failures.
/// They are folded into state and surfaced as one-shot events instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    #[error("Network error")]
    NetworkError,

    #[error("Server error")]
    ServerError,

    #[error("User '{id}' not found")]
    UserNotFound { id: String },

    #[error("Invalid user id '{id}'")]
    InvalidId { id: String },
}
