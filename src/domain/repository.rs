//! Async collaborator contract for the user list feature.

use async_trait::async_trait;
use futures::stream::BoxStream;

use super::error::UserError;
use super::user::User;

/// Stream returned by [`UserRepository::get_users`].
pub type UsersStream = BoxStream<'static, Result<Vec<User>, UserError>>;

/// Data layer consumed by the user list store.
///
/// Implementations own networking, caching and persistence. The store only
/// relies on the shapes below.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Observe the user list.
    ///
    /// The stream may emit repeatedly over its lifetime (live updates).
    /// Every call returns an independent, cold subscription.
    fn get_users(&self) -> UsersStream;

    /// Refresh the user list from its source. Resolves exactly once.
    async fn refresh(&self) -> Result<(), UserError>;

    /// Remove a single user. Resolves exactly once.
    async fn remove(&self, user: User) -> Result<(), UserError>;
}
