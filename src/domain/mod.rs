//! Domain entities and the async collaborator contract consumed by the store.

mod error;
mod repository;
mod user;

pub use error::UserError;
pub use repository::{UserRepository, UsersStream};
pub use user::{Gender, User};
