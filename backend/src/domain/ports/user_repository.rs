//! Port for user account persistence.

use async_trait::async_trait;

use crate::domain::{Email, NewUser, Role, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected an insert.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// Port for reading and writing user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and return it with its assigned id.
    ///
    /// Fails with [`UserRepositoryError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError>;

    /// Fetch a user by normalised email.
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch a user by id.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Change a user's role.
    async fn update_role(&self, id: UserId, role: Role) -> Result<(), UserRepositoryError>;

    /// Every user, ordered by id.
    async fn list_all(&self) -> Result<Vec<User>, UserRepositoryError>;
}
