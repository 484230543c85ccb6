//! Driving port for login/authentication use-cases.
//!
//! Inbound adapters call it to authenticate credentials without knowing the
//! backing store, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    ///
    /// Unknown emails and wrong passwords both fail with
    /// [`crate::domain::ErrorCode::Unauthorized`] and the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;
}
