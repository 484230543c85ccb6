//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, RegisterRequest, User};

/// Domain use-case port for creating accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Validate the submission and create a `User`-role account.
    ///
    /// # Errors
    ///
    /// Validation failures, including an email that is already registered,
    /// are `InvalidRequest` errors carrying field annotations.
    async fn register(&self, request: RegisterRequest) -> Result<User, Error>;
}
