//! Account registration and login.
//!
//! [`AccountService`] implements both [`RegistrationService`] and
//! [`LoginService`] over a [`UserRepository`]. Duplicate emails are reported
//! as a field annotation on `Email`, whether caught by the lookup or by the
//! store's unique constraint during a concurrent insert.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{LoginService, RegistrationService, UserRepository, UserRepositoryError};
use crate::domain::repository_errors::map_user_error;
use crate::domain::{
    Email, Error, FieldErrors, LoginCredentials, RegisterRequest, Role, User,
};

/// Message shown on the login view for any credential mismatch.
pub const INVALID_CREDENTIALS: &str = "Invalid email or password.";

const DUPLICATE_EMAIL: &str = "Email is already registered.";

/// Account service implementing registration and authentication.
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    clock: Arc<dyn Clock>,
}

impl AccountService {
    /// Create a new service over the given repository.
    pub fn new(users: Arc<dyn UserRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { users, clock }
    }

    /// Make sure an administrator account exists for `request.email`.
    ///
    /// Creates the account with role `Admin` when absent; an existing account
    /// with that email is promoted and its password left untouched.
    pub async fn ensure_admin(&self, request: RegisterRequest) -> Result<User, Error> {
        let mut new_user = request.into_new_user(self.clock.utc())?;
        new_user.role = Role::Admin;

        if let Some(mut existing) = self
            .users
            .find_by_email(&new_user.email)
            .await
            .map_err(map_user_error)?
        {
            if existing.role != Role::Admin {
                self.users
                    .update_role(existing.id, Role::Admin)
                    .await
                    .map_err(map_user_error)?;
                existing.role = Role::Admin;
                info!(user_id = %existing.id, "promoted existing account to admin");
            }
            return Ok(existing);
        }

        let admin = self.users.insert(&new_user).await.map_err(map_user_error)?;
        info!(user_id = %admin.id, "bootstrapped admin account");
        Ok(admin)
    }

    fn duplicate_email() -> Error {
        FieldErrors::single("Email", DUPLICATE_EMAIL).into()
    }
}

#[async_trait]
impl RegistrationService for AccountService {
    async fn register(&self, request: RegisterRequest) -> Result<User, Error> {
        let new_user = request.into_new_user(self.clock.utc())?;

        if self
            .users
            .find_by_email(&new_user.email)
            .await
            .map_err(map_user_error)?
            .is_some()
        {
            return Err(Self::duplicate_email());
        }

        match self.users.insert(&new_user).await {
            Ok(user) => {
                info!(user_id = %user.id, "registered account");
                Ok(user)
            }
            Err(UserRepositoryError::DuplicateEmail { .. }) => Err(Self::duplicate_email()),
            Err(error) => Err(map_user_error(error)),
        }
    }
}

#[async_trait]
impl LoginService for AccountService {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Ok(email) = Email::parse(credentials.email()) else {
            warn!("rejected login with malformed email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let user = self
            .users
            .find_by_email(&email)
            .await
            .map_err(map_user_error)?;
        match user {
            Some(user) if user.password_digest.matches(credentials.password()) => {
                info!(user_id = %user.id, role = %user.role, "login succeeded");
                Ok(user)
            }
            _ => {
                warn!("rejected login");
                Err(Error::unauthorized(INVALID_CREDENTIALS))
            }
        }
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
