//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The signed-in identity lives in four cookie-session keys: `UserEmail`,
//! `UserRole`, `UserId` and `UserName`. Handlers go through
//! [`SessionContext`] instead of touching the keys directly.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{Error, Role, User, UserId};

pub(crate) const USER_EMAIL_KEY: &str = "UserEmail";
pub(crate) const USER_ROLE_KEY: &str = "UserRole";
pub(crate) const USER_ID_KEY: &str = "UserId";
pub(crate) const USER_NAME_KEY: &str = "UserName";

/// Identity recovered from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    /// Account row, from `UserId`.
    pub id: UserId,
    /// Normalised login email, from `UserEmail`.
    pub email: String,
    /// Role at login or last sign-up, from `UserRole`.
    pub role: Role,
    /// Display name, from `UserName`.
    pub name: String,
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Start a fresh session for `user`.
    ///
    /// The session is renewed first so an identifier chosen before login is
    /// never carried over.
    pub fn sign_in(&self, user: &User) -> Result<(), Error> {
        self.0.renew();
        self.insert(USER_EMAIL_KEY, user.email.as_ref())?;
        self.insert(USER_ROLE_KEY, user.role.as_str())?;
        self.insert(USER_ID_KEY, user.id.get())?;
        self.insert(USER_NAME_KEY, user.full_name.as_str())
    }

    /// Replace the stored role after it changed server-side.
    pub fn set_role(&self, role: Role) -> Result<(), Error> {
        self.insert(USER_ROLE_KEY, role.as_str())
    }

    /// Drop every key and expire the cookie.
    pub fn sign_out(&self) {
        self.0.purge();
    }

    /// The signed-in user, if the session carries a complete identity.
    ///
    /// Missing or tampered values yield `None`.
    pub fn identity(&self) -> Option<SessionUser> {
        let id = self.read::<i32>(USER_ID_KEY)?;
        let email = self.read::<String>(USER_EMAIL_KEY)?;
        let raw_role = self.read::<String>(USER_ROLE_KEY)?;
        let role = match raw_role.parse::<Role>() {
            Ok(role) => role,
            Err(error) => {
                warn!(%error, "invalid role in session cookie");
                return None;
            }
        };
        let name = self.read::<String>(USER_NAME_KEY).unwrap_or_default();
        Some(SessionUser {
            id: UserId::new(id),
            email,
            role,
            name,
        })
    }

    fn insert<T: Serialize>(&self, key: &str, value: T) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.0.get::<T>(key) {
            Ok(value) => value,
            Err(error) => {
                warn!(key, %error, "unreadable value in session cookie");
                None
            }
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
