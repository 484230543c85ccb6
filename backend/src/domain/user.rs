//! User accounts and roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PasswordDigest;
use super::validation::{Constraint, FieldErrors, FieldRule, validate};

const REGISTER_RULES: &[FieldRule] = &[
    FieldRule::new("FullName", Constraint::Required, "Full name is required."),
    FieldRule::new(
        "FullName",
        Constraint::MaxLength(100),
        "Full name must be at most 100 characters.",
    ),
    FieldRule::new("Email", Constraint::Required, "Email is required."),
    FieldRule::new("Email", Constraint::Email, "Email is not a valid email address."),
    FieldRule::new(
        "Email",
        Constraint::MaxLength(254),
        "Email must be at most 254 characters.",
    ),
    FieldRule::new("Password", Constraint::Required, "Password is required."),
    FieldRule::new(
        "Password",
        Constraint::MinLength(6),
        "Password must be at least 6 characters.",
    ),
];

/// Database identifier of a user row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i32);

impl UserId {
    /// Wrap a raw row identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw row identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address.
///
/// ## Invariants
/// - Trimmed and lower-cased, so equality is case-insensitive.
/// - Syntactically an email address.
///
/// # Examples
/// ```
/// use reliefdesk::domain::Email;
///
/// let email = Email::parse("  Ada@Example.ORG ").expect("valid email");
/// assert_eq!(email.as_ref(), "ada@example.org");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Email(String);

/// Error returned when an email address is malformed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("email address is not valid")]
pub struct InvalidEmail;

impl Email {
    /// Normalise and validate raw input.
    pub fn parse(raw: &str) -> Result<Self, InvalidEmail> {
        let normalised = raw.trim().to_lowercase();
        if super::validation::is_email(&normalised) {
            Ok(Self(normalised))
        } else {
            Err(InvalidEmail)
        }
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Account role gating dashboards and admin actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Regular reporter.
    User,
    /// Registered volunteer.
    Volunteer,
    /// Administrator.
    Admin,
}

/// Error returned when a role string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl Role {
    /// Stored and session representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Volunteer => "Volunteer",
            Self::Admin => "Admin",
        }
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "User" => Ok(Self::User),
            "Volunteer" => Ok(Self::Volunteer),
            "Admin" => Ok(Self::Admin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored user account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Row identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Unique login email.
    pub email: Email,
    /// Stored password digest.
    pub password_digest: PasswordDigest,
    /// Account role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Fields required to insert a user row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name.
    pub full_name: String,
    /// Unique login email.
    pub email: Email,
    /// Password digest to store.
    pub password_digest: PasswordDigest,
    /// Account role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl NewUser {
    /// Attach the identifier assigned by the store.
    pub fn into_user(self, id: UserId) -> User {
        User {
            id,
            full_name: self.full_name,
            email: self.email,
            password_digest: self.password_digest,
            role: self.role,
            created_at: self.created_at,
        }
    }
}

/// Account projection without credentials, safe to render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    /// Row identifier.
    pub id: UserId,
    /// Display name.
    pub full_name: String,
    /// Login email.
    pub email: Email,
    /// Account role.
    pub role: Role,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            full_name: user.full_name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Raw registration submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterRequest {
    /// Submitted `FullName`.
    pub full_name: String,
    /// Submitted `Email`.
    pub email: String,
    /// Submitted `Password`.
    pub password: String,
    /// Submitted `ConfirmPassword`; checked only when present.
    pub confirm_password: String,
}

impl RegisterRequest {
    /// Apply the registration rule table and build a `User`-role account.
    ///
    /// The plaintext password is digested here and never leaves this call.
    pub fn into_new_user(self, created_at: DateTime<Utc>) -> Result<NewUser, FieldErrors> {
        let mut errors = validate(REGISTER_RULES, |field| match field {
            "FullName" => Some(self.full_name.as_str()),
            "Email" => Some(self.email.as_str()),
            "Password" => Some(self.password.as_str()),
            _ => None,
        });
        if !self.confirm_password.is_empty() && self.confirm_password != self.password {
            errors.add("ConfirmPassword", "Passwords do not match.");
        }
        let email = match Email::parse(&self.email) {
            Ok(email) if errors.is_empty() => email,
            _ => return Err(errors),
        };

        Ok(NewUser {
            full_name: self.full_name.trim().to_owned(),
            email,
            password_digest: PasswordDigest::of(&self.password),
            role: Role::User,
            created_at,
        })
    }
}
