//! Authentication primitives such as login credentials.
//!
//! Handlers build [`LoginCredentials`] from raw form values; the constructor
//! applies the login rule table so blank fields are reported per field.

use zeroize::Zeroizing;

use super::validation::{Constraint, FieldErrors, FieldRule, validate};

const LOGIN_RULES: &[FieldRule] = &[
    FieldRule::new("Email", Constraint::Required, "Email is required."),
    FieldRule::new("Password", Constraint::Required, "Password is required."),
];

/// Validated login credentials used by the login service.
///
/// ## Invariants
/// - `email` is trimmed, lower-cased, and non-empty. It is not checked for
///   email syntax; an address that cannot exist simply fails to match.
/// - `password` is non-blank and keeps caller-provided whitespace.
///
/// # Examples
/// ```
/// use reliefdesk::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" Ada@Example.org ", "pw").unwrap();
/// assert_eq!(creds.email(), "ada@example.org");
/// assert_eq!(creds.password(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw form inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, FieldErrors> {
        let errors = validate(LOGIN_RULES, |field| match field {
            "Email" => Some(email),
            "Password" => Some(password),
            _ => None,
        });
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(Self {
            email: email.trim().to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the account lookup.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Password provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", "Email")]
    #[case("   ", "pw", "Email")]
    #[case("ada@example.org", "", "Password")]
    #[case("ada@example.org", "  ", "Password")]
    fn blank_fields_are_reported(
        #[case] email: &str,
        #[case] password: &str,
        #[case] field: &str,
    ) {
        let errors = LoginCredentials::try_from_parts(email, password)
            .expect_err("blank inputs must fail");
        assert!(errors.contains(field));
    }

    #[rstest]
    fn both_blank_fields_are_reported_together() {
        let errors = LoginCredentials::try_from_parts("", "").expect_err("blank inputs");
        assert!(errors.contains("Email"));
        assert!(errors.contains("Password"));
    }

    #[rstest]
    fn password_whitespace_is_preserved() {
        let creds = LoginCredentials::try_from_parts("a@b.org", " pad ").expect("valid");
        assert_eq!(creds.password(), " pad ");
    }
}
