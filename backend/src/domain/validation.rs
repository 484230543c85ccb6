//! Declarative validation for submitted forms.
//!
//! Each form is described by a static table of [`FieldRule`] rows: the field
//! name as it appears on the wire, the [`Constraint`] to check, and the
//! message shown next to the field when the check fails. [`validate`] runs
//! every row and collects failures into [`FieldErrors`].

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::error;

use super::{Error, ErrorCode};

/// A single check applied to a submitted field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constraint {
    /// Value must be present and non-blank.
    Required,
    /// Value, when present, must look like an email address.
    Email,
    /// Value, when present, must have at least this many characters.
    MinLength(usize),
    /// Value, when present, must have at most this many characters.
    MaxLength(usize),
    /// Value, when present, must parse as a 32-bit signed integer.
    Integer,
    /// Value, when present and numeric, must be zero or greater.
    NonNegative,
    /// Value, when present, must be one of the listed options.
    OneOf(&'static [&'static str]),
}

/// One row of a validation table.
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    /// Wire name of the field, e.g. `Email`.
    pub field: &'static str,
    /// Check applied to the value.
    pub constraint: Constraint,
    /// Message reported when the check fails.
    pub message: &'static str,
}

impl FieldRule {
    /// Build a rule row.
    pub const fn new(field: &'static str, constraint: Constraint, message: &'static str) -> Self {
        Self {
            field,
            constraint,
            message,
        }
    }
}

/// Field-level validation failures keyed by wire field name.
///
/// # Examples
/// ```
/// use reliefdesk::domain::FieldErrors;
///
/// let mut errors = FieldErrors::default();
/// errors.add("Email", "Email is already registered.");
/// assert!(errors.contains("Email"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    /// Record a failure against `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Build a single-field failure.
    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::default();
        errors.add(field, message);
        errors
    }

    /// Whether no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether `field` has at least one failure.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Messages recorded against `field`.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Recover field annotations from a validation [`Error`].
    ///
    /// Returns `None` for any other error, including `InvalidRequest` errors
    /// that carry no field details.
    pub fn from_error(error: &Error) -> Option<Self> {
        if error.code() != ErrorCode::InvalidRequest {
            return None;
        }
        let fields = error.details()?.get("fields")?;
        serde_json::from_value(fields.clone()).ok()
    }

    /// Convert into `Ok(())` when empty, otherwise a validation [`Error`].
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl From<FieldErrors> for Error {
    fn from(errors: FieldErrors) -> Self {
        Error::invalid_request("submission failed validation").with_details(json!({
            "fields": errors,
        }))
    }
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn email_regex() -> Option<&'static Regex> {
    EMAIL_RE
        .get_or_init(|| {
            Regex::new(EMAIL_PATTERN)
                .inspect_err(|error| error!(%error, "email regex failed to compile"))
                .ok()
        })
        .as_ref()
}

/// Whether `value` looks like an email address.
///
/// Rejects everything if the pattern cannot be compiled.
pub fn is_email(value: &str) -> bool {
    email_regex().is_some_and(|re| re.is_match(value.trim()))
}

fn satisfies(constraint: Constraint, value: Option<&str>) -> bool {
    let present = value.map(str::trim).filter(|v| !v.is_empty());
    match (constraint, present) {
        (Constraint::Required, found) => found.is_some(),
        (_, None) => true,
        (Constraint::Email, Some(v)) => is_email(v),
        (Constraint::MinLength(min), Some(v)) => v.chars().count() >= min,
        (Constraint::MaxLength(max), Some(v)) => v.chars().count() <= max,
        (Constraint::Integer, Some(v)) => v.parse::<i32>().is_ok(),
        (Constraint::NonNegative, Some(v)) => v.parse::<i64>().map_or(true, |n| n >= 0),
        (Constraint::OneOf(options), Some(v)) => options.iter().any(|o| o.eq_ignore_ascii_case(v)),
    }
}

/// Run every rule in `rules` against values provided by `lookup`.
///
/// All failing rows are reported, so a form with several bad fields shows
/// every annotation at once.
pub fn validate<'a, F>(rules: &[FieldRule], lookup: F) -> FieldErrors
where
    F: Fn(&str) -> Option<&'a str>,
{
    let mut errors = FieldErrors::default();
    for rule in rules {
        if !satisfies(rule.constraint, lookup(rule.field)) {
            errors.add(rule.field, rule.message);
        }
    }
    errors
}

/// Treat blank strings as absent.
pub(crate) fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
