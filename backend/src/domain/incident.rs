//! Incident reports filed by signed-in users.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::UserId;
use super::validation::{Constraint, FieldErrors, FieldRule, validate};

const INCIDENT_RULES: &[FieldRule] = &[
    FieldRule::new("Title", Constraint::Required, "Title is required."),
    FieldRule::new("Title", Constraint::MaxLength(200), "Title must be at most 200 characters."),
    FieldRule::new("Description", Constraint::Required, "Description is required."),
    FieldRule::new(
        "Description",
        Constraint::MaxLength(4000),
        "Description must be at most 4000 characters.",
    ),
    FieldRule::new("Location", Constraint::Required, "Location is required."),
    FieldRule::new(
        "Location",
        Constraint::MaxLength(200),
        "Location must be at most 200 characters.",
    ),
];

/// A stored incident report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Row identifier.
    pub id: i32,
    /// Short summary.
    pub title: String,
    /// Free-form account of what happened.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// User who filed the report.
    pub reporter_id: UserId,
    /// Filing time.
    pub reported_at: DateTime<Utc>,
}

/// Fields required to insert an incident row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIncident {
    /// Short summary.
    pub title: String,
    /// Free-form account of what happened.
    pub description: String,
    /// Where it happened.
    pub location: String,
    /// User who filed the report.
    pub reporter_id: UserId,
    /// Filing time.
    pub reported_at: DateTime<Utc>,
}

impl NewIncident {
    /// Attach the identifier assigned by the store.
    pub fn into_incident(self, id: i32) -> Incident {
        Incident {
            id,
            title: self.title,
            description: self.description,
            location: self.location,
            reporter_id: self.reporter_id,
            reported_at: self.reported_at,
        }
    }
}

/// Raw incident submission from the signed-in reporter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogIncidentRequest {
    /// Submitted `Title`.
    pub title: String,
    /// Submitted `Description`.
    pub description: String,
    /// Submitted `Location`.
    pub location: String,
}

impl LogIncidentRequest {
    /// Apply the incident rule table and build the row to insert.
    pub fn into_new_incident(
        self,
        reporter_id: UserId,
        reported_at: DateTime<Utc>,
    ) -> Result<NewIncident, FieldErrors> {
        let errors = validate(INCIDENT_RULES, |field| match field {
            "Title" => Some(self.title.as_str()),
            "Description" => Some(self.description.as_str()),
            "Location" => Some(self.location.as_str()),
            _ => None,
        });
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewIncident {
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            location: self.location.trim().to_owned(),
            reporter_id,
            reported_at,
        })
    }
}
