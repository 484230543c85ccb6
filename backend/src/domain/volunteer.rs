//! Volunteer profiles and the tasks assigned to them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserId;
use super::validation::{Constraint, FieldErrors, FieldRule, validate};

const SIGN_UP_RULES: &[FieldRule] = &[
    FieldRule::new("Skills", Constraint::Required, "Skills are required."),
    FieldRule::new("Skills", Constraint::MaxLength(500), "Skills must be at most 500 characters."),
    FieldRule::new("Availability", Constraint::Required, "Availability is required."),
    FieldRule::new(
        "Availability",
        Constraint::MaxLength(200),
        "Availability must be at most 200 characters.",
    ),
];

const TASK_STATUS_OPTIONS: &[&str] = &["Open", "InProgress", "Completed"];

const TASK_RULES: &[FieldRule] = &[
    FieldRule::new("Name", Constraint::Required, "Task name is required."),
    FieldRule::new("Name", Constraint::MaxLength(200), "Task name must be at most 200 characters."),
    FieldRule::new("Description", Constraint::Required, "Description is required."),
    FieldRule::new(
        "Description",
        Constraint::MaxLength(2000),
        "Description must be at most 2000 characters.",
    ),
    FieldRule::new(
        "Status",
        Constraint::OneOf(TASK_STATUS_OPTIONS),
        "Status must be Open, InProgress, or Completed.",
    ),
    FieldRule::new("AssignedTo", Constraint::Integer, "Assigned volunteer must be a number."),
    FieldRule::new(
        "AssignedTo",
        Constraint::NonNegative,
        "Assigned volunteer cannot be negative.",
    ),
];

/// Database identifier of a volunteer row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VolunteerId(i32);

impl VolunteerId {
    /// Wrap a raw row identifier.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw row identifier.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for VolunteerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored volunteer profile. At most one exists per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Volunteer {
    /// Row identifier.
    pub id: VolunteerId,
    /// Owning user account.
    pub user_id: UserId,
    /// What the volunteer can help with.
    pub skills: String,
    /// When the volunteer can help.
    pub availability: String,
    /// Sign-up time.
    pub joined_at: DateTime<Utc>,
}

/// Fields required to insert a volunteer row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVolunteer {
    /// Owning user account.
    pub user_id: UserId,
    /// What the volunteer can help with.
    pub skills: String,
    /// When the volunteer can help.
    pub availability: String,
    /// Sign-up time.
    pub joined_at: DateTime<Utc>,
}

impl NewVolunteer {
    /// Attach the identifier assigned by the store.
    pub fn into_volunteer(self, id: VolunteerId) -> Volunteer {
        Volunteer {
            id,
            user_id: self.user_id,
            skills: self.skills,
            availability: self.availability,
            joined_at: self.joined_at,
        }
    }
}

/// Raw volunteer sign-up submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolunteerSignUpRequest {
    /// Submitted `Skills`.
    pub skills: String,
    /// Submitted `Availability`.
    pub availability: String,
}

impl VolunteerSignUpRequest {
    /// Apply the sign-up rule table and build the row to insert.
    pub fn into_new_volunteer(
        self,
        user_id: UserId,
        joined_at: DateTime<Utc>,
    ) -> Result<NewVolunteer, FieldErrors> {
        let errors = validate(SIGN_UP_RULES, |field| match field {
            "Skills" => Some(self.skills.as_str()),
            "Availability" => Some(self.availability.as_str()),
            _ => None,
        });
        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(NewVolunteer {
            user_id,
            skills: self.skills.trim().to_owned(),
            availability: self.availability.trim().to_owned(),
            joined_at,
        })
    }
}

/// Progress of a volunteer task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum TaskStatus {
    /// Not started.
    #[default]
    Open,
    /// Someone is working on it.
    InProgress,
    /// Done.
    Completed,
}

/// Error returned when a task status string is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0}")]
pub struct UnknownTaskStatus(pub String);

impl TaskStatus {
    /// Stored representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
        }
    }
}

impl FromStr for TaskStatus {
    type Err = UnknownTaskStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "inprogress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(UnknownTaskStatus(value.to_owned())),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored volunteer task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerTask {
    /// Row identifier.
    pub id: i32,
    /// Short task name.
    pub name: String,
    /// What needs doing.
    pub description: String,
    /// Progress.
    pub status: TaskStatus,
    /// Volunteer responsible, if any.
    pub assigned_to: Option<VolunteerId>,
}

/// Fields required to insert a task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVolunteerTask {
    /// Short task name.
    pub name: String,
    /// What needs doing.
    pub description: String,
    /// Progress.
    pub status: TaskStatus,
    /// Volunteer responsible, if any.
    pub assigned_to: Option<VolunteerId>,
}

impl NewVolunteerTask {
    /// Attach the identifier assigned by the store.
    pub fn into_task(self, id: i32) -> VolunteerTask {
        VolunteerTask {
            id,
            name: self.name,
            description: self.description,
            status: self.status,
            assigned_to: self.assigned_to,
        }
    }
}

/// Raw task submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTaskRequest {
    /// Submitted `Name`.
    pub name: String,
    /// Submitted `Description`.
    pub description: String,
    /// Submitted `Status`; blank means [`TaskStatus::Open`].
    pub status: String,
    /// Submitted `AssignedTo`; blank or `0` means unassigned.
    pub assigned_to: String,
}

impl CreateTaskRequest {
    /// Apply the task rule table and build the row to insert.
    ///
    /// Whether a non-zero `AssignedTo` names an existing volunteer is checked
    /// by the service, which has store access.
    pub fn into_new_task(self) -> Result<NewVolunteerTask, FieldErrors> {
        let errors = validate(TASK_RULES, |field| match field {
            "Name" => Some(self.name.as_str()),
            "Description" => Some(self.description.as_str()),
            "Status" => Some(self.status.as_str()),
            "AssignedTo" => Some(self.assigned_to.as_str()),
            _ => None,
        });
        if !errors.is_empty() {
            return Err(errors);
        }

        let status = match self.status.trim() {
            "" => TaskStatus::Open,
            raw => raw
                .parse::<TaskStatus>()
                .map_err(|err| FieldErrors::single("Status", err.to_string()))?,
        };
        let assigned_to = match self.assigned_to.trim() {
            "" => None,
            raw => raw
                .parse::<i32>()
                .map_err(|_| FieldErrors::single("AssignedTo", "Assigned volunteer must be a number."))
                .map(normalise_assignee)?,
        };

        Ok(NewVolunteerTask {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            status,
            assigned_to,
        })
    }
}

/// Zero is the form's "nobody" option and is stored as unassigned.
fn normalise_assignee(raw: i32) -> Option<VolunteerId> {
    (raw != 0).then_some(VolunteerId::new(raw))
}
