//! Form bodies posted by the browser.
//!
//! Fields arrive as `application/x-www-form-urlencoded` text with PascalCase
//! names. Every field defaults to empty so a missing input surfaces as a
//! field annotation from the rule tables rather than a transport error.
//! Forms also serialise back into the re-rendered view; password fields are
//! never echoed.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    CreateTaskRequest, LogDonationRequest, LogIncidentRequest, RegisterRequest,
    VolunteerSignUpRequest,
};

/// `POST /register` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegisterForm {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        Self {
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
        }
    }
}

/// `POST /login` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct LoginForm {
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
}

/// `POST /incidents/new` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct IncidentForm {
    pub title: String,
    pub description: String,
    pub location: String,
}

impl From<IncidentForm> for LogIncidentRequest {
    fn from(form: IncidentForm) -> Self {
        Self {
            title: form.title,
            description: form.description,
            location: form.location,
        }
    }
}

/// `POST /donations/new` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct DonationForm {
    pub donor_name: String,
    pub email: String,
    pub resource_type: String,
    /// Whole number of units, as typed.
    #[schema(example = "24")]
    pub quantity: String,
    pub description: String,
    pub contact: String,
    pub pickup_address: String,
}

impl From<DonationForm> for LogDonationRequest {
    fn from(form: DonationForm) -> Self {
        Self {
            donor_name: form.donor_name,
            email: form.email,
            resource_type: form.resource_type,
            quantity: form.quantity,
            description: form.description,
            contact: form.contact,
            pickup_address: form.pickup_address,
        }
    }
}

/// `POST /volunteers/new` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct VolunteerForm {
    pub skills: String,
    pub availability: String,
}

impl From<VolunteerForm> for VolunteerSignUpRequest {
    fn from(form: VolunteerForm) -> Self {
        Self {
            skills: form.skills,
            availability: form.availability,
        }
    }
}

/// `POST /volunteer-tasks/new` body.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "PascalCase", default)]
pub struct TaskForm {
    pub name: String,
    pub description: String,
    /// `Open`, `InProgress`, or `Completed`; blank means `Open`.
    pub status: String,
    /// Volunteer id; blank or `0` leaves the task unassigned.
    #[schema(example = "0")]
    pub assigned_to: String,
}

impl From<TaskForm> for CreateTaskRequest {
    fn from(form: TaskForm) -> Self {
        Self {
            name: form.name,
            description: form.description,
            status: form.status,
            assigned_to: form.assigned_to,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn missing_fields_default_to_empty() {
        let form: DonationForm =
            serde_urlencoded::from_str("DonorName=Ada&Quantity=abc").expect("form decodes");
        assert_eq!(form.donor_name, "Ada");
        assert_eq!(form.quantity, "abc");
        assert!(form.email.is_empty());
    }

    #[rstest]
    fn passwords_are_not_echoed() {
        let form: RegisterForm = serde_urlencoded::from_str(
            "FullName=Ada+Lovelace&Email=ada%40example.org&Password=secret1&ConfirmPassword=secret1",
        )
        .expect("form decodes");
        assert_eq!(form.password, "secret1");
        assert_eq!(
            serde_json::to_value(&form).expect("serialises"),
            json!({ "FullName": "Ada Lovelace", "Email": "ada@example.org" })
        );
    }
}
