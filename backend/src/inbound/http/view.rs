//! JSON view documents and redirect helpers.
//!
//! Every page-like endpoint answers with a [`View`]: the view name, an
//! optional model, optional field annotations, and an optional message.
//! Successful submissions answer with `303 See Other` instead.

use actix_web::http::{StatusCode, header};
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, FieldErrors};

/// Route paths shared by handlers and redirects.
pub mod paths {
    /// Registration form.
    pub const REGISTER: &str = "/register";
    /// Login form; every gate redirects here.
    pub const LOGIN: &str = "/login";
    /// Session teardown.
    pub const LOGOUT: &str = "/logout";
    /// Incident report form.
    pub const LOG_INCIDENT: &str = "/incidents/new";
    /// Donation form.
    pub const LOG_DONATION: &str = "/donations/new";
    /// Volunteer sign-up form.
    pub const VOLUNTEER_SIGN_UP: &str = "/volunteers/new";
    /// Volunteer task form.
    pub const VOLUNTEER_TASK: &str = "/volunteer-tasks/new";
    /// Home for the `User` role.
    pub const USER_HOME: &str = "/home/user";
    /// Home for the `Volunteer` role.
    pub const VOLUNTEER_HOME: &str = "/home/volunteer";
    /// Home for the `Admin` role.
    pub const ADMIN_HOME: &str = "/home/admin";
}

/// A rendered page.
///
/// # Examples
/// ```
/// use reliefdesk::inbound::http::view::View;
///
/// let view = View::new("Login").with_message("Invalid email or password.");
/// assert_eq!(view.name(), "Login");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct View {
    /// View name, e.g. `UserHome`.
    #[schema(example = "UserHome")]
    view: String,
    /// Data backing the view.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    model: Option<Value>,
    /// Field annotations keyed by wire field name.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    errors: Option<FieldErrors>,
    /// Summary shown above the form.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl View {
    /// Start an empty view.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            view: name.into(),
            model: None,
            errors: None,
            message: None,
        }
    }

    /// View name.
    pub fn name(&self) -> &str {
        &self.view
    }

    /// Attach a serialisable model.
    pub fn with_model<T: Serialize>(mut self, model: &T) -> Result<Self, Error> {
        let value = serde_json::to_value(model)
            .map_err(|err| Error::internal(format!("failed to render {}: {err}", self.view)))?;
        self.model = Some(value);
        Ok(self)
    }

    /// Attach field annotations.
    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Attach a form-level message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Render with `status`.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status).json(self)
    }

    /// Render with `200 OK`.
    pub fn ok(self) -> HttpResponse {
        self.respond(StatusCode::OK)
    }

    /// Re-render a form after a failed submission.
    ///
    /// Validation errors become a `400` view carrying the annotations; any
    /// other error is handed back for the error envelope.
    pub fn or_invalid(self, error: Error) -> Result<HttpResponse, Error> {
        match FieldErrors::from_error(&error) {
            Some(fields) => Ok(self.with_errors(fields).respond(StatusCode::BAD_REQUEST)),
            None => Err(error),
        }
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
