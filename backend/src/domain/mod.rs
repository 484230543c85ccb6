//! Domain primitives, validation tables, and services.
//!
//! Purpose: define the relief desk's entities and use-cases independently of
//! HTTP and storage. Entities document their invariants in Rustdoc; services
//! implement the driving ports in [`ports`] over the driven repository ports.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Incident, Donation, Volunteer, VolunteerTask: stored entities.
//! - *Request types: raw form submissions validated by rule tables.
//! - AccountService, ReliefService, VolunteerService, DashboardService.

pub mod account_service;
pub mod auth;
pub mod dashboard;
pub mod dashboard_service;
pub mod donation;
pub mod error;
pub mod incident;
pub mod password;
pub mod ports;
pub mod relief_service;
mod repository_errors;
pub mod trace_id;
pub mod user;
pub mod validation;
pub mod volunteer;
pub mod volunteer_service;

pub use self::account_service::{AccountService, INVALID_CREDENTIALS};
pub use self::auth::LoginCredentials;
pub use self::dashboard::{AdminDashboard, UserDashboard, VolunteerDashboard};
pub use self::dashboard_service::DashboardService;
pub use self::donation::{
    Donation, DonationStatus, LogDonationRequest, NewDonation, UnknownDonationStatus,
};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::incident::{Incident, LogIncidentRequest, NewIncident};
pub use self::password::PasswordDigest;
pub use self::relief_service::ReliefService;
pub use self::trace_id::TraceId;
pub use self::user::{
    Email, InvalidEmail, NewUser, RegisterRequest, Role, UnknownRole, User, UserId, UserSummary,
};
pub use self::validation::{Constraint, FieldErrors, FieldRule};
pub use self::volunteer::{
    CreateTaskRequest, NewVolunteer, NewVolunteerTask, TaskStatus, UnknownTaskStatus, Volunteer,
    VolunteerId, VolunteerSignUpRequest, VolunteerTask,
};
pub use self::volunteer_service::VolunteerService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use reliefdesk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
