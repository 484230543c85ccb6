//! Translation of driven-port failures into domain errors.
//!
//! Connection failures become `ServiceUnavailable`, everything else becomes
//! `InternalError`. Duplicate variants are handled by the calling service,
//! which knows which form field to annotate; when one reaches these helpers
//! it is reported as a conflict.

use crate::domain::Error;
use crate::domain::ports::{
    DonationRepositoryError, IncidentRepositoryError, UserRepositoryError,
    VolunteerRepositoryError, VolunteerTaskRepositoryError,
};

pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateEmail { .. } => Error::conflict("email already registered"),
    }
}

pub(crate) fn map_incident_error(error: IncidentRepositoryError) -> Error {
    match error {
        IncidentRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("incident repository unavailable: {message}"))
        }
        IncidentRepositoryError::Query { message } => {
            Error::internal(format!("incident repository error: {message}"))
        }
    }
}

pub(crate) fn map_donation_error(error: DonationRepositoryError) -> Error {
    match error {
        DonationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donation repository unavailable: {message}"))
        }
        DonationRepositoryError::Query { message } => {
            Error::internal(format!("donation repository error: {message}"))
        }
    }
}

pub(crate) fn map_volunteer_error(error: VolunteerRepositoryError) -> Error {
    match error {
        VolunteerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("volunteer repository unavailable: {message}"))
        }
        VolunteerRepositoryError::Query { message } => {
            Error::internal(format!("volunteer repository error: {message}"))
        }
        VolunteerRepositoryError::DuplicateUser { .. } => {
            Error::conflict("user already has a volunteer profile")
        }
    }
}

pub(crate) fn map_task_error(error: VolunteerTaskRepositoryError) -> Error {
    match error {
        VolunteerTaskRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("task repository unavailable: {message}"))
        }
        VolunteerTaskRepositoryError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(UserRepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(UserRepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(UserRepositoryError::duplicate_email("a@b.org"), ErrorCode::Conflict)]
    fn user_errors_map_to_codes(#[case] error: UserRepositoryError, #[case] code: ErrorCode) {
        assert_eq!(map_user_error(error).code(), code);
    }

    #[rstest]
    fn connection_message_is_kept_for_logs() {
        let error = map_task_error(VolunteerTaskRepositoryError::connection("pool timed out"));
        assert_eq!(error.message(), "task repository unavailable: pool timed out");
    }
}
