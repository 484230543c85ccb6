//! Driving port for volunteer sign-up and task management.

use async_trait::async_trait;

use crate::domain::{
    CreateTaskRequest, Error, Role, UserId, Volunteer, VolunteerSignUpRequest, VolunteerTask,
};

/// Result of a successful volunteer sign-up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpOutcome {
    /// The stored profile.
    pub volunteer: Volunteer,
    /// The account role after sign-up; `User` accounts become `Volunteer`.
    pub role: Role,
}

/// Domain use-case port for volunteers and their tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerCommand: Send + Sync {
    /// Create the caller's volunteer profile.
    ///
    /// # Errors
    ///
    /// A second profile for the same user is an `InvalidRequest` error with
    /// a field annotation; nothing is written.
    async fn sign_up(
        &self,
        user: UserId,
        request: VolunteerSignUpRequest,
    ) -> Result<SignUpOutcome, Error>;

    /// Create a task, normalising an assignee of `0` to unassigned.
    async fn create_task(&self, request: CreateTaskRequest) -> Result<VolunteerTask, Error>;

    /// Volunteers a new task can be assigned to.
    async fn task_form(&self) -> Result<Vec<Volunteer>, Error>;
}
