//! Volunteer sign-up and task creation.
//!
//! Sign-up enforces one profile per user and promotes a `User` account to
//! `Volunteer`; administrators keep their role. Task creation checks that a
//! non-zero assignee names an existing volunteer.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{
    SignUpOutcome, UserRepository, VolunteerCommand, VolunteerRepository,
    VolunteerRepositoryError, VolunteerTaskRepository,
};
use crate::domain::repository_errors::{map_task_error, map_user_error, map_volunteer_error};
use crate::domain::{
    CreateTaskRequest, Error, FieldErrors, Role, UserId, Volunteer, VolunteerSignUpRequest,
    VolunteerTask,
};

const ALREADY_VOLUNTEER: &str = "You are already registered as a volunteer.";
const UNKNOWN_ASSIGNEE: &str = "Assigned volunteer does not exist.";

/// Volunteer service implementing [`VolunteerCommand`].
#[derive(Clone)]
pub struct VolunteerService {
    users: Arc<dyn UserRepository>,
    volunteers: Arc<dyn VolunteerRepository>,
    tasks: Arc<dyn VolunteerTaskRepository>,
    clock: Arc<dyn Clock>,
}

impl VolunteerService {
    /// Create a new service with the given repositories.
    pub fn new(
        users: Arc<dyn UserRepository>,
        volunteers: Arc<dyn VolunteerRepository>,
        tasks: Arc<dyn VolunteerTaskRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            users,
            volunteers,
            tasks,
            clock,
        }
    }

    fn already_volunteer() -> Error {
        FieldErrors::single("UserId", ALREADY_VOLUNTEER).into()
    }
}

#[async_trait]
impl VolunteerCommand for VolunteerService {
    async fn sign_up(
        &self,
        user: UserId,
        request: VolunteerSignUpRequest,
    ) -> Result<SignUpOutcome, Error> {
        let new_volunteer = request.into_new_volunteer(user, self.clock.utc())?;

        let account = self
            .users
            .find_by_id(user)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::unauthorized("account no longer exists"))?;

        if self
            .volunteers
            .find_by_user_id(user)
            .await
            .map_err(map_volunteer_error)?
            .is_some()
        {
            return Err(Self::already_volunteer());
        }

        let volunteer = match self.volunteers.insert(&new_volunteer).await {
            Ok(volunteer) => volunteer,
            Err(VolunteerRepositoryError::DuplicateUser { .. }) => {
                return Err(Self::already_volunteer());
            }
            Err(error) => return Err(map_volunteer_error(error)),
        };

        let role = match account.role {
            Role::User => {
                self.users
                    .update_role(user, Role::Volunteer)
                    .await
                    .map_err(map_user_error)?;
                Role::Volunteer
            }
            kept => kept,
        };

        info!(volunteer_id = %volunteer.id, user_id = %user, role = %role, "volunteer signed up");
        Ok(SignUpOutcome { volunteer, role })
    }

    async fn create_task(&self, request: CreateTaskRequest) -> Result<VolunteerTask, Error> {
        let new_task = request.into_new_task()?;

        if let Some(assignee) = new_task.assigned_to {
            let exists = self
                .volunteers
                .find_by_id(assignee)
                .await
                .map_err(map_volunteer_error)?
                .is_some();
            if !exists {
                return Err(FieldErrors::single("AssignedTo", UNKNOWN_ASSIGNEE).into());
            }
        }

        let task = self.tasks.insert(&new_task).await.map_err(map_task_error)?;
        info!(task_id = task.id, status = %task.status, "volunteer task created");
        Ok(task)
    }

    async fn task_form(&self) -> Result<Vec<Volunteer>, Error> {
        self.volunteers.list_all().await.map_err(map_volunteer_error)
    }
}

#[cfg(test)]
#[path = "volunteer_service_tests.rs"]
mod tests;
