//! Port for volunteer task persistence.

use async_trait::async_trait;

use crate::domain::{NewVolunteerTask, VolunteerId, VolunteerTask};

use super::define_port_error;

define_port_error! {
    /// Errors raised by volunteer task repository adapters.
    pub enum VolunteerTaskRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

/// Port for creating and listing volunteer tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerTaskRepository: Send + Sync {
    /// Insert a task and return it with its assigned id.
    async fn insert(
        &self,
        task: &NewVolunteerTask,
    ) -> Result<VolunteerTask, VolunteerTaskRepositoryError>;

    /// Tasks assigned to one volunteer, ordered by id.
    async fn list_assigned_to(
        &self,
        volunteer_id: VolunteerId,
    ) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError>;

    /// Tasks nobody has picked up, ordered by id.
    async fn list_unassigned(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError>;

    /// Every task, ordered by id.
    async fn list_all(&self) -> Result<Vec<VolunteerTask>, VolunteerTaskRepositoryError>;
}
