//! Port for volunteer profile persistence.

use async_trait::async_trait;

use crate::domain::{NewVolunteer, UserId, Volunteer, VolunteerId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by volunteer repository adapters.
    pub enum VolunteerRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "volunteer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "volunteer repository query failed: {message}",
        /// The one-profile-per-user constraint rejected an insert.
        DuplicateUser { user_id: i32 } => "user {user_id} already has a volunteer profile",
    }
}

/// Port for volunteer profiles; at most one per user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VolunteerRepository: Send + Sync {
    /// Insert a profile and return it with its assigned id.
    async fn insert(&self, volunteer: &NewVolunteer) -> Result<Volunteer, VolunteerRepositoryError>;

    /// Profile owned by `user_id`, if any.
    async fn find_by_user_id(
        &self,
        user_id: UserId,
    ) -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Profile by id.
    async fn find_by_id(&self, id: VolunteerId)
    -> Result<Option<Volunteer>, VolunteerRepositoryError>;

    /// Every profile, ordered by id.
    async fn list_all(&self) -> Result<Vec<Volunteer>, VolunteerRepositoryError>;
}
