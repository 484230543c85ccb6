//! Port for incident report persistence.

use async_trait::async_trait;

use crate::domain::{Incident, NewIncident, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by incident repository adapters.
    pub enum IncidentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "incident repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "incident repository query failed: {message}",
    }
}

/// Port for filing and listing incident reports.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IncidentRepository: Send + Sync {
    /// Insert a report and return it with its assigned id.
    async fn insert(&self, incident: &NewIncident) -> Result<Incident, IncidentRepositoryError>;

    /// Reports filed by one user, newest first.
    async fn list_by_reporter(
        &self,
        reporter_id: UserId,
    ) -> Result<Vec<Incident>, IncidentRepositoryError>;

    /// Every report, newest first.
    async fn list_all(&self) -> Result<Vec<Incident>, IncidentRepositoryError>;
}
