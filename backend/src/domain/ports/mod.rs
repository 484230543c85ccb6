//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`LoginService`, `RegistrationService`, `ReliefCommand`,
//! `VolunteerCommand`, `DashboardQuery`) are called by inbound adapters.
//! Driven ports (the `*Repository` traits) are implemented by the in-memory
//! and PostgreSQL adapters.

use std::sync::Arc;

mod macros;
pub(crate) use macros::define_port_error;

mod dashboard_query;
mod donation_repository;
mod incident_repository;
mod login_service;
mod registration_service;
mod relief_command;
mod user_repository;
mod volunteer_command;
mod volunteer_repository;
mod volunteer_task_repository;

pub use dashboard_query::DashboardQuery;
#[cfg(test)]
pub use dashboard_query::MockDashboardQuery;
#[cfg(test)]
pub use donation_repository::MockDonationRepository;
pub use donation_repository::{DonationRepository, DonationRepositoryError};
#[cfg(test)]
pub use incident_repository::MockIncidentRepository;
pub use incident_repository::{IncidentRepository, IncidentRepositoryError};
pub use login_service::LoginService;
#[cfg(test)]
pub use login_service::MockLoginService;
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use relief_command::MockReliefCommand;
pub use relief_command::ReliefCommand;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
#[cfg(test)]
pub use volunteer_command::MockVolunteerCommand;
pub use volunteer_command::{SignUpOutcome, VolunteerCommand};
#[cfg(test)]
pub use volunteer_repository::MockVolunteerRepository;
pub use volunteer_repository::{VolunteerRepository, VolunteerRepositoryError};
#[cfg(test)]
pub use volunteer_task_repository::MockVolunteerTaskRepository;
pub use volunteer_task_repository::{VolunteerTaskRepository, VolunteerTaskRepositoryError};

/// Every driven repository port, as shared trait objects.
///
/// Outbound adapters hand one of these to the server builder so services can
/// be wired without knowing which store backs them.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Incident reports.
    pub incidents: Arc<dyn IncidentRepository>,
    /// Donations.
    pub donations: Arc<dyn DonationRepository>,
    /// Volunteer profiles.
    pub volunteers: Arc<dyn VolunteerRepository>,
    /// Volunteer tasks.
    pub tasks: Arc<dyn VolunteerTaskRepository>,
}
