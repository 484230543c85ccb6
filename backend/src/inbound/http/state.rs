//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only depend
//! on driving ports and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    DashboardQuery, LoginService, RegistrationService, ReliefCommand, Repositories,
    VolunteerCommand,
};
use crate::domain::{AccountService, DashboardService, ReliefService, VolunteerService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Credential checks for `/login`.
    pub login: Arc<dyn LoginService>,
    /// Account creation for `/register`.
    pub registration: Arc<dyn RegistrationService>,
    /// Incident and donation submissions.
    pub relief: Arc<dyn ReliefCommand>,
    /// Volunteer sign-up and task creation.
    pub volunteers: Arc<dyn VolunteerCommand>,
    /// Read models behind the role homes.
    pub dashboards: Arc<dyn DashboardQuery>,
}

impl HttpState {
    /// Wire the domain services over one set of repositories.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use mockable::DefaultClock;
    /// use reliefdesk::inbound::http::state::HttpState;
    /// use reliefdesk::outbound::memory::MemoryStore;
    ///
    /// let state = HttpState::from_repositories(
    ///     MemoryStore::new().repositories(),
    ///     Arc::new(DefaultClock),
    /// );
    /// # let _ = state;
    /// ```
    pub fn from_repositories(repos: Repositories, clock: Arc<dyn Clock>) -> Self {
        let accounts = Arc::new(AccountService::new(repos.users.clone(), clock.clone()));
        Self {
            login: accounts.clone(),
            registration: accounts,
            relief: Arc::new(ReliefService::new(
                repos.incidents.clone(),
                repos.donations.clone(),
                clock.clone(),
            )),
            volunteers: Arc::new(VolunteerService::new(
                repos.users.clone(),
                repos.volunteers.clone(),
                repos.tasks.clone(),
                clock,
            )),
            dashboards: Arc::new(DashboardService::new(repos)),
        }
    }
}
