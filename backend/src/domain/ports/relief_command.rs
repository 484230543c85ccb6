//! Driving port for filing incident reports and donations.

use async_trait::async_trait;

use crate::domain::{Donation, Error, Incident, LogDonationRequest, LogIncidentRequest, UserId};

/// Domain use-case port for relief submissions.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReliefCommand: Send + Sync {
    /// File an incident report on behalf of `reporter`.
    async fn log_incident(
        &self,
        reporter: UserId,
        request: LogIncidentRequest,
    ) -> Result<Incident, Error>;

    /// Record a donation with status `Pending`.
    async fn log_donation(&self, request: LogDonationRequest) -> Result<Donation, Error>;
}
