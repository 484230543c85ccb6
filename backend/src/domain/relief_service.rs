//! Incident and donation submissions.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{DonationRepository, IncidentRepository, ReliefCommand};
use crate::domain::repository_errors::{map_donation_error, map_incident_error};
use crate::domain::{Donation, Error, Incident, LogDonationRequest, LogIncidentRequest, UserId};

/// Relief service implementing [`ReliefCommand`].
#[derive(Clone)]
pub struct ReliefService {
    incidents: Arc<dyn IncidentRepository>,
    donations: Arc<dyn DonationRepository>,
    clock: Arc<dyn Clock>,
}

impl ReliefService {
    /// Create a new service with the given repositories.
    pub fn new(
        incidents: Arc<dyn IncidentRepository>,
        donations: Arc<dyn DonationRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            incidents,
            donations,
            clock,
        }
    }
}

#[async_trait]
impl ReliefCommand for ReliefService {
    async fn log_incident(
        &self,
        reporter: UserId,
        request: LogIncidentRequest,
    ) -> Result<Incident, Error> {
        let new_incident = request.into_new_incident(reporter, self.clock.utc())?;
        let incident = self
            .incidents
            .insert(&new_incident)
            .await
            .map_err(map_incident_error)?;
        info!(incident_id = incident.id, reporter_id = %reporter, "incident logged");
        Ok(incident)
    }

    async fn log_donation(&self, request: LogDonationRequest) -> Result<Donation, Error> {
        let new_donation = request.into_new_donation(self.clock.utc())?;
        let donation = self
            .donations
            .insert(&new_donation)
            .await
            .map_err(map_donation_error)?;
        info!(
            donation_id = donation.id,
            resource_type = %donation.resource_type,
            quantity = donation.quantity,
            "donation logged"
        );
        Ok(donation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        DonationRepositoryError, MockDonationRepository, MockIncidentRepository,
    };
    use crate::domain::{DonationStatus, ErrorCode, NewDonation, NewIncident};
    use mockable::DefaultClock;
    use rstest::rstest;

    fn make_service(
        incidents: MockIncidentRepository,
        donations: MockDonationRepository,
    ) -> ReliefService {
        ReliefService::new(Arc::new(incidents), Arc::new(donations), Arc::new(DefaultClock))
    }

    fn donation_request(quantity: &str) -> LogDonationRequest {
        LogDonationRequest {
            donor_name: "Grace".into(),
            email: "grace@example.org".into(),
            resource_type: "Blankets".into(),
            quantity: quantity.into(),
            ..LogDonationRequest::default()
        }
    }

    #[rstest]
    #[tokio::test]
    async fn incident_is_stamped_with_reporter() {
        let mut incidents = MockIncidentRepository::new();
        incidents
            .expect_insert()
            .withf(|incident: &NewIncident| incident.reporter_id == UserId::new(9))
            .times(1)
            .returning(|incident| Ok(incident.clone().into_incident(1)));

        let request = LogIncidentRequest {
            title: "Landslide".into(),
            description: "Road blocked".into(),
            location: "Pass 4".into(),
        };
        let incident = make_service(incidents, MockDonationRepository::new())
            .log_incident(UserId::new(9), request)
            .await
            .expect("incident stored");
        assert_eq!(incident.id, 1);
        assert_eq!(incident.title, "Landslide");
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_incident_is_not_persisted() {
        let mut incidents = MockIncidentRepository::new();
        incidents.expect_insert().never();

        let error = make_service(incidents, MockDonationRepository::new())
            .log_incident(UserId::new(1), LogIncidentRequest::default())
            .await
            .expect_err("invalid incident");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn donation_starts_pending() {
        let mut donations = MockDonationRepository::new();
        donations
            .expect_insert()
            .withf(|donation: &NewDonation| donation.status == DonationStatus::Pending)
            .times(1)
            .returning(|donation| Ok(donation.clone().into_donation(3)));

        let donation = make_service(MockIncidentRepository::new(), donations)
            .log_donation(donation_request("12"))
            .await
            .expect("donation stored");
        assert_eq!(donation.status, DonationStatus::Pending);
        assert_eq!(donation.quantity, 12);
    }

    #[rstest]
    #[case("-1")]
    #[case("twelve")]
    #[tokio::test]
    async fn bad_quantity_is_not_persisted(#[case] quantity: &str) {
        let mut donations = MockDonationRepository::new();
        donations.expect_insert().never();

        let error = make_service(MockIncidentRepository::new(), donations)
            .log_donation(donation_request(quantity))
            .await
            .expect_err("invalid quantity");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[rstest]
    #[tokio::test]
    async fn query_failure_is_internal() {
        let mut donations = MockDonationRepository::new();
        donations
            .expect_insert()
            .times(1)
            .return_once(|_| Err(DonationRepositoryError::query("constraint")));

        let error = make_service(MockIncidentRepository::new(), donations)
            .log_donation(donation_request("1"))
            .await
            .expect_err("store failure");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
