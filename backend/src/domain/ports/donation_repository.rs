//! Port for donation persistence.

use async_trait::async_trait;

use crate::domain::{Donation, Email, NewDonation};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donation repository adapters.
    pub enum DonationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "donation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "donation repository query failed: {message}",
    }
}

/// Port for recording and listing donations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonationRepository: Send + Sync {
    /// Insert a donation and return it with its assigned id.
    async fn insert(&self, donation: &NewDonation) -> Result<Donation, DonationRepositoryError>;

    /// Donations submitted under `email`, newest first.
    async fn list_by_email(&self, email: &Email) -> Result<Vec<Donation>, DonationRepositoryError>;

    /// Every donation, newest first.
    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError>;
}
