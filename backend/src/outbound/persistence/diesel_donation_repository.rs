//! PostgreSQL-backed `DonationRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{DonationRepository, DonationRepositoryError};
use crate::domain::{Donation, DonationStatus, Email, NewDonation};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{DonationRow, NewDonationRow};
use super::pool::{DbPool, PoolError};
use super::schema::donations;

/// Diesel-backed implementation of the `DonationRepository` port.
#[derive(Clone)]
pub struct DieselDonationRepository {
    pool: DbPool,
}

impl DieselDonationRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> DonationRepositoryError {
    map_basic_pool_error(error, DonationRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> DonationRepositoryError {
    map_basic_diesel_error(
        error,
        DonationRepositoryError::query,
        DonationRepositoryError::connection,
    )
}

fn row_to_donation(row: DonationRow) -> Result<Donation, DonationRepositoryError> {
    let email = Email::parse(&row.email).map_err(|_| {
        DonationRepositoryError::query(format!("stored email for donation {} is invalid", row.id))
    })?;
    let status = row
        .status
        .parse::<DonationStatus>()
        .map_err(|err| DonationRepositoryError::query(err.to_string()))?;
    Ok(Donation {
        id: row.id,
        donor_name: row.donor_name,
        email,
        resource_type: row.resource_type,
        quantity: row.quantity,
        description: row.description,
        contact: row.contact,
        pickup_address: row.pickup_address,
        status,
        created_at: row.created_at,
    })
}

#[async_trait]
impl DonationRepository for DieselDonationRepository {
    async fn insert(&self, donation: &NewDonation) -> Result<Donation, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewDonationRow {
            donor_name: &donation.donor_name,
            email: donation.email.as_ref(),
            resource_type: &donation.resource_type,
            quantity: donation.quantity,
            description: donation.description.as_deref(),
            contact: donation.contact.as_deref(),
            pickup_address: donation.pickup_address.as_deref(),
            status: donation.status.as_str(),
            created_at: donation.created_at,
        };
        let stored = diesel::insert_into(donations::table)
            .values(&row)
            .returning(DonationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_donation(stored)
    }

    async fn list_by_email(&self, email: &Email) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DonationRow> = donations::table
            .filter(donations::email.eq(email.as_ref()))
            .order((donations::created_at.desc(), donations::id.desc()))
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_donation).collect()
    }

    async fn list_all(&self) -> Result<Vec<Donation>, DonationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<DonationRow> = donations::table
            .order((donations::created_at.desc(), donations::id.desc()))
            .select(DonationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter().map(row_to_donation).collect()
    }
}
