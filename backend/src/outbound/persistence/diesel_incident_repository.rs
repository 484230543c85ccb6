//! PostgreSQL-backed `IncidentRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{IncidentRepository, IncidentRepositoryError};
use crate::domain::{Incident, NewIncident, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{IncidentRow, NewIncidentRow};
use super::pool::{DbPool, PoolError};
use super::schema::incidents;

/// Diesel-backed implementation of the `IncidentRepository` port.
#[derive(Clone)]
pub struct DieselIncidentRepository {
    pool: DbPool,
}

impl DieselIncidentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> IncidentRepositoryError {
    map_basic_pool_error(error, IncidentRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> IncidentRepositoryError {
    map_basic_diesel_error(
        error,
        IncidentRepositoryError::query,
        IncidentRepositoryError::connection,
    )
}

impl From<IncidentRow> for Incident {
    fn from(row: IncidentRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            location: row.location,
            reporter_id: UserId::new(row.reporter_id),
            reported_at: row.reported_at,
        }
    }
}

#[async_trait]
impl IncidentRepository for DieselIncidentRepository {
    async fn insert(&self, incident: &NewIncident) -> Result<Incident, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = NewIncidentRow {
            title: &incident.title,
            description: &incident.description,
            location: &incident.location,
            reporter_id: incident.reporter_id.get(),
            reported_at: incident.reported_at,
        };
        diesel::insert_into(incidents::table)
            .values(&row)
            .returning(IncidentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Incident::from)
            .map_err(map_diesel_error)
    }

    async fn list_by_reporter(
        &self,
        reporter_id: UserId,
    ) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IncidentRow> = incidents::table
            .filter(incidents::reporter_id.eq(reporter_id.get()))
            .order((incidents::reported_at.desc(), incidents::id.desc()))
            .select(IncidentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Incident::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<Incident>, IncidentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<IncidentRow> = incidents::table
            .order((incidents::reported_at.desc(), incidents::id.desc()))
            .select(IncidentRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Incident::from).collect())
    }
}
