//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations only translate between Diesel row structs and
//! domain types. Rows (`models.rs`) and table definitions (`schema.rs`) stay
//! private to this module. Unique-constraint violations are reported through
//! the ports' duplicate variants so services can annotate the right field.
//!
//! # Example
//!
//! ```no_run
//! use reliefdesk::outbound::persistence::{DbPool, PoolConfig, repositories};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/relief")).await?;
//! let repos = repositories(&pool);
//! # let _ = repos;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use crate::domain::ports::Repositories;

mod diesel_basic_error_mapping;
mod diesel_donation_repository;
mod diesel_incident_repository;
mod diesel_user_repository;
mod diesel_volunteer_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_donation_repository::DieselDonationRepository;
pub use diesel_incident_repository::DieselIncidentRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use diesel_volunteer_repository::{DieselVolunteerRepository, DieselVolunteerTaskRepository};
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};

/// Bundle every Diesel repository over one shared pool.
pub fn repositories(pool: &DbPool) -> Repositories {
    Repositories {
        users: Arc::new(DieselUserRepository::new(pool.clone())),
        incidents: Arc::new(DieselIncidentRepository::new(pool.clone())),
        donations: Arc::new(DieselDonationRepository::new(pool.clone())),
        volunteers: Arc::new(DieselVolunteerRepository::new(pool.clone())),
        tasks: Arc::new(DieselVolunteerTaskRepository::new(pool.clone())),
    }
}
