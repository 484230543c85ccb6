//! Builders for the repository bundle and HTTP state.
//!
//! With a database URL the server migrates and uses the Diesel adapters;
//! without one it keeps everything in a process-local [`MemoryStore`].

use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use reliefdesk::domain::ports::Repositories;
use reliefdesk::domain::{AccountService, Error, RegisterRequest};
use reliefdesk::inbound::http::state::HttpState;
use reliefdesk::outbound::memory::MemoryStore;
use reliefdesk::outbound::persistence::{
    DbPool, MigrationError, PoolConfig, PoolError, repositories, run_pending_migrations,
};

use super::config::{AdminBootstrap, AppSettings};

/// Failures while preparing the backing store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Embedded migrations could not be applied.
    #[error(transparent)]
    Migrate(#[from] MigrationError),
    /// The connection pool could not be built.
    #[error(transparent)]
    Pool(#[from] PoolError),
    /// The configured administrator was rejected by the account service.
    #[error("failed to bootstrap admin account: {0}")]
    Admin(Error),
}

impl From<StoreError> for std::io::Error {
    fn from(value: StoreError) -> Self {
        std::io::Error::other(value)
    }
}

/// Select and prepare the repositories named by `settings`.
pub async fn build_repositories(settings: &AppSettings) -> Result<Repositories, StoreError> {
    match settings.database_url.as_deref() {
        Some(url) => {
            run_pending_migrations(url).await?;
            let pool = DbPool::new(PoolConfig::new(url)).await?;
            info!("using PostgreSQL store");
            Ok(repositories(&pool))
        }
        None => {
            info!("no database configured; using in-memory store");
            Ok(MemoryStore::new().repositories())
        }
    }
}

/// Create or promote the configured administrator.
pub async fn bootstrap_admin(
    repos: &Repositories,
    clock: Arc<dyn Clock>,
    admin: AdminBootstrap,
) -> Result<(), StoreError> {
    let accounts = AccountService::new(repos.users.clone(), clock);
    let AdminBootstrap {
        email,
        password,
        full_name,
    } = admin;
    accounts
        .ensure_admin(RegisterRequest {
            full_name,
            email,
            confirm_password: password.clone(),
            password,
        })
        .await
        .map_err(StoreError::Admin)?;
    Ok(())
}

/// Prepare the store, bootstrap the admin and wire the HTTP state.
pub async fn build_http_state(settings: &AppSettings) -> Result<HttpState, StoreError> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let repos = build_repositories(settings).await?;
    if let Some(admin) = settings.admin() {
        bootstrap_admin(&repos, clock.clone(), admin).await?;
    }
    Ok(HttpState::from_repositories(repos, clock))
}
