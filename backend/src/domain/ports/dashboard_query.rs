//! Driving port for the role dashboards.

use async_trait::async_trait;

use crate::domain::{AdminDashboard, Error, UserDashboard, UserId, VolunteerDashboard};

/// Domain use-case port for dashboard read models.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardQuery: Send + Sync {
    /// Home page for any signed-in account.
    async fn user_home(&self, user: UserId) -> Result<UserDashboard, Error>;

    /// Home page for volunteers.
    async fn volunteer_home(&self, user: UserId) -> Result<VolunteerDashboard, Error>;

    /// Administrator overview.
    async fn admin_home(&self) -> Result<AdminDashboard, Error>;
}
