//! Read models rendered by the role dashboards.

use serde::Serialize;

use super::{Donation, Incident, UserSummary, Volunteer, VolunteerTask};

/// Everything a signed-in reporter sees on their home page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDashboard {
    /// Reports the user filed, newest first.
    pub incidents: Vec<Incident>,
    /// Donations recorded under the user's email, newest first.
    pub donations: Vec<Donation>,
    /// The user's volunteer profile, when they signed up.
    pub volunteer: Option<Volunteer>,
}

/// Volunteer home page: own profile, own tasks, and tasks up for grabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerDashboard {
    /// The caller's profile; `None` until they sign up.
    pub volunteer: Option<Volunteer>,
    /// Tasks assigned to the caller.
    pub assigned_tasks: Vec<VolunteerTask>,
    /// Tasks not yet assigned to anyone.
    pub open_tasks: Vec<VolunteerTask>,
}

/// Administrator overview of every table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    /// Accounts without credentials.
    pub users: Vec<UserSummary>,
    /// All incident reports.
    pub incidents: Vec<Incident>,
    /// All donations.
    pub donations: Vec<Donation>,
    /// All volunteer profiles.
    pub volunteers: Vec<Volunteer>,
    /// All volunteer tasks.
    pub tasks: Vec<VolunteerTask>,
}
