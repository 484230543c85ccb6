//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use super::schema::{donations, incidents, users, volunteer_tasks, volunteers};

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub password_digest: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub full_name: &'a str,
    pub email: &'a str,
    pub password_digest: &'a str,
    pub role: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the incidents table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = incidents)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct IncidentRow {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub location: String,
    pub reporter_id: i32,
    pub reported_at: DateTime<Utc>,
}

/// Insertable struct for creating incident records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = incidents)]
pub(crate) struct NewIncidentRow<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub location: &'a str,
    pub reporter_id: i32,
    pub reported_at: DateTime<Utc>,
}

/// Row struct for reading from the donations table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = donations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DonationRow {
    pub id: i32,
    pub donor_name: String,
    pub email: String,
    pub resource_type: String,
    pub quantity: i32,
    pub description: Option<String>,
    pub contact: Option<String>,
    pub pickup_address: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating donation records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = donations)]
pub(crate) struct NewDonationRow<'a> {
    pub donor_name: &'a str,
    pub email: &'a str,
    pub resource_type: &'a str,
    pub quantity: i32,
    pub description: Option<&'a str>,
    pub contact: Option<&'a str>,
    pub pickup_address: Option<&'a str>,
    pub status: &'a str,
    pub created_at: DateTime<Utc>,
}

/// Row struct for reading from the volunteers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerRow {
    pub id: i32,
    pub user_id: i32,
    pub skills: String,
    pub availability: String,
    pub joined_at: DateTime<Utc>,
}

/// Insertable struct for creating volunteer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteers)]
pub(crate) struct NewVolunteerRow<'a> {
    pub user_id: i32,
    pub skills: &'a str,
    pub availability: &'a str,
    pub joined_at: DateTime<Utc>,
}

/// Row struct for reading from the volunteer_tasks table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = volunteer_tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct VolunteerTaskRow {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub status: String,
    pub assigned_to: Option<i32>,
}

/// Insertable struct for creating volunteer task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = volunteer_tasks)]
pub(crate) struct NewVolunteerTaskRow<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub status: &'a str,
    pub assigned_to: Option<i32>,
}
