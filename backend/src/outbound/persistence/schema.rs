//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Registered accounts. `email` is unique and stored lower-cased.
    users (id) {
        id -> Int4,
        full_name -> Varchar,
        email -> Varchar,
        /// Base64 SHA-256 digest of the password.
        password_digest -> Varchar,
        /// One of `User`, `Volunteer`, `Admin`.
        role -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Incident reports.
    incidents (id) {
        id -> Int4,
        title -> Varchar,
        description -> Text,
        location -> Varchar,
        reporter_id -> Int4,
        reported_at -> Timestamptz,
    }
}

diesel::table! {
    /// Donations; `quantity` is checked non-negative.
    donations (id) {
        id -> Int4,
        donor_name -> Varchar,
        email -> Varchar,
        resource_type -> Varchar,
        quantity -> Int4,
        description -> Nullable<Text>,
        contact -> Nullable<Varchar>,
        pickup_address -> Nullable<Varchar>,
        status -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Volunteer profiles; `user_id` is unique.
    volunteers (id) {
        id -> Int4,
        user_id -> Int4,
        skills -> Varchar,
        availability -> Varchar,
        joined_at -> Timestamptz,
    }
}

diesel::table! {
    /// Volunteer tasks; `assigned_to` is null when unassigned.
    volunteer_tasks (id) {
        id -> Int4,
        name -> Varchar,
        description -> Text,
        status -> Varchar,
        assigned_to -> Nullable<Int4>,
    }
}

diesel::joinable!(incidents -> users (reporter_id));
diesel::joinable!(volunteers -> users (user_id));
diesel::joinable!(volunteer_tasks -> volunteers (assigned_to));

diesel::allow_tables_to_appear_in_same_query!(
    users,
    incidents,
    donations,
    volunteers,
    volunteer_tasks,
);
