//! Outbound adapters implementing the domain's repository ports.
//!
//! - **memory**: process-local store for database-less runs and tests.
//! - **persistence**: PostgreSQL repositories using Diesel.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business logic.

pub mod memory;
pub mod persistence;
