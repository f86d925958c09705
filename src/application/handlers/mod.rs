//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod admin;
pub mod availability;
pub mod reservation;
pub mod user;
