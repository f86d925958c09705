//! HTTP adapter for the admin reservation list, calendar, and profile.
//!
//! Every route here is mounted behind the login guard.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
