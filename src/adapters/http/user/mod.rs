//! HTTP adapter for staff login and logout.

pub mod handlers;
pub mod routes;

pub use routes::user_routes;
