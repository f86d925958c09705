//! HTTP adapter for the public booking flow.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::booking_routes;
