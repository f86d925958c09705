//! Hotel Bookings - reservation service for a small property
//!
//! Guests search for free rooms, pick one, and leave their details; the
//! booking is stored together with a room restriction that keeps the dates
//! taken. The owner manages reservations and blocks days on a monthly
//! calendar.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
