//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (ids, dates, errors)
//! - `reservation` - Rooms, reservations, restrictions, and the booking draft
//! - `calendar` - Admin month view and block reconciliation
//! - `user` - Staff accounts and admin login

pub mod calendar;
pub mod foundation;
pub mod reservation;
pub mod user;
