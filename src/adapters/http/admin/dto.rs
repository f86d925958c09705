//! HTTP DTOs for the admin endpoints.

use serde::Deserialize;

use crate::domain::calendar::BlockEdit;

/// Admin edit of a reservation's guest fields.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReservationForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// The logged-in user's own name and email.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
}

/// `?y=2050&m=1`; either missing means the current month.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct CalendarQuery {
    pub y: Option<i32>,
    pub m: Option<u32>,
}

/// Submitted calendar: one entry per checked block cell.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarEditsRequest {
    pub y: i32,
    pub m: u32,
    #[serde(default)]
    pub edits: Vec<BlockEdit>,
}
