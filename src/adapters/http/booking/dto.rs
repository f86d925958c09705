//! HTTP DTOs for the public booking endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{format_date, StayDates};
use crate::domain::reservation::{GuestForm, Reservation, Room};

use crate::application::ReservationFormView;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Search form: arrival and departure as `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
}

/// Availability widget on a room page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AvailabilityJsonForm {
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub room_id: String,
}

/// Direct booking link: `/book-room?id=1&s=2050-01-01&e=2050-01-02`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookRoomParams {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub s: String,
    #[serde(default)]
    pub e: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: i32,
    pub room_name: String,
}

impl From<&Room> for RoomResponse {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_i32(),
            room_name: room.room_name.clone(),
        }
    }
}

/// Rooms free for the searched stay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub start_date: String,
    pub end_date: String,
    pub rooms: Vec<RoomResponse>,
}

impl SearchResponse {
    pub fn new(stay: StayDates, rooms: &[Room]) -> Self {
        Self {
            start_date: format_date(stay.start()),
            end_date: format_date(stay.end()),
            rooms: rooms.iter().map(RoomResponse::from).collect(),
        }
    }
}

/// Data for the reservation page, prefilled from the draft.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationFormResponse {
    pub room: RoomResponse,
    pub start_date: String,
    pub end_date: String,
    pub form: GuestForm,
}

impl From<ReservationFormView> for ReservationFormResponse {
    fn from(view: ReservationFormView) -> Self {
        let stay = view.draft.stay();
        Self {
            room: RoomResponse::from(&view.room),
            start_date: format_date(stay.start()),
            end_date: format_date(stay.end()),
            form: view.form,
        }
    }
}

/// Reservation as shown to the guest after booking and to the admin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub start_date: String,
    pub end_date: String,
    pub room_id: i32,
    pub room_name: Option<String>,
    pub processed: bool,
}

impl From<&Reservation> for ReservationResponse {
    fn from(r: &Reservation) -> Self {
        Self {
            id: r.id.as_i32(),
            first_name: r.first_name.clone(),
            last_name: r.last_name.clone(),
            email: r.email.clone(),
            phone: r.phone.clone(),
            start_date: format_date(r.stay.start()),
            end_date: format_date(r.stay.end()),
            room_id: r.room_id.as_i32(),
            room_name: r.room_name().map(str::to_string),
            processed: r.processed,
        }
    }
}
