//! Reservation aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReservationId, RoomId, StayDates, Timestamp};

use super::{GuestDetails, Room};

/// Insert payload for a reservation row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReservation {
    pub guest: GuestDetails,
    pub stay: StayDates,
    pub room_id: RoomId,
}

/// A stored reservation.
///
/// Created by a guest; afterwards only an administrator edits the guest
/// fields, flips `processed`, or deletes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: ReservationId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub stay: StayDates,
    pub room_id: RoomId,
    /// Joined room, present when the query loaded it.
    pub room: Option<Room>,
    pub processed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Reservation {
    /// Materializes an insert payload under the id the store assigned.
    pub fn from_new(id: ReservationId, new: &NewReservation, now: Timestamp) -> Self {
        Self {
            id,
            first_name: new.guest.first_name.clone(),
            last_name: new.guest.last_name.clone(),
            email: new.guest.email.clone(),
            phone: new.guest.phone.clone(),
            stay: new.stay,
            room_id: new.room_id,
            room: None,
            processed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces the guest contact fields.
    pub fn apply_guest_details(&mut self, guest: GuestDetails) {
        self.first_name = guest.first_name;
        self.last_name = guest.last_name;
        self.email = guest.email;
        self.phone = guest.phone;
        self.updated_at = Timestamp::now();
    }

    pub fn guest_details(&self) -> GuestDetails {
        GuestDetails {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    /// Display name of the booked room, if joined.
    pub fn room_name(&self) -> Option<&str> {
        self.room.as_ref().map(|r| r.room_name.as_str())
    }
}
