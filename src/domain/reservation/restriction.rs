//! Room restrictions: the rows that make a room unavailable.
//!
//! A restriction is either backed by a reservation (`kind = Reservation`,
//! reservation id present) or is an owner block with no reservation
//! (`kind = OwnerBlock`). The constructors below are the only way to build
//! an insert payload, so the two cases cannot be mixed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ReservationId, RestrictionId, RoomId, StayDates, Timestamp};

/// Restriction category, stored as `restriction_id` in the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionKind {
    Reservation,
    OwnerBlock,
}

impl RestrictionKind {
    /// Numeric code used by the `restrictions` lookup table.
    pub fn as_i32(self) -> i32 {
        match self {
            RestrictionKind::Reservation => 1,
            RestrictionKind::OwnerBlock => 2,
        }
    }

    pub fn from_i32(code: i32) -> Option<Self> {
        match code {
            1 => Some(RestrictionKind::Reservation),
            2 => Some(RestrictionKind::OwnerBlock),
            _ => None,
        }
    }
}

/// Insert payload for a restriction row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRoomRestriction {
    stay: StayDates,
    room_id: RoomId,
    reservation_id: Option<ReservationId>,
}

impl NewRoomRestriction {
    /// Occupancy lock for a committed reservation.
    pub fn for_reservation(reservation_id: ReservationId, room_id: RoomId, stay: StayDates) -> Self {
        Self {
            stay,
            room_id,
            reservation_id: Some(reservation_id),
        }
    }

    /// Owner block covering the single night `[date, date + 1)`.
    pub fn owner_block(room_id: RoomId, date: NaiveDate) -> Self {
        Self {
            stay: StayDates::single_night(date),
            room_id,
            reservation_id: None,
        }
    }

    pub fn stay(&self) -> StayDates {
        self.stay
    }

    pub fn room_id(&self) -> RoomId {
        self.room_id
    }

    pub fn reservation_id(&self) -> Option<ReservationId> {
        self.reservation_id
    }

    pub fn kind(&self) -> RestrictionKind {
        match self.reservation_id {
            Some(_) => RestrictionKind::Reservation,
            None => RestrictionKind::OwnerBlock,
        }
    }
}

/// A stored restriction row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRestriction {
    pub id: RestrictionId,
    pub stay: StayDates,
    pub room_id: RoomId,
    pub reservation_id: Option<ReservationId>,
    pub kind: RestrictionKind,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RoomRestriction {
    /// Materializes an insert payload under the id the store assigned.
    pub fn from_new(id: RestrictionId, new: &NewRoomRestriction, now: Timestamp) -> Self {
        Self {
            id,
            stay: new.stay(),
            room_id: new.room_id(),
            reservation_id: new.reservation_id(),
            kind: new.kind(),
            created_at: now,
            updated_at: now,
        }
    }

    /// True when the calendar should render this row as a reservation.
    pub fn is_reservation(&self) -> bool {
        self.reservation_id.is_some()
    }
}
