//! In-memory booking store for tests and local development.
//!
//! Implements all three repository ports over one shared state so that
//! availability sees the restrictions written by the committer and the
//! calendar. Failures can be switched on per operation family to reproduce
//! degraded states.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, ReservationId, RestrictionId, RoomId, StayDates, Timestamp,
};
use crate::domain::reservation::{
    NewReservation, NewRoomRestriction, Reservation, Room, RoomRestriction,
};
use crate::ports::{ReservationRepository, RestrictionRepository, RoomRepository};

#[derive(Debug, Default)]
struct StoreState {
    rooms: BTreeMap<RoomId, Room>,
    reservations: BTreeMap<ReservationId, Reservation>,
    restrictions: BTreeMap<RestrictionId, RoomRestriction>,
    last_reservation_id: i32,
    last_restriction_id: i32,
}

impl StoreState {
    fn is_free(&self, room_id: RoomId, stay: &StayDates) -> bool {
        !self
            .restrictions
            .values()
            .any(|r| r.room_id == room_id && r.stay.overlaps(stay))
    }

    fn with_room(&self, mut reservation: Reservation) -> Reservation {
        reservation.room = self.rooms.get(&reservation.room_id).cloned();
        reservation
    }

    fn sorted_reservations(&self, only_new: bool) -> Vec<Reservation> {
        let mut list: Vec<Reservation> = self
            .reservations
            .values()
            .filter(|r| !only_new || !r.processed)
            .map(|r| self.with_room(r.clone()))
            .collect();
        list.sort_by_key(|r| (r.stay.start(), r.id));
        list
    }
}

/// In-memory implementation of the room, reservation and restriction
/// repositories.
#[derive(Debug, Default)]
pub struct InMemoryBookingStore {
    state: RwLock<StoreState>,
    fail_reads: AtomicBool,
    fail_reservation_inserts: AtomicBool,
    fail_restriction_inserts: AtomicBool,
    fail_block_deletes: AtomicBool,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with the given rooms.
    pub fn with_rooms(rooms: impl IntoIterator<Item = Room>) -> Self {
        let state = StoreState {
            rooms: rooms.into_iter().map(|room| (room.id, room)).collect(),
            ..StoreState::default()
        };
        Self {
            state: RwLock::new(state),
            ..Self::default()
        }
    }

    /// The two rooms the site ships with.
    pub fn seeded() -> Self {
        Self::with_rooms([
            Room::new(RoomId::new(1), "General's Quarters"),
            Room::new(RoomId::new(2), "Major's Suite"),
        ])
    }

    pub async fn add_room(&self, room: Room) {
        self.state.write().await.rooms.insert(room.id, room);
    }

    /// Make every read fail with a database error.
    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reservation_inserts(&self, fail: bool) {
        self.fail_reservation_inserts.store(fail, Ordering::SeqCst);
    }

    /// Make restriction and block inserts fail.
    pub fn fail_restriction_inserts(&self, fail: bool) {
        self.fail_restriction_inserts.store(fail, Ordering::SeqCst);
    }

    pub fn fail_block_deletes(&self, fail: bool) {
        self.fail_block_deletes.store(fail, Ordering::SeqCst);
    }

    /// Every restriction row, for assertions.
    pub async fn restrictions(&self) -> Vec<RoomRestriction> {
        self.state.read().await.restrictions.values().cloned().collect()
    }

    /// Every reservation row, for assertions.
    pub async fn reservations(&self) -> Vec<Reservation> {
        self.state.read().await.reservations.values().cloned().collect()
    }

    fn check(flag: &AtomicBool, operation: &str) -> Result<(), DomainError> {
        if flag.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("Simulated failure in {}", operation),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl RoomRepository for InMemoryBookingStore {
    async fn all_rooms(&self) -> Result<Vec<Room>, DomainError> {
        Self::check(&self.fail_reads, "all_rooms")?;
        Ok(self.state.read().await.rooms.values().cloned().collect())
    }

    async fn get_room_by_id(&self, id: RoomId) -> Result<Room, DomainError> {
        Self::check(&self.fail_reads, "get_room_by_id")?;
        self.state
            .read()
            .await
            .rooms
            .get(&id)
            .cloned()
            .ok_or_else(|| DomainError::new(ErrorCode::RoomNotFound, format!("Room {} not found", id)))
    }

    async fn search_availability_by_dates_by_room_id(
        &self,
        stay: StayDates,
        room_id: RoomId,
    ) -> Result<bool, DomainError> {
        Self::check(&self.fail_reads, "search_availability_by_dates_by_room_id")?;
        Ok(self.state.read().await.is_free(room_id, &stay))
    }

    async fn search_availability_for_all_rooms(
        &self,
        stay: StayDates,
    ) -> Result<Vec<Room>, DomainError> {
        Self::check(&self.fail_reads, "search_availability_for_all_rooms")?;
        let state = self.state.read().await;
        Ok(state
            .rooms
            .values()
            .filter(|room| state.is_free(room.id, &stay))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationRepository for InMemoryBookingStore {
    async fn insert_reservation(&self, new: &NewReservation) -> Result<ReservationId, DomainError> {
        Self::check(&self.fail_reservation_inserts, "insert_reservation")?;
        let mut state = self.state.write().await;
        state.last_reservation_id += 1;
        let id = ReservationId::new(state.last_reservation_id);
        state
            .reservations
            .insert(id, Reservation::from_new(id, new, Timestamp::now()));
        Ok(id)
    }

    async fn all_reservations(&self) -> Result<Vec<Reservation>, DomainError> {
        Self::check(&self.fail_reads, "all_reservations")?;
        Ok(self.state.read().await.sorted_reservations(false))
    }

    async fn all_new_reservations(&self) -> Result<Vec<Reservation>, DomainError> {
        Self::check(&self.fail_reads, "all_new_reservations")?;
        Ok(self.state.read().await.sorted_reservations(true))
    }

    async fn get_reservation_by_id(&self, id: ReservationId) -> Result<Reservation, DomainError> {
        Self::check(&self.fail_reads, "get_reservation_by_id")?;
        let state = self.state.read().await;
        state
            .reservations
            .get(&id)
            .cloned()
            .map(|r| state.with_room(r))
            .ok_or_else(|| reservation_not_found(id))
    }

    async fn update_reservation(&self, reservation: &Reservation) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .reservations
            .get_mut(&reservation.id)
            .ok_or_else(|| reservation_not_found(reservation.id))?;
        stored.apply_guest_details(reservation.guest_details());
        stored.updated_at = Timestamp::now();
        Ok(())
    }

    async fn delete_reservation(&self, id: ReservationId) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        state
            .reservations
            .remove(&id)
            .ok_or_else(|| reservation_not_found(id))?;
        state.restrictions.retain(|_, r| r.reservation_id != Some(id));
        Ok(())
    }

    async fn update_processed_for_reservation(
        &self,
        id: ReservationId,
        processed: bool,
    ) -> Result<(), DomainError> {
        let mut state = self.state.write().await;
        let stored = state
            .reservations
            .get_mut(&id)
            .ok_or_else(|| reservation_not_found(id))?;
        stored.processed = processed;
        stored.updated_at = Timestamp::now();
        Ok(())
    }
}

#[async_trait]
impl RestrictionRepository for InMemoryBookingStore {
    async fn insert_room_restriction(
        &self,
        restriction: &NewRoomRestriction,
    ) -> Result<RestrictionId, DomainError> {
        Self::check(&self.fail_restriction_inserts, "insert_room_restriction")?;
        let mut state = self.state.write().await;
        state.last_restriction_id += 1;
        let id = RestrictionId::new(state.last_restriction_id);
        state
            .restrictions
            .insert(id, RoomRestriction::from_new(id, restriction, Timestamp::now()));
        Ok(id)
    }

    async fn get_restrictions_for_room_by_date(
        &self,
        room_id: RoomId,
        first: NaiveDate,
        last: NaiveDate,
    ) -> Result<Vec<RoomRestriction>, DomainError> {
        Self::check(&self.fail_reads, "get_restrictions_for_room_by_date")?;
        let state = self.state.read().await;
        let mut rows: Vec<RoomRestriction> = state
            .restrictions
            .values()
            .filter(|r| r.room_id == room_id && first < r.stay.end() && last >= r.stay.start())
            .cloned()
            .collect();
        rows.sort_by_key(|r| (r.stay.start(), r.id));
        Ok(rows)
    }

    async fn insert_block_for_room(
        &self,
        room_id: RoomId,
        date: NaiveDate,
    ) -> Result<RestrictionId, DomainError> {
        self.insert_room_restriction(&NewRoomRestriction::owner_block(room_id, date))
            .await
    }

    async fn delete_block_by_id(&self, id: RestrictionId) -> Result<(), DomainError> {
        Self::check(&self.fail_block_deletes, "delete_block_by_id")?;
        self.state.write().await.restrictions.remove(&id);
        Ok(())
    }
}

fn reservation_not_found(id: ReservationId) -> DomainError {
    DomainError::new(
        ErrorCode::ReservationNotFound,
        format!("Reservation {} not found", id),
    )
}
