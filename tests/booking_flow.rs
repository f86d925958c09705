//! Integration tests for the guest booking flow.
//!
//! Drives the application handlers end to end against the in-memory
//! booking store, session store and channel mailer:
//! 1. Search, choose, fill in, commit, summary
//! 2. Validation before any write
//! 3. The reservation-without-restriction degraded state
//! 4. Availability boundaries and the overlap property

use std::sync::Arc;

use chrono::NaiveDate;
use proptest::prelude::*;
use tokio::sync::mpsc::UnboundedReceiver;

use hotel_bookings::adapters::{ChannelMailer, InMemoryBookingStore, InMemorySessionStore};
use hotel_bookings::application::{
    CheckRoomAvailabilityHandler, CheckRoomAvailabilityQuery, ChooseRoomCommand,
    ChooseRoomHandler, CommitReservationHandler, GetReservationHandler, NotificationSettings,
    ReservationSummaryHandler, SearchAvailabilityHandler, SearchAvailabilityQuery, SearchOutcome,
    ShowReservationFormHandler,
};
use hotel_bookings::domain::foundation::{ReservationId, RoomId, SessionToken, StayDates};
use hotel_bookings::domain::reservation::{
    DraftState, GuestForm, NewRoomRestriction, ReservationDraft, ReservationError, RestrictionKind,
    DRAFT_SESSION_KEY,
};
use hotel_bookings::ports::{
    MailData, RestrictionRepository, RoomRepository, SessionHandle, SessionRead,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Site {
    store: Arc<InMemoryBookingStore>,
    session: SessionHandle,
    mail: UnboundedReceiver<MailData>,
    commit: CommitReservationHandler,
}

impl Site {
    fn new() -> Self {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let sessions = Arc::new(InMemorySessionStore::default());
        let session = SessionHandle::new(sessions, SessionToken::new());
        let (mailer, mail) = ChannelMailer::channel();
        let commit = CommitReservationHandler::new(
            store.clone(),
            store.clone(),
            store.clone(),
            Arc::new(mailer),
            NotificationSettings {
                from: "me@here.com".to_string(),
                owner: "owner@here.com".to_string(),
            },
        );
        Self {
            store,
            session,
            mail,
            commit,
        }
    }

    async fn search(&self, start: &str, end: &str) -> SearchOutcome {
        let stay = StayDates::parse(start, end).unwrap();
        SearchAvailabilityHandler::new(self.store.clone())
            .handle(&self.session, SearchAvailabilityQuery { stay })
            .await
            .unwrap()
    }

    async fn choose(&self, room: i32) {
        ChooseRoomHandler::new()
            .handle(&self.session, ChooseRoomCommand { room_id: RoomId::new(room) })
            .await
            .unwrap();
    }

    async fn draft_state(&self) -> Option<DraftState> {
        match self.session.get::<ReservationDraft>(DRAFT_SESSION_KEY).await.unwrap() {
            SessionRead::Present(draft) => Some(draft.state()),
            _ => None,
        }
    }

    fn drain_mail(&mut self) -> Vec<MailData> {
        let mut sent = Vec::new();
        while let Ok(mail) = self.mail.try_recv() {
            sent.push(mail);
        }
        sent
    }
}

fn john(room: &str, start: &str, end: &str) -> GuestForm {
    GuestForm {
        first_name: "John".to_string(),
        last_name: "Smith".to_string(),
        email: "john@gmail.com".to_string(),
        phone: "555-555-5555".to_string(),
        start_date: start.to_string(),
        end_date: end.to_string(),
        room_id: room.to_string(),
    }
}

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

// =============================================================================
// Happy path
// =============================================================================

#[tokio::test]
async fn guest_books_room_from_search_to_summary() {
    let mut site = Site::new();

    let outcome = site.search("2050-01-01", "2050-01-02").await;
    match &outcome {
        SearchOutcome::Available { rooms, .. } => assert_eq!(rooms.len(), 2),
        other => panic!("expected rooms, got {:?}", other),
    }
    assert_eq!(site.draft_state().await, Some(DraftState::RangeSelected));

    site.choose(1).await;
    assert_eq!(site.draft_state().await, Some(DraftState::RoomChosen));

    let view = ShowReservationFormHandler::new(site.store.clone())
        .handle(&site.session)
        .await
        .unwrap();
    assert_eq!(view.room.room_name, "General's Quarters");
    assert_eq!(view.form.start_date, "2050-01-01");

    let id = site
        .commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-02"))
        .await
        .unwrap();
    assert_eq!(site.draft_state().await, Some(DraftState::Committed));

    // A reservation lock references the new reservation
    let restrictions = site.store.restrictions().await;
    assert_eq!(restrictions.len(), 1);
    assert_eq!(restrictions[0].kind, RestrictionKind::Reservation);
    assert_eq!(restrictions[0].kind.as_i32(), 1);
    assert_eq!(restrictions[0].reservation_id, Some(id));
    assert_eq!(restrictions[0].room_id, RoomId::new(1));

    // Guest confirmation and owner notification were queued
    let mail = site.drain_mail();
    assert_eq!(mail.len(), 2);
    assert_eq!(mail[0].to, "john@gmail.com");
    assert!(mail[0].content.contains("General's Quarters"));
    assert_eq!(mail[1].to, "owner@here.com");

    let summary = ReservationSummaryHandler::new().handle(&site.session).await.unwrap();
    assert_eq!(summary.id, id);
    assert_eq!(summary.room_name(), Some("General's Quarters"));

    // The summary is shown once
    assert_eq!(site.draft_state().await, None);
    let again = ReservationSummaryHandler::new().handle(&site.session).await;
    assert!(matches!(again, Err(ReservationError::NoDraft)));
}

#[tokio::test]
async fn committed_reservation_reads_back_with_submitted_fields() {
    let site = Site::new();
    site.search("2050-03-10", "2050-03-14").await;
    site.choose(2).await;

    let form = GuestForm {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        email: "jane.doe@example.com".to_string(),
        phone: "".to_string(),
        ..john("2", "2050-03-10", "2050-03-14")
    };
    let id = site.commit.handle(&site.session, form).await.unwrap();

    let stored = GetReservationHandler::new(site.store.clone())
        .handle(id)
        .await
        .unwrap();
    assert_eq!(stored.first_name, "Jane");
    assert_eq!(stored.last_name, "Doe");
    assert_eq!(stored.email, "jane.doe@example.com");
    assert_eq!(stored.phone, "");
    assert_eq!(stored.room_id, RoomId::new(2));
    assert_eq!(stored.stay, StayDates::parse("2050-03-10", "2050-03-14").unwrap());
    assert!(!stored.processed);
}

#[tokio::test]
async fn booked_room_drops_out_of_later_searches() {
    let site = Site::new();
    site.search("2050-01-01", "2050-01-05").await;
    site.choose(1).await;
    site.commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-05"))
        .await
        .unwrap();

    let other = Site {
        store: site.store.clone(),
        ..Site::new()
    };
    match other.search("2050-01-03", "2050-01-04").await {
        SearchOutcome::Available { rooms, .. } => {
            let ids: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();
            assert_eq!(ids, vec![RoomId::new(2)]);
        }
        other => panic!("expected room 2 only, got {:?}", other),
    }
}

// =============================================================================
// Rejections
// =============================================================================

#[tokio::test]
async fn short_first_name_is_rejected_before_any_write() {
    let mut site = Site::new();
    site.search("2050-01-01", "2050-01-02").await;
    site.choose(1).await;

    let form = GuestForm {
        first_name: "J".to_string(),
        ..john("1", "2050-01-01", "2050-01-02")
    };
    let result = site.commit.handle(&site.session, form).await;

    match result {
        Err(ReservationError::Validation(errors)) => {
            assert!(errors.has("first_name"));
            assert_eq!(errors.fields().count(), 1);
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert!(site.store.reservations().await.is_empty());
    assert!(site.store.restrictions().await.is_empty());
    assert!(site.drain_mail().is_empty());
    assert_eq!(site.draft_state().await, Some(DraftState::RoomChosen));
}

#[tokio::test]
async fn commit_without_draft_restarts_the_flow() {
    let site = Site::new();
    let result = site
        .commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-02"))
        .await;
    assert!(matches!(result, Err(ReservationError::NoDraft)));
    assert!(site.store.reservations().await.is_empty());
}

#[tokio::test]
async fn malformed_draft_counts_as_no_draft() {
    let site = Site::new();
    site.session
        .put(DRAFT_SESSION_KEY, &serde_json::json!({"garbage": true}))
        .await
        .unwrap();

    let result = site
        .commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-02"))
        .await;
    assert!(matches!(result, Err(ReservationError::NoDraft)));
}

// =============================================================================
// Degraded state
// =============================================================================

#[tokio::test]
async fn failed_restriction_write_leaves_observable_orphan_reservation() {
    let mut site = Site::new();
    site.search("2050-01-01", "2050-01-02").await;
    site.choose(1).await;
    site.store.fail_restriction_inserts(true);

    let result = site
        .commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-02"))
        .await;

    let reservation_id = match result {
        Err(ReservationError::RestrictionNotRecorded { reservation_id, .. }) => reservation_id,
        other => panic!("expected RestrictionNotRecorded, got {:?}", other),
    };

    let reservations = site.store.reservations().await;
    assert_eq!(reservations.len(), 1);
    assert_eq!(reservations[0].id, reservation_id);
    assert!(site.store.restrictions().await.is_empty());

    // Nothing was announced and the draft did not reach Committed
    assert!(site.drain_mail().is_empty());
    assert_eq!(site.draft_state().await, Some(DraftState::DetailsFilled));

    // Without a lock the dates still look free
    let free = CheckRoomAvailabilityHandler::new(site.store.clone())
        .handle(CheckRoomAvailabilityQuery {
            room_id: RoomId::new(1),
            stay: StayDates::parse("2050-01-01", "2050-01-02").unwrap(),
        })
        .await
        .unwrap();
    assert!(free.ok);
}

#[tokio::test]
async fn failed_reservation_write_writes_nothing() {
    let site = Site::new();
    site.search("2050-01-01", "2050-01-02").await;
    site.choose(1).await;
    site.store.fail_reservation_inserts(true);

    let result = site
        .commit
        .handle(&site.session, john("1", "2050-01-01", "2050-01-02"))
        .await;

    assert!(matches!(result, Err(ReservationError::Store(_))));
    assert!(site.store.reservations().await.is_empty());
    assert!(site.store.restrictions().await.is_empty());
}

// =============================================================================
// Availability
// =============================================================================

#[tokio::test]
async fn touching_ranges_do_not_overlap() {
    let store = InMemoryBookingStore::seeded();
    store
        .insert_room_restriction(&NewRoomRestriction::for_reservation(
            ReservationId::new(1),
            RoomId::new(1),
            StayDates::parse("2050-01-02", "2050-01-03").unwrap(),
        ))
        .await
        .unwrap();

    let before = StayDates::parse("2050-01-01", "2050-01-02").unwrap();
    let after = StayDates::parse("2050-01-03", "2050-01-04").unwrap();
    let same = StayDates::parse("2050-01-02", "2050-01-03").unwrap();

    let room = RoomId::new(1);
    assert!(store.search_availability_by_dates_by_room_id(before, room).await.unwrap());
    assert!(store.search_availability_by_dates_by_room_id(after, room).await.unwrap());
    assert!(!store.search_availability_by_dates_by_room_id(same, room).await.unwrap());
}

#[tokio::test]
async fn owner_block_makes_room_unavailable_for_that_night() {
    let store = InMemoryBookingStore::seeded();
    store
        .insert_block_for_room(RoomId::new(2), date("2050-02-14"))
        .await
        .unwrap();

    let valentines = StayDates::parse("2050-02-13", "2050-02-15").unwrap();
    let rooms = store.search_availability_for_all_rooms(valentines).await.unwrap();
    let ids: Vec<RoomId> = rooms.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![RoomId::new(1)]);
}

#[tokio::test]
async fn empty_search_is_not_an_error_and_starts_no_draft() {
    let site = Site::new();
    for room in [1, 2] {
        site.store
            .insert_block_for_room(RoomId::new(room), date("2050-01-01"))
            .await
            .unwrap();
    }

    assert_eq!(
        site.search("2050-01-01", "2050-01-02").await,
        SearchOutcome::NoAvailability
    );
    assert_eq!(site.draft_state().await, None);
}

#[tokio::test]
async fn store_failure_is_distinct_from_no_availability() {
    let site = Site::new();
    site.store.fail_reads(true);
    let stay = StayDates::parse("2050-01-01", "2050-01-02").unwrap();

    let result = SearchAvailabilityHandler::new(site.store.clone())
        .handle(&site.session, SearchAvailabilityQuery { stay })
        .await;
    assert!(matches!(result, Err(ReservationError::Store(_))));
}

fn day(offset: u32) -> NaiveDate {
    date("2050-01-01") + chrono::Duration::days(i64::from(offset))
}

proptest! {
    #[test]
    fn room_is_free_iff_no_stored_row_overlaps(
        rows in proptest::collection::vec((0u32..30, 1u32..5), 0..6),
        start in 0u32..30,
        nights in 1u32..5,
    ) {
        let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
        rt.block_on(async {
            let store = InMemoryBookingStore::seeded();
            let room = RoomId::new(1);
            let mut stored = Vec::new();
            for (row_start, row_nights) in &rows {
                let stay = StayDates::new(day(*row_start), day(row_start + row_nights)).unwrap();
                store
                    .insert_room_restriction(&NewRoomRestriction::for_reservation(
                        ReservationId::new(1),
                        room,
                        stay,
                    ))
                    .await
                    .unwrap();
                stored.push(stay);
            }

            let requested = StayDates::new(day(start), day(start + nights)).unwrap();
            let expected = !stored
                .iter()
                .any(|s| s.start() < requested.end() && s.end() > requested.start());
            let free = store
                .search_availability_by_dates_by_room_id(requested, room)
                .await
                .unwrap();
            prop_assert_eq!(free, expected);
            Ok(())
        })?;
    }
}
