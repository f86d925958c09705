//! CommitReservationHandler - validates the guest form and persists the
//! reservation with its room restriction.
//!
//! The two writes are not wrapped in a transaction. If the restriction
//! insert fails the reservation row stays behind without a lock on the
//! calendar, and the caller gets `RestrictionNotRecorded` naming it.

use std::sync::Arc;

use crate::domain::foundation::{format_date, ReservationId, Timestamp};
use crate::domain::reservation::{
    BookingRequest, DraftError, FormErrors, GuestForm, NewReservation, NewRoomRestriction,
    Reservation, ReservationDraft, ReservationError, Room, DRAFT_SESSION_KEY,
};
use crate::ports::{
    MailData, Mailer, ReservationRepository, RestrictionRepository, RoomRepository, SessionHandle,
};

use super::load_draft;

/// Sender and recipients for booking notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationSettings {
    pub from: String,
    /// Property owner, told about every new booking.
    pub owner: String,
}

/// Handler for the guest details form submission.
pub struct CommitReservationHandler {
    rooms: Arc<dyn RoomRepository>,
    reservations: Arc<dyn ReservationRepository>,
    restrictions: Arc<dyn RestrictionRepository>,
    mailer: Arc<dyn Mailer>,
    notifications: NotificationSettings,
}

impl CommitReservationHandler {
    pub fn new(
        rooms: Arc<dyn RoomRepository>,
        reservations: Arc<dyn ReservationRepository>,
        restrictions: Arc<dyn RestrictionRepository>,
        mailer: Arc<dyn Mailer>,
        notifications: NotificationSettings,
    ) -> Self {
        Self {
            rooms,
            reservations,
            restrictions,
            mailer,
            notifications,
        }
    }

    pub async fn handle(
        &self,
        session: &SessionHandle,
        form: GuestForm,
    ) -> Result<ReservationId, ReservationError> {
        // 1. A draft must be in progress
        let draft = load_draft(session).await?;

        // 2. Validate every field before touching the store
        let request = form.validate().map_err(ReservationError::Validation)?;
        let room = self.resolve_room(&request).await?;

        // 3. Record the validated details on the draft
        let (draft, new) = prepare_commit(draft, request, room)?;
        session.put(DRAFT_SESSION_KEY, &draft).await?;

        // 4. Persist reservation, then its restriction
        let reservation_id = self.reservations.insert_reservation(&new).await?;

        let lock = NewRoomRestriction::for_reservation(reservation_id, new.room_id, new.stay);
        if let Err(e) = self.restrictions.insert_room_restriction(&lock).await {
            tracing::warn!(
                reservation_id = %reservation_id,
                room_id = %new.room_id,
                error = %e,
                "Reservation saved without room restriction"
            );
            return Err(ReservationError::RestrictionNotRecorded {
                reservation_id,
                reason: e.to_string(),
            });
        }

        tracing::info!(
            reservation_id = %reservation_id,
            room_id = %new.room_id,
            stay = %new.stay,
            "Reservation committed"
        );

        // 5. Hand the committed draft to the summary page
        let reservation = Reservation::from_new(reservation_id, &new, Timestamp::now());
        let draft = draft.commit(reservation)?;
        if let Err(e) = session.put(DRAFT_SESSION_KEY, &draft).await {
            tracing::warn!(reservation_id = %reservation_id, error = %e, "Failed to store committed draft");
        }

        // 6. Notify guest and owner without waiting on delivery
        if let Some(reservation) = draft.committed() {
            self.notify(reservation);
        }

        Ok(reservation_id)
    }

    async fn resolve_room(&self, request: &BookingRequest) -> Result<Room, ReservationError> {
        match self.rooms.get_room_by_id(request.room_id).await {
            Ok(room) => Ok(room),
            Err(e) if e.is_not_found() => {
                let mut errors = FormErrors::new();
                errors.add("room_id", "Invalid room");
                Err(ReservationError::Validation(errors))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn notify(&self, reservation: &Reservation) {
        let start = format_date(reservation.stay.start());
        let end = format_date(reservation.stay.end());
        let room_name = reservation.room_name().unwrap_or("your room");

        let guest = MailData {
            to: reservation.email.clone(),
            from: self.notifications.from.clone(),
            subject: "Reservation Confirmation".to_string(),
            content: format!(
                "<strong>Reservation Confirmation</strong><br>\
                 Dear {}:<br>\
                 This is to confirm your reservation of {} from {} to {}.",
                reservation.first_name, room_name, start, end
            ),
            template: Some("basic.html".to_string()),
        };

        let owner = MailData {
            to: self.notifications.owner.clone(),
            from: self.notifications.from.clone(),
            subject: "Reservation Notification".to_string(),
            content: format!(
                "<strong>Reservation Notification</strong><br>\
                 A reservation has been made for {} from {} to {}.",
                room_name, start, end
            ),
            template: None,
        };

        for mail in [guest, owner] {
            let to = mail.to.clone();
            if let Err(e) = self.mailer.send(mail) {
                tracing::warn!(reservation_id = %reservation.id, %to, error = %e, "Failed to queue mail");
            }
        }
    }
}

/// Moves the draft to `DetailsFilled` and builds the insert payload.
///
/// A draft that already chose a room only accepts that room.
pub fn prepare_commit(
    draft: ReservationDraft,
    request: BookingRequest,
    room: Room,
) -> Result<(ReservationDraft, NewReservation), DraftError> {
    if let Some(expected) = draft.room_id() {
        if expected != room.id {
            return Err(DraftError::RoomMismatch {
                expected,
                actual: room.id,
            });
        }
    }

    let new = NewReservation {
        guest: request.guest.clone(),
        stay: request.stay,
        room_id: room.id,
    };
    let draft = draft.fill_details(request.stay, room, request.guest)?;
    Ok((draft, new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::application::handlers::reservation::test_support::{session, RecordingMailer};
    use crate::domain::foundation::{ErrorCode, RoomId, StayDates};
    use crate::domain::reservation::{DraftState, RestrictionKind};

    fn form() -> GuestForm {
        GuestForm {
            first_name: "John".to_string(),
            last_name: "Smith".to_string(),
            email: "john@gmail.com".to_string(),
            phone: "555-555-5555".to_string(),
            start_date: "2050-01-01".to_string(),
            end_date: "2050-01-02".to_string(),
            room_id: "1".to_string(),
        }
    }

    fn chosen_draft(room: i32) -> ReservationDraft {
        ReservationDraft::select_range(StayDates::parse("2050-01-01", "2050-01-02").unwrap())
            .choose_room(RoomId::new(room))
            .unwrap()
    }

    fn settings() -> NotificationSettings {
        NotificationSettings {
            from: "me@here.com".to_string(),
            owner: "owner@here.com".to_string(),
        }
    }

    fn handler(store: Arc<InMemoryBookingStore>, mailer: Arc<RecordingMailer>) -> CommitReservationHandler {
        CommitReservationHandler::new(store.clone(), store.clone(), store, mailer, settings())
    }

    async fn session_with(draft: ReservationDraft) -> SessionHandle {
        let session = session();
        session.put(DRAFT_SESSION_KEY, &draft).await.unwrap();
        session
    }

    #[tokio::test]
    async fn commit_writes_reservation_and_reservation_restriction() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let mailer = Arc::new(RecordingMailer::new());
        let session = session_with(chosen_draft(1)).await;

        let id = handler(store.clone(), mailer.clone())
            .handle(&session, form())
            .await
            .unwrap();

        let restrictions = store.restrictions().await;
        assert_eq!(restrictions.len(), 1);
        assert_eq!(restrictions[0].reservation_id, Some(id));
        assert_eq!(restrictions[0].kind, RestrictionKind::Reservation);
        assert_eq!(restrictions[0].kind.as_i32(), 1);

        let draft = load_draft(&session).await.unwrap();
        assert_eq!(draft.state(), DraftState::Committed);
        assert_eq!(draft.committed().unwrap().id, id);
    }

    #[tokio::test]
    async fn commit_queues_guest_and_owner_mail() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let mailer = Arc::new(RecordingMailer::new());
        let session = session_with(chosen_draft(1)).await;

        handler(store, mailer.clone()).handle(&session, form()).await.unwrap();

        let sent = mailer.sent();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "john@gmail.com");
        assert!(sent[0].content.contains("2050-01-01"));
        assert_eq!(sent[1].to, "owner@here.com");
    }

    #[tokio::test]
    async fn short_first_name_is_rejected_before_any_write() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let mailer = Arc::new(RecordingMailer::new());
        let session = session_with(chosen_draft(1)).await;
        let bad = GuestForm {
            first_name: "J".to_string(),
            ..form()
        };

        let err = handler(store.clone(), mailer.clone())
            .handle(&session, bad)
            .await
            .unwrap_err();

        match err {
            ReservationError::Validation(errors) => assert!(errors.has("first_name")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.reservations().await.is_empty());
        assert!(store.restrictions().await.is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn unknown_room_is_a_field_error() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let session = session_with(chosen_draft(7)).await;
        let form = GuestForm {
            room_id: "7".to_string(),
            ..form()
        };

        let err = handler(store.clone(), Arc::new(RecordingMailer::new()))
            .handle(&session, form)
            .await
            .unwrap_err();

        match err {
            ReservationError::Validation(errors) => assert_eq!(errors.get("room_id"), Some("Invalid room")),
            other => panic!("expected validation error, got {:?}", other),
        }
        assert!(store.reservations().await.is_empty());
    }

    #[tokio::test]
    async fn restriction_failure_leaves_observable_orphan_reservation() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store.fail_restriction_inserts(true);
        let mailer = Arc::new(RecordingMailer::new());
        let session = session_with(chosen_draft(1)).await;

        let err = handler(store.clone(), mailer.clone())
            .handle(&session, form())
            .await
            .unwrap_err();

        let reservation_id = match err {
            ReservationError::RestrictionNotRecorded { reservation_id, .. } => reservation_id,
            other => panic!("expected degraded commit, got {:?}", other),
        };
        let reservations = store.reservations().await;
        assert_eq!(reservations.len(), 1);
        assert_eq!(reservations[0].id, reservation_id);
        assert!(store.restrictions().await.is_empty());
        assert!(mailer.sent().is_empty());
    }

    #[tokio::test]
    async fn reservation_insert_failure_is_a_store_error() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        store.fail_reservation_inserts(true);
        let session = session_with(chosen_draft(1)).await;

        let err = handler(store.clone(), Arc::new(RecordingMailer::new()))
            .handle(&session, form())
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::DatabaseError);
        assert!(store.restrictions().await.is_empty());
    }

    #[tokio::test]
    async fn closed_mail_queue_does_not_fail_booking() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let session = session_with(chosen_draft(1)).await;

        let result = handler(store, Arc::new(RecordingMailer::failing()))
            .handle(&session, form())
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn missing_draft_restarts_flow_without_writes() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let err = handler(store.clone(), Arc::new(RecordingMailer::new()))
            .handle(&session(), form())
            .await
            .unwrap_err();

        assert_eq!(err, ReservationError::NoDraft);
        assert!(store.reservations().await.is_empty());
    }

    #[tokio::test]
    async fn form_room_must_match_chosen_room() {
        let store = Arc::new(InMemoryBookingStore::seeded());
        let session = session_with(chosen_draft(2)).await;

        let err = handler(store.clone(), Arc::new(RecordingMailer::new()))
            .handle(&session, form())
            .await
            .unwrap_err();

        assert!(matches!(err, ReservationError::Draft(DraftError::RoomMismatch { .. })));
        assert!(store.reservations().await.is_empty());
    }
}
