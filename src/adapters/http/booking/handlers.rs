//! HTTP handlers for the public booking flow.

use axum::extract::{Form, Path, Query, State};
use axum::response::Response;
use axum::Json;

use crate::application::{
    AvailabilityCheck, BookRoomCommand, ChooseRoomCommand, CheckRoomAvailabilityQuery,
    SearchAvailabilityQuery, SearchOutcome,
};
use crate::domain::foundation::{RoomId, StayDates};
use crate::domain::reservation::GuestForm;

use super::super::error::HttpFailure;
use super::super::state::AppState;
use super::super::visitor::{FlashKind, VisitorSession};
use super::dto::{
    AvailabilityJsonForm, BookRoomParams, ReservationFormResponse, ReservationResponse,
    RoomResponse, SearchForm, SearchResponse,
};

pub const HOME: &str = "/";
pub const SEARCH_PAGE: &str = "/search-availability";
pub const RESERVATION_PAGE: &str = "/make-reservation";
pub const SUMMARY_PAGE: &str = "/reservation-summary";

/// GET / and GET /search-availability - pending flash messages
pub async fn landing(session: VisitorSession) -> Response {
    let flashes = session.take_flashes().await;
    session.respond(Json(flashes))
}

/// GET /rooms
pub async fn list_rooms(State(state): State<AppState>, session: VisitorSession) -> Response {
    match state.list_rooms_handler().handle().await {
        Ok(rooms) => {
            let rooms: Vec<RoomResponse> = rooms.iter().map(RoomResponse::from).collect();
            session.respond(Json(rooms))
        }
        Err(err) => session.fail(err, HOME).await,
    }
}

/// POST /search-availability - every room free for the stay
pub async fn search_availability(
    State(state): State<AppState>,
    session: VisitorSession,
    Form(form): Form<SearchForm>,
) -> Response {
    let stay = match StayDates::parse(&form.start, &form.end) {
        Ok(stay) => stay,
        Err(err) => return session.fail(err, SEARCH_PAGE).await,
    };

    let outcome = state
        .search_availability_handler()
        .handle(session.handle(), SearchAvailabilityQuery { stay })
        .await;

    match outcome {
        Ok(SearchOutcome::Available { stay, rooms }) => {
            session.respond(Json(SearchResponse::new(stay, &rooms)))
        }
        Ok(SearchOutcome::NoAvailability) => {
            session.flash(FlashKind::Error, "No availability").await;
            session.redirect(SEARCH_PAGE)
        }
        Err(err) => session.fail(err, HOME).await,
    }
}

/// POST /search-availability-json - is one room free for the stay
///
/// Always answers 200; failures are reported through `ok` and `message`.
pub async fn search_availability_json(
    State(state): State<AppState>,
    Form(form): Form<AvailabilityJsonForm>,
) -> Json<AvailabilityCheck> {
    let parsed = form
        .room_id
        .parse::<RoomId>()
        .ok()
        .zip(StayDates::parse(&form.start, &form.end).ok());

    let Some((room_id, stay)) = parsed else {
        return Json(AvailabilityCheck::failed("Error parsing form"));
    };

    let check = state
        .check_room_availability_handler()
        .handle(CheckRoomAvailabilityQuery { room_id, stay })
        .await;

    match check {
        Ok(check) => Json(check),
        Err(err) => {
            tracing::warn!(error = %err, room_id = %room_id, "Availability check failed");
            Json(AvailabilityCheck::failed("Error querying database"))
        }
    }
}

/// GET /choose-room/:id - pick a room from the search results
pub async fn choose_room(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(raw_id): Path<String>,
) -> Response {
    let Ok(room_id) = raw_id.parse::<RoomId>() else {
        return session.fail(HttpFailure::redirect("Missing url parameter"), HOME).await;
    };

    match state
        .choose_room_handler()
        .handle(session.handle(), ChooseRoomCommand { room_id })
        .await
    {
        Ok(_) => session.redirect(RESERVATION_PAGE),
        Err(err) => session.fail(err, HOME).await,
    }
}

/// GET /book-room?id=&s=&e= - start a booking for a known room and stay
pub async fn book_room(
    State(state): State<AppState>,
    session: VisitorSession,
    Query(params): Query<BookRoomParams>,
) -> Response {
    let Ok(room_id) = params.id.parse::<RoomId>() else {
        return session.fail(HttpFailure::redirect("Missing url parameter"), HOME).await;
    };
    let stay = match StayDates::parse(&params.s, &params.e) {
        Ok(stay) => stay,
        Err(err) => return session.fail(err, SEARCH_PAGE).await,
    };

    match state
        .book_room_handler()
        .handle(session.handle(), BookRoomCommand { room_id, stay })
        .await
    {
        Ok(_) => session.redirect(RESERVATION_PAGE),
        Err(err) => session.fail(err, HOME).await,
    }
}

/// GET /make-reservation - the guest details form
pub async fn show_reservation_form(
    State(state): State<AppState>,
    session: VisitorSession,
) -> Response {
    match state
        .show_reservation_form_handler()
        .handle(session.handle())
        .await
    {
        Ok(view) => session.respond(Json(ReservationFormResponse::from(view))),
        Err(err) => session.fail(err, HOME).await,
    }
}

/// POST /make-reservation - validate and commit the booking
pub async fn post_reservation(
    State(state): State<AppState>,
    session: VisitorSession,
    Form(form): Form<GuestForm>,
) -> Response {
    match state
        .commit_reservation_handler()
        .handle(session.handle(), form)
        .await
    {
        Ok(_) => session.redirect(SUMMARY_PAGE),
        Err(err) => session.fail(err, HOME).await,
    }
}

/// GET /reservation-summary - the committed booking, shown once
pub async fn reservation_summary(
    State(state): State<AppState>,
    session: VisitorSession,
) -> Response {
    match state
        .reservation_summary_handler()
        .handle(session.handle())
        .await
    {
        Ok(reservation) => session.respond(Json(ReservationResponse::from(&reservation))),
        Err(err) => session.fail(err, HOME).await,
    }
}
