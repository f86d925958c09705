//! HTTP handlers for the admin reservation and calendar pages.

use axum::extract::{Form, Path, Query, State};
use axum::response::Response;
use axum::Json;
use chrono::Utc;

use crate::application::{
    ApplyCalendarEditsCommand, ReservationFilter, UpdateProfileCommand, UpdateReservationCommand,
};
use crate::domain::calendar::CalendarMonth;
use crate::domain::foundation::ReservationId;

use super::super::auth::RequireAdmin;
use super::super::booking::dto::ReservationResponse;
use super::super::state::AppState;
use super::super::visitor::{FlashKind, VisitorSession};
use super::dto::{CalendarEditsRequest, CalendarQuery, ProfileForm, UpdateReservationForm};

pub const DASHBOARD: &str = "/admin/dashboard";
pub const ALL_RESERVATIONS: &str = "/admin/reservations-all";
pub const PROFILE: &str = "/admin/profile";

/// GET /admin/dashboard - pending flash messages
pub async fn dashboard(session: VisitorSession) -> Response {
    let flashes = session.take_flashes().await;
    session.respond(Json(flashes))
}

async fn list(state: &AppState, session: &VisitorSession, filter: ReservationFilter) -> Response {
    match state.list_reservations_handler().handle(filter).await {
        Ok(reservations) => {
            let body: Vec<ReservationResponse> =
                reservations.iter().map(ReservationResponse::from).collect();
            session.respond(Json(body))
        }
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// GET /admin/reservations-all
pub async fn all_reservations(State(state): State<AppState>, session: VisitorSession) -> Response {
    list(&state, &session, ReservationFilter::All).await
}

/// GET /admin/reservations-new - reservations not yet processed
pub async fn new_reservations(State(state): State<AppState>, session: VisitorSession) -> Response {
    list(&state, &session, ReservationFilter::New).await
}

/// GET /admin/reservations/:id
pub async fn show_reservation(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(id): Path<ReservationId>,
) -> Response {
    match state.get_reservation_handler().handle(id).await {
        Ok(reservation) => session.respond(Json(ReservationResponse::from(&reservation))),
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// POST /admin/reservations/:id - edit guest fields
pub async fn update_reservation(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(id): Path<ReservationId>,
    Form(form): Form<UpdateReservationForm>,
) -> Response {
    let cmd = UpdateReservationCommand {
        id,
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
    };

    match state.update_reservation_handler().handle(cmd).await {
        Ok(_) => {
            session.flash(FlashKind::Flash, "Changes saved").await;
            session.redirect(ALL_RESERVATIONS)
        }
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// POST /admin/process-reservation/:id
pub async fn process_reservation(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(id): Path<ReservationId>,
) -> Response {
    match state.process_reservation_handler().handle(id).await {
        Ok(()) => {
            session.flash(FlashKind::Flash, "Reservation marked as processed").await;
            session.redirect(ALL_RESERVATIONS)
        }
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// POST /admin/delete-reservation/:id
pub async fn delete_reservation(
    State(state): State<AppState>,
    session: VisitorSession,
    Path(id): Path<ReservationId>,
) -> Response {
    match state.delete_reservation_handler().handle(id).await {
        Ok(()) => {
            session.flash(FlashKind::Flash, "Reservation deleted").await;
            session.redirect(ALL_RESERVATIONS)
        }
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// GET /admin/reservations-calendar?y=&m=
pub async fn reservations_calendar(
    State(state): State<AppState>,
    session: VisitorSession,
    Query(query): Query<CalendarQuery>,
) -> Response {
    let month = match (query.y, query.m) {
        (Some(year), Some(month)) => match CalendarMonth::new(year, month) {
            Ok(month) => month,
            Err(err) => return session.fail(err, DASHBOARD).await,
        },
        _ => CalendarMonth::containing(Utc::now().date_naive()),
    };

    match state
        .build_calendar_handler()
        .handle(session.handle(), month)
        .await
    {
        Ok(view) => session.respond(Json(view)),
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}

/// POST /admin/reservations-calendar - reconcile owner blocks
pub async fn post_reservations_calendar(
    State(state): State<AppState>,
    session: VisitorSession,
    Json(request): Json<CalendarEditsRequest>,
) -> Response {
    let month = match CalendarMonth::new(request.y, request.m) {
        Ok(month) => month,
        Err(err) => return session.fail(err, DASHBOARD).await,
    };
    let back = format!(
        "/admin/reservations-calendar?y={}&m={}",
        month.year(),
        month.month()
    );

    let cmd = ApplyCalendarEditsCommand {
        month,
        edits: request.edits,
    };
    match state
        .apply_calendar_edits_handler()
        .handle(session.handle(), cmd)
        .await
    {
        Ok(summary) => {
            tracing::info!(
                deleted = summary.deleted,
                inserted = summary.inserted,
                "Calendar changes saved"
            );
            session.flash(FlashKind::Flash, "Changes saved").await;
            session.redirect(&back)
        }
        Err(err) => session.fail(err, &back).await,
    }
}

/// GET /admin/profile - the logged-in user
pub async fn show_profile(RequireAdmin(user): RequireAdmin, session: VisitorSession) -> Response {
    session.respond(Json(user))
}

/// POST /admin/profile - edit own name and email
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAdmin(user): RequireAdmin,
    session: VisitorSession,
    Form(form): Form<ProfileForm>,
) -> Response {
    let cmd = UpdateProfileCommand {
        user_id: user.id,
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
    };

    match state.update_profile_handler().handle(cmd).await {
        Ok(_) => {
            session.flash(FlashKind::Flash, "Profile saved").await;
            session.redirect(PROFILE)
        }
        Err(err) => session.fail(err, DASHBOARD).await,
    }
}
