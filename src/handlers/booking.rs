use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::bearer_token;
use crate::engine::{
    self, AttemptPhase, BookingAttempt, BookingError, Command, PriceQuote, SeatMap, SeatMapView,
};
use crate::errors::AppError;
use crate::models::{BusClass, Trip};
use crate::services::checkout::{self, CheckoutError, Confirmation};
use crate::services::session::Session;
use crate::state::{lock, AppState};

/// Everything the booking screen renders.
#[derive(Serialize)]
pub struct BookingView {
    pub trip: Trip,
    pub passenger_count: u8,
    pub bus_class: BusClass,
    pub phase: AttemptPhase,
    pub selected_seats: Vec<u8>,
    pub seats_remaining: u8,
    pub complete: bool,
    pub seat_map: SeatMapView,
    pub pricing: PriceQuote,
}

impl BookingView {
    fn of(session: &Session, map: &SeatMap) -> Self {
        let attempt = &session.attempt;
        Self {
            trip: session.trip.clone(),
            passenger_count: attempt.passenger_count(),
            bus_class: attempt.bus_class(),
            phase: attempt.phase(),
            selected_seats: attempt.selected().iter().copied().collect(),
            seats_remaining: attempt.seats_remaining(),
            complete: attempt.is_complete(),
            seat_map: map.view(attempt.selected(), attempt.bus_class()),
            pricing: attempt.quote(),
        }
    }
}

/// Runs `command` against the caller's attempt. Sessions are always locked
/// before the inventory.
fn run_command(
    state: &AppState,
    headers: &HeaderMap,
    command: Option<Command>,
) -> Result<Json<BookingView>, AppError> {
    let token = bearer_token(headers)?;
    let mut sessions = lock(&state.sessions);
    let session = sessions.get_mut(token).ok_or(AppError::Unauthorized)?;
    let mut inventory = lock(&state.inventory);
    let map = inventory.map_for(&session.trip);

    if session.attempt.release_sold(map) {
        tracing::info!(username = %session.username, "released seats sold to another session");
    }

    if let Some(command) = command {
        match engine::execute(&session.attempt, map, &state.catalog, command) {
            Ok(next) => session.attempt = next,
            Err(e) => {
                tracing::debug!(username = %session.username, error = %e, "booking command rejected");
                return Err(e.into());
            }
        }
    }

    Ok(Json(BookingView::of(session, map)))
}

// GET /api/booking
pub async fn current(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, None)
}

#[derive(Deserialize)]
pub struct RouteRequest {
    pub from_city: String,
    pub to_city: String,
    pub date: NaiveDate,
}

// POST /api/booking/route
pub async fn set_route(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<RouteRequest>,
) -> Result<Json<BookingView>, AppError> {
    {
        let token = bearer_token(&headers)?;
        let mut sessions = lock(&state.sessions);
        let session = sessions.get_mut(token).ok_or(AppError::Unauthorized)?;

        let today = Local::now().date_naive();
        session.trip = Trip::new(
            &req.from_city,
            &req.to_city,
            req.date,
            today,
            state.config.booking_window_days,
        )?;
        session.attempt.reset();
    }

    run_command(&state, &headers, None)
}

#[derive(Deserialize)]
pub struct PassengersRequest {
    pub count: u32,
}

// POST /api/booking/passengers
pub async fn set_passengers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PassengersRequest>,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, Some(Command::SetPassengerCount(req.count)))
}

#[derive(Deserialize)]
pub struct ClassRequest {
    pub bus_class: String,
}

// POST /api/booking/class
pub async fn set_class(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<ClassRequest>,
) -> Result<Json<BookingView>, AppError> {
    let bus_class = BusClass::parse(&req.bus_class)
        .ok_or_else(|| AppError::Validation(format!("unknown bus class: {}", req.bus_class)))?;
    run_command(&state, &headers, Some(Command::SetBusClass(bus_class)))
}

// POST /api/booking/seats/:number/select
pub async fn select_seat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(number): Path<u32>,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, Some(Command::Select(number)))
}

// POST /api/booking/seats/:number/deselect
pub async fn deselect_seat(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(number): Path<u32>,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, Some(Command::Deselect(number)))
}

#[derive(Deserialize)]
pub struct DiscountRequest {
    pub code: String,
}

// POST /api/booking/discount
pub async fn apply_discount(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<DiscountRequest>,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, Some(Command::ApplyDiscount(req.code)))
}

// POST /api/booking/reset
pub async fn reset(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<BookingView>, AppError> {
    run_command(&state, &headers, Some(Command::Reset))
}

// POST /api/booking/confirm
pub async fn confirm(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Confirmation>, AppError> {
    let token = bearer_token(&headers)?.to_string();
    let (username, trip, attempt) = {
        let sessions = lock(&state.sessions);
        let session = sessions.get(&token).ok_or(AppError::Unauthorized)?;
        (
            session.username.clone(),
            session.trip.clone(),
            session.attempt.clone(),
        )
    };

    let confirmation = match checkout::confirm(&state, &username, &trip, &attempt).await {
        Ok(confirmation) => confirmation,
        Err(e) => {
            if matches!(e, CheckoutError::Booking(BookingError::SeatUnavailable(_))) {
                // Drops the seats lost to another session from this attempt.
                let _ = run_command(&state, &headers, None);
            }
            return Err(e.into());
        }
    };

    if let Some(session) = lock(&state.sessions).get_mut(&token) {
        session.attempt = BookingAttempt::new();
    }

    Ok(Json(confirmation))
}
