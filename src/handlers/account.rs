use std::sync::Arc;

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use super::session_username;
use crate::errors::AppError;
use crate::models::{timestamp, Booking};
use crate::state::AppState;

const RECENT_BOOKINGS: usize = 3;

#[derive(Serialize)]
pub struct AccountView {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub member_since: String,
    pub booking_count: usize,
    pub recent_bookings: Vec<Booking>,
}

// GET /api/account
pub async fn account(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<AccountView>, AppError> {
    let username = session_username(&state, &headers)?;
    let account = state.store.find_account(&username)?;

    Ok(Json(AccountView {
        booking_count: account.bookings.len(),
        recent_bookings: account
            .bookings
            .iter()
            .rev()
            .take(RECENT_BOOKINGS)
            .cloned()
            .collect(),
        member_since: account.created_at.format(timestamp::FORMAT).to_string(),
        username: account.username,
        email: account.email,
        phone: account.phone,
    }))
}

// GET /api/bookings, newest first
pub async fn bookings(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Booking>>, AppError> {
    let username = session_username(&state, &headers)?;
    let mut bookings = state.store.find_account(&username)?.bookings;
    bookings.reverse();
    Ok(Json(bookings))
}
