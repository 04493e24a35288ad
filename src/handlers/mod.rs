pub mod account;
pub mod auth;
pub mod booking;
pub mod catalog;
pub mod events;
pub mod health;

use axum::http::HeaderMap;

use crate::errors::AppError;
use crate::state::{lock, AppState};

/// The session token from `Authorization: Bearer <token>`.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AppError::Unauthorized)
}

pub(crate) fn session_username(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    let token = bearer_token(headers)?;
    lock(&state.sessions)
        .get(token)
        .map(|s| s.username.clone())
        .ok_or(AppError::Unauthorized)
}
