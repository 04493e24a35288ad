use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Local;
use serde::Deserialize;

use super::bearer_token;
use crate::errors::AppError;
use crate::models::Trip;
use crate::services::auth::{self, SignupRequest};
use crate::state::{lock, AppState};

// POST /api/signup
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SignupRequest>,
) -> Result<(StatusCode, Json<serde_json::Value>), AppError> {
    let account = auth::signup(state.store.as_ref(), req, Local::now().naive_local())?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({
            "username": account.username,
            "message": "Account created successfully",
        })),
    ))
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

// POST /api/login
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    let account = auth::login(state.store.as_ref(), &req.username, &req.password)?;

    let now = Local::now().naive_local();
    let token = lock(&state.sessions).open(&account.username, Trip::default_for(now.date()), now);

    Ok(Json(serde_json::json!({
        "token": token,
        "username": account.username,
    })))
}

// POST /api/logout
pub async fn logout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>, AppError> {
    let token = bearer_token(&headers)?;
    let session = lock(&state.sessions)
        .close(token)
        .ok_or(AppError::Unauthorized)?;

    tracing::info!(username = %session.username, "logout");
    Ok(Json(serde_json::json!({"ok": true})))
}
