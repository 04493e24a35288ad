pub mod config;
pub mod db;
pub mod engine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::http::{header, Method};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]);

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/api/catalog", get(handlers::catalog::catalog))
        .route("/api/signup", post(handlers::auth::signup))
        .route("/api/login", post(handlers::auth::login))
        .route("/api/logout", post(handlers::auth::logout))
        .route("/api/account", get(handlers::account::account))
        .route("/api/bookings", get(handlers::account::bookings))
        .route("/api/booking", get(handlers::booking::current))
        .route("/api/booking/route", post(handlers::booking::set_route))
        .route(
            "/api/booking/passengers",
            post(handlers::booking::set_passengers),
        )
        .route("/api/booking/class", post(handlers::booking::set_class))
        .route(
            "/api/booking/seats/:number/select",
            post(handlers::booking::select_seat),
        )
        .route(
            "/api/booking/seats/:number/deselect",
            post(handlers::booking::deselect_seat),
        )
        .route(
            "/api/booking/discount",
            post(handlers::booking::apply_discount),
        )
        .route("/api/booking/reset", post(handlers::booking::reset))
        .route("/api/booking/confirm", post(handlers::booking::confirm))
        .route("/api/seats/events", get(handlers::events::seat_events))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
