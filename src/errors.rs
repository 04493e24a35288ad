use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::engine::BookingError;
use crate::services::auth::AuthError;
use crate::services::checkout::CheckoutError;
use crate::services::store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    Validation(String),
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Booking(e) => e.kind(),
            AppError::Store(e) => e.kind(),
            AppError::Auth(e) => e.kind(),
            AppError::Checkout(e) => e.kind(),
            AppError::Unauthorized => "unauthorized",
            AppError::Validation(_) => "validation",
        }
    }

    fn status(&self) -> StatusCode {
        match self.kind() {
            "seat_unavailable" | "capacity_exceeded" | "not_selected" | "username_taken"
            | "email_taken" => StatusCode::CONFLICT,
            "invalid_code" | "incomplete_selection" => StatusCode::UNPROCESSABLE_ENTITY,
            "invalid_seat" | "invalid_passenger_count" | "invalid_route" | "missing_fields"
            | "password_mismatch" | "validation" => StatusCode::BAD_REQUEST,
            "unauthorized" | "unknown_username" | "incorrect_password" => StatusCode::UNAUTHORIZED,
            "account_not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, kind = self.kind(), "request failed");
        }

        let body = serde_json::json!({ "error": self.to_string(), "kind": self.kind() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_per_kind() {
        let cases = [
            (AppError::from(BookingError::SeatUnavailable(4)), StatusCode::CONFLICT),
            (AppError::from(BookingError::NotSelected(9)), StatusCode::CONFLICT),
            (
                AppError::from(BookingError::InvalidCode("NOTREAL".to_string())),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (AppError::from(BookingError::InvalidSeat(31)), StatusCode::BAD_REQUEST),
            (AppError::from(AuthError::IncorrectPassword), StatusCode::UNAUTHORIZED),
            (AppError::from(StoreError::EmailTaken), StatusCode::CONFLICT),
            (
                AppError::from(CheckoutError::Persistence("disk full".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }
}
