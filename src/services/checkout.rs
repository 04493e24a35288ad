use std::sync::Arc;

use serde::Serialize;

use crate::engine::{self, BookingAttempt, BookingError};
use crate::models::{Booking, SeatsSold, Trip};
use crate::services::notify::NotifyOutcome;
use crate::services::store::StoreError;
use crate::state::{lock, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationStatus {
    Confirmed,
    EmailPending,
}

#[derive(Debug, Clone, Serialize)]
pub struct Confirmation {
    pub booking: Booking,
    pub status: ConfirmationStatus,
    pub email_message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error(transparent)]
    Booking(#[from] BookingError),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("could not save booking: {0}")]
    Persistence(String),
}

impl CheckoutError {
    pub fn kind(&self) -> &'static str {
        match self {
            CheckoutError::Booking(e) => e.kind(),
            CheckoutError::AccountNotFound(_) => "account_not_found",
            CheckoutError::Persistence(_) => "persistence_failure",
        }
    }
}

impl From<StoreError> for CheckoutError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AccountNotFound(username) => CheckoutError::AccountNotFound(username),
            other => CheckoutError::Persistence(other.to_string()),
        }
    }
}

/// Finalizes the attempt, claims its seats and stores the booking, then sends
/// the confirmation email.
///
/// The seat claim and the write happen under the inventory lock: if the write
/// fails nothing is claimed. A failed email only downgrades the status.
pub async fn confirm(
    state: &Arc<AppState>,
    username: &str,
    trip: &Trip,
    attempt: &BookingAttempt,
) -> Result<Confirmation, CheckoutError> {
    let now = chrono::Local::now().naive_local();
    let booking = engine::finalize(attempt, trip, state.ids.as_ref(), now)?;

    {
        let mut inventory = lock(&state.inventory);
        inventory.ensure_available(trip, &booking.seats)?;
        if let Err(e) = state.store.append_booking(username, &booking) {
            tracing::error!(
                username = %username,
                booking_id = %booking.booking_id,
                error = %e,
                "failed to persist booking"
            );
            return Err(e.into());
        }
        inventory.commit(trip, &booking.seats);
    }

    tracing::info!(
        username = %username,
        booking_id = %booking.booking_id,
        seats = ?booking.seats,
        amount = %booking.final_amount,
        "booking confirmed"
    );

    // No subscribers is fine.
    let _ = state.seat_events.send(SeatsSold {
        trip: trip.clone(),
        seats: booking.seats.clone(),
    });

    let outcome = match state.store.find_account(username) {
        Ok(account) => state.notifier.notify(&account.email, &booking).await,
        Err(e) => {
            tracing::warn!(username = %username, error = %e, "could not look up email for confirmation");
            NotifyOutcome::failed(e.to_string())
        }
    };

    let (status, email_message) = match outcome.into_result() {
        Ok(message) => (ConfirmationStatus::Confirmed, message),
        Err(failure) => {
            tracing::warn!(booking_id = %booking.booking_id, error = %failure, "confirmation email not sent");
            (ConfirmationStatus::EmailPending, failure.0)
        }
    };

    Ok(Confirmation {
        booking,
        status,
        email_message,
    })
}
