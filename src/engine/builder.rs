use chrono::NaiveDateTime;

use super::ids::{self, IdSource};
use super::selection::BookingAttempt;
use super::BookingError;
use crate::models::{Booking, PaymentMode, Trip};

/// Turns a fully allocated attempt into the record that gets persisted.
///
/// Holds no state; the attempt itself is left for the caller to discard once
/// the booking has been stored.
pub fn finalize(
    attempt: &BookingAttempt,
    trip: &Trip,
    ids: &dyn IdSource,
    now: NaiveDateTime,
) -> Result<Booking, BookingError> {
    if !attempt.is_complete() {
        return Err(BookingError::IncompleteSelection {
            selected: attempt.selected().len(),
            required: attempt.passenger_count(),
        });
    }

    let discount_percentage = attempt
        .valid_discount()
        .map(|d| d.percentage)
        .unwrap_or(0);

    Ok(Booking {
        booking_id: ids::booking_id(ids),
        from_city: trip.from_city.clone(),
        to_city: trip.to_city.clone(),
        date: trip.date,
        passenger_count: attempt.passenger_count(),
        seats: attempt.selected().iter().copied().collect(),
        bus_class: attempt.bus_class(),
        final_amount: attempt.final_amount(),
        discount_percentage,
        bus_number: ids::bus_number(ids),
        driver_contact: ids::driver_contact(ids),
        payment_mode: PaymentMode::CashOnBoarding,
        created_at: now,
    })
}
