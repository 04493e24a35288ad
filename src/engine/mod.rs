//! Seat selection and pricing. Nothing in here performs I/O.

pub mod builder;
pub mod commands;
pub mod discount;
pub mod ids;
pub mod inventory;
pub mod seat_map;
pub mod selection;

pub use builder::finalize;
pub use commands::{execute, Command};
pub use discount::{DiscountCatalog, DiscountCode, DiscountResult};
pub use ids::{IdSource, RandomIds, SequentialIds};
pub use inventory::SeatInventory;
pub use seat_map::{SeatMap, SeatMapView};
pub use selection::{AppliedDiscount, AttemptPhase, BookingAttempt, PriceQuote, MAX_PASSENGERS};

/// A rejected booking command. The attempt it was issued against is left as it was.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BookingError {
    #[error("seat {0} is already sold")]
    SeatUnavailable(u8),

    #[error("you can only select {limit} seat(s)")]
    CapacityExceeded { limit: u8 },

    #[error("seat {0} is not selected")]
    NotSelected(u8),

    #[error("invalid discount code: {0}")]
    InvalidCode(String),

    #[error("please select {required} seat(s) to continue ({selected} selected)")]
    IncompleteSelection { selected: usize, required: u8 },

    #[error("seat {0} does not exist")]
    InvalidSeat(u32),

    #[error("passenger count must be between 1 and {max}, got {got}")]
    InvalidPassengerCount { got: u32, max: u8 },

    #[error("invalid route: {0}")]
    InvalidRoute(String),
}

impl BookingError {
    pub fn kind(&self) -> &'static str {
        match self {
            BookingError::SeatUnavailable(_) => "seat_unavailable",
            BookingError::CapacityExceeded { .. } => "capacity_exceeded",
            BookingError::NotSelected(_) => "not_selected",
            BookingError::InvalidCode(_) => "invalid_code",
            BookingError::IncompleteSelection { .. } => "incomplete_selection",
            BookingError::InvalidSeat(_) => "invalid_seat",
            BookingError::InvalidPassengerCount { .. } => "invalid_passenger_count",
            BookingError::InvalidRoute(_) => "invalid_route",
        }
    }
}
