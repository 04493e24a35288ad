pub mod account;
pub mod booking;
pub mod events;
pub mod fare;
pub mod money;
pub mod route;
pub mod seat;

pub use account::{Account, Credential};
pub use booking::{Booking, PaymentMode};
pub use events::SeatsSold;
pub use fare::BusClass;
pub use money::Money;
pub use route::{Trip, CITIES};
pub use seat::{classify, Deck, Seat, SeatStatus, Zone};

/// `YYYY-MM-DD HH:MM:SS`, the timestamp layout used in every stored record.
pub mod timestamp {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d %H:%M:%S";

    pub fn serialize<S: Serializer>(dt: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&dt.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}
