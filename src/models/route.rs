use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::engine::BookingError;

pub const CITIES: [&str; 10] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Chennai",
    "Kolkata",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

/// Canonical spelling of a served city, matched case-insensitively.
pub fn find_city(name: &str) -> Option<&'static str> {
    let name = name.trim();
    CITIES.into_iter().find(|c| c.eq_ignore_ascii_case(name))
}

/// A single departure: one route on one date. Seat inventory is kept per trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trip {
    pub from_city: String,
    pub to_city: String,
    pub date: NaiveDate,
}

impl Trip {
    pub fn new(
        from_city: &str,
        to_city: &str,
        date: NaiveDate,
        today: NaiveDate,
        window_days: i64,
    ) -> Result<Trip, BookingError> {
        let from = find_city(from_city)
            .ok_or_else(|| BookingError::InvalidRoute(format!("unknown city: {from_city}")))?;
        let to = find_city(to_city)
            .ok_or_else(|| BookingError::InvalidRoute(format!("unknown city: {to_city}")))?;
        if from == to {
            return Err(BookingError::InvalidRoute(
                "origin and destination must differ".to_string(),
            ));
        }

        let last = today + Duration::days(window_days);
        if date < today || date > last {
            return Err(BookingError::InvalidRoute(format!(
                "travel date must be between {today} and {last}"
            )));
        }

        Ok(Trip {
            from_city: from.to_string(),
            to_city: to.to_string(),
            date,
        })
    }

    /// The route a fresh session starts on.
    pub fn default_for(today: NaiveDate) -> Trip {
        Trip {
            from_city: CITIES[0].to_string(),
            to_city: CITIES[1].to_string(),
            date: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_valid_trip_normalizes_city_names() {
        let trip = Trip::new("pune", "JAIPUR", day("2025-11-01"), day("2025-10-20"), 90).unwrap();
        assert_eq!(trip.from_city, "Pune");
        assert_eq!(trip.to_city, "Jaipur");
    }

    #[test]
    fn test_same_city_rejected() {
        let err = Trip::new("Delhi", "delhi", day("2025-10-20"), day("2025-10-20"), 90).unwrap_err();
        assert!(matches!(err, BookingError::InvalidRoute(_)));
    }

    #[test]
    fn test_unknown_city_rejected() {
        let err = Trip::new("Atlantis", "Delhi", day("2025-10-20"), day("2025-10-20"), 90).unwrap_err();
        assert!(err.to_string().contains("Atlantis"));
    }

    #[test]
    fn test_date_window() {
        let today = day("2025-10-20");
        assert!(Trip::new("Mumbai", "Delhi", today, today, 90).is_ok());
        assert!(Trip::new("Mumbai", "Delhi", day("2026-01-18"), today, 90).is_ok());
        assert!(Trip::new("Mumbai", "Delhi", day("2026-01-19"), today, 90).is_err());
        assert!(Trip::new("Mumbai", "Delhi", day("2025-10-19"), today, 90).is_err());
    }
}
