use std::collections::HashMap;

use super::seat_map::SeatMap;
use super::BookingError;
use crate::models::Trip;

/// Sold seats for every trip this process has seen. Each trip's map is seeded
/// the first time it is looked at.
pub struct SeatInventory {
    seed: u64,
    sold_per_trip: usize,
    maps: HashMap<Trip, SeatMap>,
}

impl SeatInventory {
    pub fn new(seed: u64, sold_per_trip: usize) -> Self {
        Self {
            seed,
            sold_per_trip,
            maps: HashMap::new(),
        }
    }

    pub fn map_for(&mut self, trip: &Trip) -> &SeatMap {
        let (seed, sold) = (self.seed, self.sold_per_trip);
        self.maps
            .entry(trip.clone())
            .or_insert_with(|| SeatMap::seeded(seed, sold))
    }

    /// Fails with the first seat that has been sold since it was selected.
    pub fn ensure_available(&mut self, trip: &Trip, seats: &[u8]) -> Result<(), BookingError> {
        let map = self.map_for(trip);
        match seats.iter().find(|n| map.is_sold(**n)) {
            Some(n) => Err(BookingError::SeatUnavailable(*n)),
            None => Ok(()),
        }
    }

    pub fn commit(&mut self, trip: &Trip, seats: &[u8]) {
        self.map_for(trip);
        if let Some(map) = self.maps.get_mut(trip) {
            map.mark_sold(seats);
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn trip(to: &str) -> Trip {
        Trip {
            from_city: "Chennai".to_string(),
            to_city: to.to_string(),
            date: NaiveDate::from_ymd_opt(2025, 12, 24).unwrap(),
        }
    }

    #[test]
    fn test_maps_are_seeded_per_trip() {
        let mut inventory = SeatInventory::new(42, 6);
        let a = inventory.map_for(&trip("Pune")).clone();
        let b = inventory.map_for(&trip("Delhi")).clone();
        assert_eq!(a, SeatMap::seeded(42, 6));
        assert_eq!(a, b);
    }

    #[test]
    fn test_commit_claims_seats_on_one_trip_only() {
        let mut inventory = SeatInventory::new(1, 0);
        inventory.ensure_available(&trip("Pune"), &[4, 5]).unwrap();
        inventory.commit(&trip("Pune"), &[4, 5]);

        assert_eq!(
            inventory.ensure_available(&trip("Pune"), &[1, 5]),
            Err(BookingError::SeatUnavailable(5))
        );
        assert!(inventory.ensure_available(&trip("Delhi"), &[4, 5]).is_ok());
        assert_eq!(inventory.map_for(&trip("Pune")).available_count(), 28);
    }
}
