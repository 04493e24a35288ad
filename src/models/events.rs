use serde::Serialize;

use super::Trip;

/// Broadcast after a confirmation claims seats on a trip.
#[derive(Debug, Clone, Serialize)]
pub struct SeatsSold {
    pub trip: Trip,
    pub seats: Vec<u8>,
}
