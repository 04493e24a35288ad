use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, PoisonError};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of the cosmetic numbers printed on a booking.
pub trait IdSource: Send + Sync {
    /// A number drawn from `range`.
    fn next_id(&self, range: RangeInclusive<u32>) -> u32;
}

/// Uniform draws from a `StdRng`.
pub struct RandomIds {
    rng: Mutex<StdRng>,
}

impl RandomIds {
    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl IdSource for RandomIds {
    fn next_id(&self, range: RangeInclusive<u32>) -> u32 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(range)
    }
}

/// Counts up from zero, offset into each requested range. Deterministic.
#[derive(Default)]
pub struct SequentialIds {
    next: AtomicU32,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdSource for SequentialIds {
    fn next_id(&self, range: RangeInclusive<u32>) -> u32 {
        let n = self.next.fetch_add(1, Ordering::SeqCst);
        let (start, end) = range.into_inner();
        let span = end.saturating_sub(start).saturating_add(1);
        start + n % span
    }
}

pub fn booking_id(ids: &dyn IdSource) -> String {
    format!("BK{}", ids.next_id(100_000..=999_999))
}

pub fn bus_number(ids: &dyn IdSource) -> String {
    format!("BUS-{}", ids.next_id(1_000..=9_999))
}

pub fn driver_contact(ids: &dyn IdSource) -> String {
    let head = ids.next_id(70_000..=99_999);
    let tail = ids.next_id(10_000..=99_999);
    format!("+91-{head}-{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids() {
        let ids = SequentialIds::new();
        assert_eq!(booking_id(&ids), "BK100000");
        assert_eq!(bus_number(&ids), "BUS-1001");
        assert_eq!(driver_contact(&ids), "+91-70002-10003");
    }

    #[test]
    fn test_random_ids_stay_in_range() {
        let ids = RandomIds::seeded(7);
        for _ in 0..500 {
            let id = booking_id(&ids);
            let n: u32 = id.strip_prefix("BK").unwrap().parse().unwrap();
            assert!((100_000..=999_999).contains(&n));

            let bus = bus_number(&ids);
            assert_eq!(bus.len(), "BUS-0000".len());

            let driver = driver_contact(&ids);
            let parts: Vec<&str> = driver.split('-').collect();
            assert_eq!(parts[0], "+91");
            assert!((70_000..=99_999).contains(&parts[1].parse::<u32>().unwrap()));
            assert!((10_000..=99_999).contains(&parts[2].parse::<u32>().unwrap()));
        }
    }

    #[test]
    fn test_seeded_random_ids_repeat() {
        let a = RandomIds::seeded(99);
        let b = RandomIds::seeded(99);
        assert_eq!(booking_id(&a), booking_id(&b));
        assert_eq!(driver_contact(&a), driver_contact(&b));
    }
}
