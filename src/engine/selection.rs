use std::collections::BTreeSet;

use serde::Serialize;

use super::discount::DiscountCatalog;
use super::seat_map::SeatMap;
use super::BookingError;
use crate::models::{BusClass, Money};

pub const MAX_PASSENGERS: u8 = 6;

/// A discount as computed against one exact seat-set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedDiscount {
    pub code: String,
    pub percentage: u8,
    pub subtotal: Money,
    pub discounted_amount: Money,
    #[serde(skip)]
    seats: BTreeSet<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptPhase {
    Empty,
    Selecting,
    Priced,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub price_per_seat: Money,
    pub seat_count: usize,
    pub subtotal: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_code: Option<String>,
    pub discount_percentage: u8,
    pub savings: Money,
    pub final_amount: Money,
}

/// The in-progress booking of one session.
///
/// Invariants: no selected seat is sold, at most `passenger_count` seats are
/// selected, and a discount never outlives the seat-set it was priced on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingAttempt {
    selected: BTreeSet<u8>,
    passenger_count: u8,
    bus_class: BusClass,
    discount: Option<AppliedDiscount>,
}

impl Default for BookingAttempt {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingAttempt {
    pub fn new() -> Self {
        Self {
            selected: BTreeSet::new(),
            passenger_count: 1,
            bus_class: BusClass::default(),
            discount: None,
        }
    }

    pub fn selected(&self) -> &BTreeSet<u8> {
        &self.selected
    }

    pub fn passenger_count(&self) -> u8 {
        self.passenger_count
    }

    pub fn bus_class(&self) -> BusClass {
        self.bus_class
    }

    pub fn discount(&self) -> Option<&AppliedDiscount> {
        self.discount.as_ref()
    }

    pub fn select(&mut self, map: &SeatMap, number: u8) -> Result<(), BookingError> {
        map.seat(number)?;
        if map.is_sold(number) {
            return Err(BookingError::SeatUnavailable(number));
        }
        if self.selected.contains(&number) {
            return Ok(());
        }
        if self.selected.len() >= usize::from(self.passenger_count) {
            return Err(BookingError::CapacityExceeded {
                limit: self.passenger_count,
            });
        }

        self.selected.insert(number);
        self.discount = None;
        Ok(())
    }

    pub fn deselect(&mut self, number: u8) -> Result<(), BookingError> {
        if !self.selected.remove(&number) {
            return Err(BookingError::NotSelected(number));
        }
        self.discount = None;
        Ok(())
    }

    pub fn reset(&mut self) {
        self.selected.clear();
        self.discount = None;
    }

    /// Drops selected seats that `map` now reports as sold, along with any
    /// discount priced on them. Returns whether anything was released.
    pub fn release_sold(&mut self, map: &SeatMap) -> bool {
        let before = self.selected.len();
        self.selected.retain(|n| !map.is_sold(*n));
        if self.selected.len() == before {
            return false;
        }
        self.discount = None;
        true
    }

    pub fn set_passenger_count(&mut self, count: u8) -> Result<(), BookingError> {
        if !(1..=MAX_PASSENGERS).contains(&count) {
            return Err(BookingError::InvalidPassengerCount {
                got: count.into(),
                max: MAX_PASSENGERS,
            });
        }
        self.passenger_count = count;
        self.reset();
        Ok(())
    }

    /// Seats are kept; the discount is dropped because its subtotal no longer applies.
    pub fn set_bus_class(&mut self, bus_class: BusClass) {
        if bus_class != self.bus_class {
            self.bus_class = bus_class;
            self.discount = None;
        }
    }

    pub fn subtotal(&self) -> Money {
        self.bus_class.price_per_seat().times(self.selected.len())
    }

    /// Prices `code` against the undiscounted subtotal. Re-applying the same
    /// code yields the same amount; discounts never stack.
    pub fn apply_discount(
        &mut self,
        catalog: &DiscountCatalog,
        code: &str,
    ) -> Result<&AppliedDiscount, BookingError> {
        let result = catalog.apply_code(code, self.subtotal())?;
        let applied = AppliedDiscount {
            code: result.code,
            percentage: result.percentage,
            subtotal: result.subtotal,
            discounted_amount: result.discounted_amount,
            seats: self.selected.clone(),
        };
        Ok(&*self.discount.insert(applied))
    }

    /// The discount, if it was priced on exactly the current seats and fare.
    pub fn valid_discount(&self) -> Option<&AppliedDiscount> {
        self.discount
            .as_ref()
            .filter(|d| d.seats == self.selected && d.subtotal == self.subtotal())
    }

    pub fn final_amount(&self) -> Money {
        self.valid_discount()
            .map(|d| d.discounted_amount)
            .unwrap_or_else(|| self.subtotal())
    }

    pub fn is_complete(&self) -> bool {
        !self.selected.is_empty() && self.selected.len() == usize::from(self.passenger_count)
    }

    pub fn seats_remaining(&self) -> u8 {
        self.passenger_count
            .saturating_sub(u8::try_from(self.selected.len()).unwrap_or(u8::MAX))
    }

    pub fn phase(&self) -> AttemptPhase {
        if self.valid_discount().is_some() {
            AttemptPhase::Priced
        } else if self.selected.is_empty() {
            AttemptPhase::Empty
        } else {
            AttemptPhase::Selecting
        }
    }

    pub fn quote(&self) -> PriceQuote {
        let subtotal = self.subtotal();
        let discount = self.valid_discount();
        let final_amount = self.final_amount();
        PriceQuote {
            price_per_seat: self.bus_class.price_per_seat(),
            seat_count: self.selected.len(),
            subtotal,
            discount_code: discount.map(|d| d.code.clone()),
            discount_percentage: discount.map(|d| d.percentage).unwrap_or(0),
            savings: subtotal - final_amount,
            final_amount,
        }
    }
}
