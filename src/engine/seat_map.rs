use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

use super::BookingError;
use crate::models::seat::{is_valid_seat, SEATS_PER_ROW, TOTAL_SEATS};
use crate::models::{BusClass, Deck, Money, Seat, SeatStatus, Zone};

/// The fixed two-deck sleeper layout plus the set of seats already sold.
///
/// The sold-set only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeatMap {
    sold: BTreeSet<u8>,
}

impl SeatMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sold(seats: impl IntoIterator<Item = u8>) -> Self {
        Self {
            sold: seats.into_iter().filter(|n| is_valid_seat(*n)).collect(),
        }
    }

    /// Marks `sold_count` seats as sold, chosen by an RNG seeded with `seed`.
    /// The same seed always yields the same seats.
    pub fn seeded(seed: u64, sold_count: usize) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let count = sold_count.min(usize::from(TOTAL_SEATS));
        let sold = rand::seq::index::sample(&mut rng, usize::from(TOTAL_SEATS), count)
            .into_iter()
            .map(|i| i as u8 + 1)
            .collect();
        Self { sold }
    }

    /// Every seat of the layout, lower deck first.
    pub fn topology() -> impl Iterator<Item = Seat> {
        (1..=TOTAL_SEATS).filter_map(Seat::new)
    }

    pub fn seat(&self, number: u8) -> Result<Seat, BookingError> {
        Seat::new(number).ok_or(BookingError::InvalidSeat(number.into()))
    }

    pub fn is_sold(&self, number: u8) -> bool {
        self.sold.contains(&number)
    }

    pub fn sold(&self) -> &BTreeSet<u8> {
        &self.sold
    }

    pub fn available_count(&self) -> usize {
        usize::from(TOTAL_SEATS) - self.sold.len()
    }

    pub fn status(&self, number: u8, selected: &BTreeSet<u8>) -> SeatStatus {
        if self.is_sold(number) {
            SeatStatus::Sold
        } else if selected.contains(&number) {
            SeatStatus::Selected
        } else {
            SeatStatus::Available
        }
    }

    pub(crate) fn mark_sold(&mut self, seats: &[u8]) {
        self.sold
            .extend(seats.iter().copied().filter(|n| is_valid_seat(*n)));
    }

    pub fn view(&self, selected: &BTreeSet<u8>, bus_class: BusClass) -> SeatMapView {
        let price = bus_class.price_per_seat();
        let decks = Deck::ALL
            .into_iter()
            .map(|deck| {
                let seats: Vec<SeatView> = deck
                    .seat_numbers()
                    .filter_map(Seat::new)
                    .map(|seat| {
                        let status = self.status(seat.number, selected);
                        SeatView {
                            number: seat.number,
                            zone: seat.zone,
                            status,
                            price: (status != SeatStatus::Sold).then_some(price),
                        }
                    })
                    .collect();
                DeckView {
                    deck,
                    label: deck.label(),
                    rows: seats
                        .chunks(usize::from(SEATS_PER_ROW))
                        .map(<[SeatView]>::to_vec)
                        .collect(),
                }
            })
            .collect();

        SeatMapView {
            decks,
            total_seats: TOTAL_SEATS,
            available: self.available_count(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatMapView {
    pub decks: Vec<DeckView>,
    pub total_seats: u8,
    pub available: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DeckView {
    pub deck: Deck,
    pub label: &'static str,
    pub rows: Vec<Vec<SeatView>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub number: u8,
    pub zone: Zone,
    pub status: SeatStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Money>,
}
