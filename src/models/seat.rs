use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

pub const TOTAL_SEATS: u8 = 30;
pub const SEATS_PER_DECK: u8 = 15;
pub const SEATS_PER_ROW: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Deck {
    Lower,
    Upper,
}

impl Deck {
    pub const ALL: [Deck; 2] = [Deck::Lower, Deck::Upper];

    pub fn of(number: u8) -> Deck {
        if number <= SEATS_PER_DECK {
            Deck::Lower
        } else {
            Deck::Upper
        }
    }

    pub fn seat_numbers(self) -> RangeInclusive<u8> {
        match self {
            Deck::Lower => 1..=SEATS_PER_DECK,
            Deck::Upper => SEATS_PER_DECK + 1..=TOTAL_SEATS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Deck::Lower => "Lower deck",
            Deck::Upper => "Upper deck",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Male,
    Female,
}

/// Every third seat is reserved for women.
pub fn classify(number: u8) -> Zone {
    if number % 3 == 0 {
        Zone::Female
    } else {
        Zone::Male
    }
}

pub fn is_valid_seat(number: u8) -> bool {
    (1..=TOTAL_SEATS).contains(&number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    Sold,
    Available,
    Selected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Seat {
    pub number: u8,
    pub deck: Deck,
    pub zone: Zone,
    /// 1-based row within the deck.
    pub row: u8,
    /// 1-based position within the row.
    pub column: u8,
}

impl Seat {
    pub fn new(number: u8) -> Option<Seat> {
        if !is_valid_seat(number) {
            return None;
        }
        let index = (number - 1) % SEATS_PER_DECK;
        Some(Seat {
            number,
            deck: Deck::of(number),
            zone: classify(number),
            row: index / SEATS_PER_ROW + 1,
            column: index % SEATS_PER_ROW + 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_every_seat() {
        for n in 1..=TOTAL_SEATS {
            let zone = classify(n);
            assert_eq!(zone == Zone::Female, n % 3 == 0, "seat {n}");
            assert_eq!(classify(n), zone);
        }
        assert_eq!(classify(3), Zone::Female);
        assert_eq!(classify(7), Zone::Male);
    }

    #[test]
    fn test_decks_split_at_fifteen() {
        assert_eq!(Deck::of(1), Deck::Lower);
        assert_eq!(Deck::of(15), Deck::Lower);
        assert_eq!(Deck::of(16), Deck::Upper);
        assert_eq!(Deck::of(30), Deck::Upper);
        assert_eq!(Deck::Lower.seat_numbers().count(), 15);
        assert_eq!(Deck::Upper.seat_numbers().count(), 15);
    }

    #[test]
    fn test_seat_position() {
        let seat = Seat::new(1).unwrap();
        assert_eq!((seat.row, seat.column), (1, 1));

        let seat = Seat::new(15).unwrap();
        assert_eq!((seat.row, seat.column), (5, 3));

        let seat = Seat::new(17).unwrap();
        assert_eq!(seat.deck, Deck::Upper);
        assert_eq!((seat.row, seat.column), (1, 2));
    }

    #[test]
    fn test_out_of_range_seats() {
        assert!(Seat::new(0).is_none());
        assert!(Seat::new(31).is_none());
        assert!(!is_valid_seat(0));
        assert!(is_valid_seat(30));
    }
}
