use super::discount::DiscountCatalog;
use super::seat_map::SeatMap;
use super::selection::{BookingAttempt, MAX_PASSENGERS};
use super::BookingError;
use crate::models::BusClass;

/// A request against an attempt. Numbers arrive as sent by the client and are
/// range-checked when the command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Select(u32),
    Deselect(u32),
    SetPassengerCount(u32),
    SetBusClass(BusClass),
    ApplyDiscount(String),
    Reset,
}

fn seat_number(number: u32) -> Result<u8, BookingError> {
    u8::try_from(number).map_err(|_| BookingError::InvalidSeat(number))
}

/// Applies `command` to a copy of `attempt` and returns the successor. On
/// error the caller still holds the untouched attempt.
pub fn execute(
    attempt: &BookingAttempt,
    map: &SeatMap,
    catalog: &DiscountCatalog,
    command: Command,
) -> Result<BookingAttempt, BookingError> {
    let mut next = attempt.clone();
    match command {
        Command::Select(n) => next.select(map, seat_number(n)?)?,
        Command::Deselect(n) => next.deselect(seat_number(n)?)?,
        Command::SetPassengerCount(count) => {
            let count = u8::try_from(count).map_err(|_| BookingError::InvalidPassengerCount {
                got: count,
                max: MAX_PASSENGERS,
            })?;
            next.set_passenger_count(count)?
        }
        Command::SetBusClass(class) => next.set_bus_class(class),
        Command::ApplyDiscount(code) => {
            next.apply_discount(catalog, &code)?;
        }
        Command::Reset => next.reset(),
    }
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AttemptPhase;

    #[test]
    fn test_commands_thread_the_attempt() {
        let map = SeatMap::with_sold([1]);
        let catalog = DiscountCatalog::default();

        let attempt = BookingAttempt::new();
        let attempt = execute(&attempt, &map, &catalog, Command::SetPassengerCount(2)).unwrap();
        let attempt = execute(&attempt, &map, &catalog, Command::Select(3)).unwrap();
        let attempt = execute(&attempt, &map, &catalog, Command::Select(7)).unwrap();
        let priced = execute(
            &attempt,
            &map,
            &catalog,
            Command::ApplyDiscount("diwali25".to_string()),
        )
        .unwrap();
        assert_eq!(priced.phase(), AttemptPhase::Priced);

        let back = execute(&priced, &map, &catalog, Command::Deselect(7)).unwrap();
        assert_eq!(back.phase(), AttemptPhase::Selecting);

        let cleared = execute(&back, &map, &catalog, Command::Reset).unwrap();
        assert_eq!(cleared.phase(), AttemptPhase::Empty);
        assert_eq!(cleared.passenger_count(), 2);
    }

    #[test]
    fn test_failed_command_leaves_original() {
        let map = SeatMap::with_sold([1]);
        let catalog = DiscountCatalog::default();
        let attempt = execute(&BookingAttempt::new(), &map, &catalog, Command::Select(5)).unwrap();

        let err = execute(&attempt, &map, &catalog, Command::Deselect(9)).unwrap_err();
        assert_eq!(err, BookingError::NotSelected(9));
        assert_eq!(attempt.selected().iter().copied().collect::<Vec<_>>(), vec![5]);

        let err = execute(&attempt, &map, &catalog, Command::Select(1)).unwrap_err();
        assert_eq!(err, BookingError::SeatUnavailable(1));

        let err = execute(
            &attempt,
            &map,
            &catalog,
            Command::ApplyDiscount("NOTREAL".to_string()),
        )
        .unwrap_err();
        assert_eq!(err.kind(), "invalid_code");
        assert_eq!(attempt.subtotal().to_string(), "800.00");
    }

    #[test]
    fn test_out_of_range_numbers() {
        let map = SeatMap::new();
        let catalog = DiscountCatalog::default();
        let attempt = BookingAttempt::new();

        assert_eq!(
            execute(&attempt, &map, &catalog, Command::Select(300)),
            Err(BookingError::InvalidSeat(300))
        );
        assert_eq!(
            execute(&attempt, &map, &catalog, Command::Deselect(256)),
            Err(BookingError::InvalidSeat(256))
        );
        assert_eq!(
            execute(&attempt, &map, &catalog, Command::SetPassengerCount(300)),
            Err(BookingError::InvalidPassengerCount { got: 300, max: MAX_PASSENGERS })
        );
    }
}
