use std::fmt;
use std::ops::Sub;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An amount of rupees held as whole paise.
///
/// Stored records carry the rupee value as a plain number (`1200.0`), which is
/// what existing `users.json` files contain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees * 100)
    }

    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    pub const fn paise(self) -> i64 {
        self.0
    }

    pub fn as_rupees(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn times(self, count: usize) -> Money {
        Money(self.0 * count as i64)
    }

    /// What remains after taking `percentage` off, rounded half-up to the paisa.
    pub fn less_percent(self, percentage: u8) -> Money {
        let keep = 100 - i64::from(percentage.min(100));
        Money((self.0 * keep + 50).div_euclid(100))
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_rupees())
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rupees = f64::deserialize(deserializer)?;
        if !rupees.is_finite() {
            return Err(serde::de::Error::custom("amount must be a finite number"));
        }
        Ok(Money((rupees * 100.0).round() as i64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Money::from_rupees(1200).to_string(), "1200.00");
        assert_eq!(Money::from_paise(123_456).to_string(), "1234.56");
        assert_eq!(Money::from_paise(5).to_string(), "0.05");
    }

    #[test]
    fn test_less_percent() {
        assert_eq!(Money::from_rupees(1600).less_percent(25), Money::from_rupees(1200));
        assert_eq!(Money::from_rupees(600).less_percent(15), Money::from_rupees(510));
        assert_eq!(Money::from_rupees(800).less_percent(0), Money::from_rupees(800));
        assert_eq!(Money::from_rupees(800).less_percent(100), Money::ZERO);
        // 0.99 * 85% = 0.8415 -> 0.84
        assert_eq!(Money::from_paise(99).less_percent(15), Money::from_paise(84));
    }

    #[test]
    fn test_serde_as_rupees() {
        let json = serde_json::to_string(&Money::from_rupees(1200)).unwrap();
        assert_eq!(json, "1200.0");

        let parsed: Money = serde_json::from_str("1360.5").unwrap();
        assert_eq!(parsed, Money::from_paise(136_050));

        let whole: Money = serde_json::from_str("800").unwrap();
        assert_eq!(whole, Money::from_rupees(800));
    }
}
