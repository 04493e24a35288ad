use std::fmt;

use serde::{Deserialize, Serialize};

use super::Money;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BusClass {
    #[default]
    Sleeper,
    Seater,
}

impl BusClass {
    pub const ALL: [BusClass; 2] = [BusClass::Sleeper, BusClass::Seater];

    pub fn price_per_seat(self) -> Money {
        match self {
            BusClass::Sleeper => Money::from_rupees(800),
            BusClass::Seater => Money::from_rupees(600),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BusClass::Sleeper => "Sleeper",
            BusClass::Seater => "Seater",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|class| class.as_str().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for BusClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
