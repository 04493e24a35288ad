use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::{timestamp, BusClass, Money};

/// A confirmed booking. Written once into the owner's history and never changed.
///
/// Field aliases accept records in the older layout
/// (`passengers`, `bus_type`, `total_amount`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_id: String,
    pub from_city: String,
    pub to_city: String,
    pub date: NaiveDate,
    #[serde(alias = "passengers")]
    pub passenger_count: u8,
    pub seats: Vec<u8>,
    #[serde(alias = "bus_type")]
    pub bus_class: BusClass,
    #[serde(alias = "total_amount")]
    pub final_amount: Money,
    #[serde(alias = "discount", default)]
    pub discount_percentage: u8,
    pub bus_number: String,
    #[serde(alias = "driver_number")]
    pub driver_contact: String,
    #[serde(default)]
    pub payment_mode: PaymentMode,
    #[serde(alias = "booking_time", with = "timestamp")]
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    #[serde(rename = "Cash on Boarding")]
    CashOnBoarding,
}

impl PaymentMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::CashOnBoarding => "Cash on Boarding",
        }
    }
}
