use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::engine::{DiscountCode, MAX_PASSENGERS};
use crate::models::{BusClass, Money, CITIES};
use crate::state::AppState;

#[derive(Serialize)]
pub struct BusClassFare {
    pub bus_class: BusClass,
    pub price_per_seat: Money,
}

#[derive(Serialize)]
pub struct Catalog {
    pub cities: Vec<&'static str>,
    pub bus_classes: Vec<BusClassFare>,
    pub discount_codes: Vec<DiscountCode>,
    pub max_passengers: u8,
    pub booking_window_days: i64,
}

// GET /api/catalog
pub async fn catalog(State(state): State<Arc<AppState>>) -> Json<Catalog> {
    Json(Catalog {
        cities: CITIES.to_vec(),
        bus_classes: BusClass::ALL
            .into_iter()
            .map(|bus_class| BusClassFare {
                bus_class,
                price_per_seat: bus_class.price_per_seat(),
            })
            .collect(),
        discount_codes: state.catalog.codes().to_vec(),
        max_passengers: MAX_PASSENGERS,
        booking_window_days: state.config.booking_window_days,
    })
}
