use std::env;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreBackend {
    Json,
    Sqlite,
}

impl StoreBackend {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Some(StoreBackend::Json),
            "sqlite" => Some(StoreBackend::Sqlite),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub store_backend: StoreBackend,
    pub users_file: String,
    pub database_url: String,
    pub seat_seed: u64,
    pub sold_seats_per_trip: usize,
    /// Seed for booking ids; unset draws from OS entropy.
    pub id_seed: Option<u64>,
    pub booking_window_days: i64,
    pub support_email: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            store_backend: StoreBackend::Json,
            users_file: "users.json".to_string(),
            database_url: "ztrip.db".to_string(),
            seat_seed: 42,
            sold_seats_per_trip: 6,
            id_seed: None,
            booking_window_days: 90,
            support_email: "support@busbooking.com".to_string(),
        }
    }
}

fn parsed<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            port: parsed("PORT").unwrap_or(defaults.port),
            store_backend: env::var("STORE_BACKEND")
                .ok()
                .and_then(|v| StoreBackend::parse(&v))
                .unwrap_or(defaults.store_backend),
            users_file: env::var("USERS_FILE").unwrap_or(defaults.users_file),
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            seat_seed: parsed("SEAT_SEED").unwrap_or(defaults.seat_seed),
            sold_seats_per_trip: parsed("SOLD_SEATS_PER_TRIP").unwrap_or(defaults.sold_seats_per_trip),
            id_seed: parsed("ID_SEED"),
            booking_window_days: parsed("BOOKING_WINDOW_DAYS").unwrap_or(defaults.booking_window_days),
            support_email: env::var("SUPPORT_EMAIL").unwrap_or(defaults.support_email),
        }
    }
}
