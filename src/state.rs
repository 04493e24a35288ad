use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::broadcast;

use crate::config::AppConfig;
use crate::engine::{DiscountCatalog, IdSource, SeatInventory};
use crate::models::SeatsSold;
use crate::services::notify::Notifier;
use crate::services::session::SessionStore;
use crate::services::store::UserStore;

pub struct AppState {
    pub config: AppConfig,
    pub store: Box<dyn UserStore>,
    pub notifier: Box<dyn Notifier>,
    pub ids: Box<dyn IdSource>,
    pub catalog: DiscountCatalog,
    pub sessions: Mutex<SessionStore>,
    pub inventory: Mutex<SeatInventory>,
    pub seat_events: broadcast::Sender<SeatsSold>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        store: Box<dyn UserStore>,
        notifier: Box<dyn Notifier>,
        ids: Box<dyn IdSource>,
    ) -> Self {
        let (seat_events, _) = broadcast::channel(256);
        let inventory = SeatInventory::new(config.seat_seed, config.sold_seats_per_trip);
        Self {
            config,
            store,
            notifier,
            ids,
            catalog: DiscountCatalog::default(),
            sessions: Mutex::new(SessionStore::new()),
            inventory: Mutex::new(inventory),
            seat_events,
        }
    }
}

/// Locks `mutex`, carrying on with the data if a previous holder panicked.
pub fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
