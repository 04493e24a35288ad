use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::engine::BookingAttempt;
use crate::models::Trip;

/// A logged-in user and the booking they are working on.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub trip: Trip,
    pub attempt: BookingAttempt,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a session and returns its bearer token.
    pub fn open(&mut self, username: &str, trip: Trip, now: NaiveDateTime) -> String {
        let token = uuid::Uuid::new_v4().to_string();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                trip,
                attempt: BookingAttempt::new(),
                created_at: now,
            },
        );
        token
    }

    pub fn get(&self, token: &str) -> Option<&Session> {
        self.sessions.get(token)
    }

    pub fn get_mut(&mut self, token: &str) -> Option<&mut Session> {
        self.sessions.get_mut(token)
    }

    pub fn close(&mut self, token: &str) -> Option<Session> {
        self.sessions.remove(token)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn test_sessions_are_independent() {
        let today = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();
        let now = today.and_hms_opt(9, 0, 0).unwrap();
        let mut store = SessionStore::new();

        let a = store.open("asha", Trip::default_for(today), now);
        let b = store.open("asha", Trip::default_for(today), now);
        assert_ne!(a, b);
        assert_eq!(store.len(), 2);

        store.get_mut(&a).unwrap().attempt.set_passenger_count(4).unwrap();
        assert_eq!(store.get(&b).unwrap().attempt.passenger_count(), 1);
        assert_eq!(store.get(&a).unwrap().trip.from_city, "Mumbai");

        assert!(store.close(&a).is_some());
        assert!(store.get(&a).is_none());
        assert!(store.close(&a).is_none());
    }
}
