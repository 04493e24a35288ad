use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::Booking;

/// Stored password. Accounts created before hashing was introduced still hold
/// the plaintext; a successful login replaces it with a hashed credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Credential {
    Hashed { salt: String, digest: String },
    Legacy(String),
}

impl Credential {
    pub fn is_legacy(&self) -> bool {
        matches!(self, Credential::Legacy(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub credential: Credential,
    pub created_at: NaiveDateTime,
    pub bookings: Vec<Booking>,
}
