pub mod json_file;
pub mod sqlite;

pub use json_file::JsonFileStore;
pub use sqlite::SqliteStore;

use crate::models::{Account, Booking, Credential};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("username already exists")]
    UsernameTaken,

    #[error("email already registered")]
    EmailTaken,

    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl StoreError {
    pub fn kind(&self) -> &'static str {
        match self {
            StoreError::AccountNotFound(_) => "account_not_found",
            StoreError::UsernameTaken => "username_taken",
            StoreError::EmailTaken => "email_taken",
            StoreError::Persistence(_) => "persistence_failure",
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<anyhow::Error> for StoreError {
    fn from(e: anyhow::Error) -> Self {
        StoreError::Persistence(format!("{e:#}"))
    }
}

/// Durable home of accounts and their booking histories.
///
/// Each call is atomic with respect to other calls on the same store.
pub trait UserStore: Send + Sync {
    fn find_account(&self, username: &str) -> Result<Account, StoreError>;

    fn create_account(&self, account: &Account) -> Result<(), StoreError>;

    fn update_credential(&self, username: &str, credential: &Credential) -> Result<(), StoreError>;

    fn append_booking(&self, username: &str, booking: &Booking) -> Result<(), StoreError>;
}
