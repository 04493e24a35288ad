use std::sync::Mutex;

use rusqlite::Connection;

use super::{StoreError, UserStore};
use crate::db::{self, queries};
use crate::models::{Account, Booking, Credential};
use crate::state::lock;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> anyhow::Result<Self> {
        Ok(Self::from_connection(db::init_db(path)?))
    }

    pub fn from_connection(conn: Connection) -> Self {
        Self {
            conn: Mutex::new(conn),
        }
    }
}

impl UserStore for SqliteStore {
    fn find_account(&self, username: &str) -> Result<Account, StoreError> {
        let conn = lock(&self.conn);
        queries::get_account(&conn, username)?
            .ok_or_else(|| StoreError::AccountNotFound(username.to_string()))
    }

    fn create_account(&self, account: &Account) -> Result<(), StoreError> {
        let mut conn = lock(&self.conn);
        let tx = conn.transaction()?;
        if queries::username_taken(&tx, &account.username)? {
            return Err(StoreError::UsernameTaken);
        }
        if queries::email_registered(&tx, &account.email)? {
            return Err(StoreError::EmailTaken);
        }
        queries::insert_account(&tx, account)?;
        for booking in &account.bookings {
            queries::insert_booking(&tx, &account.username, booking)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn update_credential(&self, username: &str, credential: &Credential) -> Result<(), StoreError> {
        let conn = lock(&self.conn);
        match queries::update_credential(&conn, username, credential)? {
            0 => Err(StoreError::AccountNotFound(username.to_string())),
            _ => Ok(()),
        }
    }

    fn append_booking(&self, username: &str, booking: &Booking) -> Result<(), StoreError> {
        let conn = lock(&self.conn);
        if !queries::username_taken(&conn, username)? {
            return Err(StoreError::AccountNotFound(username.to_string()));
        }
        queries::insert_booking(&conn, username, booking)?;
        Ok(())
    }
}
