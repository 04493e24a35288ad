use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::{StoreError, UserStore};
use crate::models::{timestamp, Account, Booking, Credential};
use crate::state::lock;

/// One entry of `users.json`, keyed by username.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AccountRecord {
    email: String,
    #[serde(rename = "password")]
    credential: Credential,
    phone: String,
    #[serde(with = "timestamp")]
    created_at: NaiveDateTime,
    #[serde(default)]
    bookings: Vec<Booking>,
}

impl AccountRecord {
    fn into_account(self, username: &str) -> Account {
        Account {
            username: username.to_string(),
            email: self.email,
            phone: self.phone,
            credential: self.credential,
            created_at: self.created_at,
            bookings: self.bookings,
        }
    }
}

type Accounts = BTreeMap<String, AccountRecord>;

/// Accounts kept in a single pretty-printed JSON object on disk.
///
/// Every write rewrites the whole file through a temporary sibling and a
/// rename, so a crash mid-write leaves the previous file in place.
pub struct JsonFileStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Accounts, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Accounts::new()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(Accounts::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, accounts: &Accounts) -> Result<(), StoreError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        accounts.serialize(&mut ser)?;

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, &buf)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    fn modify<F>(&self, username: &str, f: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut AccountRecord),
    {
        let _guard = lock(&self.guard);
        let mut accounts = self.load()?;
        let record = accounts
            .get_mut(username)
            .ok_or_else(|| StoreError::AccountNotFound(username.to_string()))?;
        f(record);
        self.save(&accounts)
    }
}

impl UserStore for JsonFileStore {
    fn find_account(&self, username: &str) -> Result<Account, StoreError> {
        let _guard = lock(&self.guard);
        self.load()?
            .remove(username)
            .map(|record| record.into_account(username))
            .ok_or_else(|| StoreError::AccountNotFound(username.to_string()))
    }

    fn create_account(&self, account: &Account) -> Result<(), StoreError> {
        let _guard = lock(&self.guard);
        let mut accounts = self.load()?;
        if accounts.contains_key(&account.username) {
            return Err(StoreError::UsernameTaken);
        }
        if accounts.values().any(|r| r.email == account.email) {
            return Err(StoreError::EmailTaken);
        }

        accounts.insert(
            account.username.clone(),
            AccountRecord {
                email: account.email.clone(),
                credential: account.credential.clone(),
                phone: account.phone.clone(),
                created_at: account.created_at,
                bookings: account.bookings.clone(),
            },
        );
        self.save(&accounts)
    }

    fn update_credential(&self, username: &str, credential: &Credential) -> Result<(), StoreError> {
        self.modify(username, |record| record.credential = credential.clone())
    }

    fn append_booking(&self, username: &str, booking: &Booking) -> Result<(), StoreError> {
        self.modify(username, |record| record.bookings.push(booking.clone()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::{BusClass, Money, PaymentMode};

    fn account(username: &str, email: &str) -> Account {
        Account {
            username: username.to_string(),
            email: email.to_string(),
            phone: "9876543210".to_string(),
            credential: Credential::Hashed {
                salt: "s".to_string(),
                digest: "d".to_string(),
            },
            created_at: NaiveDate::from_ymd_opt(2025, 10, 1)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            bookings: Vec::new(),
        }
    }

    fn booking() -> Booking {
        Booking {
            booking_id: "BK123456".to_string(),
            from_city: "Mumbai".to_string(),
            to_city: "Delhi".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 10, 30).unwrap(),
            passenger_count: 1,
            seats: vec![4],
            bus_class: BusClass::Sleeper,
            final_amount: Money::from_rupees(800),
            discount_percentage: 0,
            bus_number: "BUS-2345".to_string(),
            driver_contact: "+91-81234-56789".to_string(),
            payment_mode: PaymentMode::CashOnBoarding,
            created_at: NaiveDate::from_ymd_opt(2025, 10, 2)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert!(matches!(
            store.find_account("nobody"),
            Err(StoreError::AccountNotFound(_))
        ));
    }

    #[test]
    fn test_create_and_append() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));

        store.create_account(&account("asha", "asha@example.com")).unwrap();
        store.append_booking("asha", &booking()).unwrap();

        let found = store.find_account("asha").unwrap();
        assert_eq!(found.email, "asha@example.com");
        assert_eq!(found.bookings, vec![booking()]);

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.starts_with("{\n    \"asha\": {"));
        assert!(raw.contains("\"password\""));
    }

    #[test]
    fn test_duplicates_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        store.create_account(&account("asha", "asha@example.com")).unwrap();

        assert!(matches!(
            store.create_account(&account("asha", "other@example.com")),
            Err(StoreError::UsernameTaken)
        ));
        assert!(matches!(
            store.create_account(&account("ravi", "asha@example.com")),
            Err(StoreError::EmailTaken)
        ));
    }

    #[test]
    fn test_append_to_unknown_account() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("users.json"));
        assert!(matches!(
            store.append_booking("ghost", &booking()),
            Err(StoreError::AccountNotFound(name)) if name == "ghost"
        ));
    }

    #[test]
    fn test_reads_legacy_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(
            &path,
            r#"{
    "meera": {
        "email": "meera@example.com",
        "password": "plain-old",
        "phone": "9000000000",
        "created_at": "2024-09-01 12:00:00",
        "bookings": [
            {
                "booking_id": "BK555555",
                "from_city": "Pune",
                "to_city": "Jaipur",
                "date": "2024-09-10",
                "passengers": 1,
                "seats": [6],
                "bus_type": "Seater",
                "total_amount": 510.0,
                "discount": 15,
                "bus_number": "BUS-7777",
                "driver_number": "+91-90000-11111",
                "booking_time": "2024-09-01 12:05:00"
            }
        ]
    }
}"#,
        )
        .unwrap();

        let store = JsonFileStore::new(path.clone());
        let found = store.find_account("meera").unwrap();
        assert_eq!(found.credential, Credential::Legacy("plain-old".to_string()));
        assert_eq!(found.bookings[0].final_amount, Money::from_rupees(510));
        assert_eq!(found.bookings[0].payment_mode, PaymentMode::CashOnBoarding);

        let upgraded = Credential::Hashed {
            salt: "x".to_string(),
            digest: "y".to_string(),
        };
        store.update_credential("meera", &upgraded).unwrap();
        let found = store.find_account("meera").unwrap();
        assert_eq!(found.credential, upgraded);
        assert_eq!(found.bookings.len(), 1);
    }
}
