use base64::Engine;
use chrono::NaiveDateTime;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::models::{Account, Credential};
use crate::services::store::{StoreError, UserStore};

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("all fields are required")]
    MissingFields,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("username not found")]
    UnknownUsername,

    #[error("incorrect password")]
    IncorrectPassword,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AuthError {
    pub fn kind(&self) -> &'static str {
        match self {
            AuthError::MissingFields => "missing_fields",
            AuthError::PasswordMismatch => "password_mismatch",
            AuthError::UnknownUsername => "unknown_username",
            AuthError::IncorrectPassword => "incorrect_password",
            AuthError::Hashing(_) => "hashing_failure",
            AuthError::Store(e) => e.kind(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirm_password: String,
}

fn keyed_mac(salt: &str, password: &str) -> Result<HmacSha256, AuthError> {
    let mut mac =
        HmacSha256::new_from_slice(salt.as_bytes()).map_err(|e| AuthError::Hashing(e.to_string()))?;
    mac.update(password.as_bytes());
    Ok(mac)
}

/// HMAC-SHA256 of the password keyed by a fresh random salt.
pub fn hash_password(password: &str) -> Result<Credential, AuthError> {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    let digest = keyed_mac(&salt, password)?.finalize().into_bytes();
    Ok(Credential::Hashed {
        salt,
        digest: base64::engine::general_purpose::STANDARD.encode(digest),
    })
}

pub fn verify(credential: &Credential, password: &str) -> bool {
    match credential {
        Credential::Legacy(plain) => plain == password,
        Credential::Hashed { salt, digest } => {
            let Ok(expected) = base64::engine::general_purpose::STANDARD.decode(digest) else {
                return false;
            };
            keyed_mac(salt, password)
                .map(|mac| mac.verify_slice(&expected).is_ok())
                .unwrap_or(false)
        }
    }
}

pub fn signup(
    store: &dyn UserStore,
    req: SignupRequest,
    now: NaiveDateTime,
) -> Result<Account, AuthError> {
    let username = req.username.trim();
    let email = req.email.trim();
    let phone = req.phone.trim();
    if username.is_empty() || email.is_empty() || phone.is_empty() || req.password.is_empty() {
        return Err(AuthError::MissingFields);
    }
    if req.password != req.confirm_password {
        return Err(AuthError::PasswordMismatch);
    }

    let account = Account {
        username: username.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        credential: hash_password(&req.password)?,
        created_at: now,
        bookings: Vec::new(),
    };
    store.create_account(&account)?;

    tracing::info!(username = %account.username, "account created");
    Ok(account)
}

/// Checks the password and, for accounts still holding a plaintext password,
/// stores a hashed one in its place.
pub fn login(store: &dyn UserStore, username: &str, password: &str) -> Result<Account, AuthError> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AuthError::MissingFields);
    }

    let mut account = match store.find_account(username) {
        Ok(account) => account,
        Err(StoreError::AccountNotFound(_)) => return Err(AuthError::UnknownUsername),
        Err(e) => return Err(e.into()),
    };

    if !verify(&account.credential, password) {
        tracing::info!(username = %username, "login rejected");
        return Err(AuthError::IncorrectPassword);
    }

    if account.credential.is_legacy() {
        let upgraded = hash_password(password)?;
        match store.update_credential(username, &upgraded) {
            Ok(()) => {
                tracing::info!(username = %username, "upgraded legacy credential");
                account.credential = upgraded;
            }
            Err(e) => {
                tracing::error!(username = %username, error = %e, "failed to upgrade legacy credential");
            }
        }
    }

    tracing::info!(username = %username, "login");
    Ok(account)
}
