use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};

use crate::models::{timestamp, Account, Booking, Credential};

// ── Accounts ──

pub fn insert_account(conn: &Connection, account: &Account) -> anyhow::Result<()> {
    let credential = serde_json::to_string(&account.credential)?;
    conn.execute(
        "INSERT INTO accounts (username, email, phone, credential, created_at) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            account.username,
            account.email,
            account.phone,
            credential,
            account.created_at.format(timestamp::FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

pub fn username_taken(conn: &Connection, username: &str) -> anyhow::Result<bool> {
    let taken = conn.query_row(
        "SELECT COUNT(*) > 0 FROM accounts WHERE username = ?1",
        [username],
        |row| row.get(0),
    )?;
    Ok(taken)
}

pub fn email_registered(conn: &Connection, email: &str) -> anyhow::Result<bool> {
    let taken = conn.query_row(
        "SELECT COUNT(*) > 0 FROM accounts WHERE email = ?1",
        [email],
        |row| row.get(0),
    )?;
    Ok(taken)
}

pub fn get_account(conn: &Connection, username: &str) -> anyhow::Result<Option<Account>> {
    let row = conn
        .query_row(
            "SELECT username, email, phone, credential, created_at FROM accounts WHERE username = ?1",
            [username],
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, String>(4)?,
                ))
            },
        )
        .optional()?;

    let Some((username, email, phone, credential_json, created_at_str)) = row else {
        return Ok(None);
    };

    let credential: Credential = serde_json::from_str(&credential_json)?;
    let created_at = NaiveDateTime::parse_from_str(&created_at_str, timestamp::FORMAT)?;
    let bookings = get_bookings_for_user(conn, &username)?;

    Ok(Some(Account {
        username,
        email,
        phone,
        credential,
        created_at,
        bookings,
    }))
}

/// Returns the number of rows changed; zero means no such account.
pub fn update_credential(
    conn: &Connection,
    username: &str,
    credential: &Credential,
) -> anyhow::Result<usize> {
    let credential = serde_json::to_string(credential)?;
    let changed = conn.execute(
        "UPDATE accounts SET credential = ?1 WHERE username = ?2",
        params![credential, username],
    )?;
    Ok(changed)
}

// ── Bookings ──

pub fn insert_booking(conn: &Connection, username: &str, booking: &Booking) -> anyhow::Result<()> {
    let record = serde_json::to_string(booking)?;
    conn.execute(
        "INSERT INTO bookings (booking_id, username, record, created_at) VALUES (?1, ?2, ?3, ?4)",
        params![
            booking.booking_id,
            username,
            record,
            booking.created_at.format(timestamp::FORMAT).to_string(),
        ],
    )?;
    Ok(())
}

/// Oldest first, in the order they were appended.
pub fn get_bookings_for_user(conn: &Connection, username: &str) -> anyhow::Result<Vec<Booking>> {
    let mut stmt = conn.prepare("SELECT record FROM bookings WHERE username = ?1 ORDER BY seq")?;
    let records = stmt
        .query_map([username], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    records
        .iter()
        .map(|raw| Ok(serde_json::from_str(raw)?))
        .collect()
}
