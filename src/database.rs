//! # Database
//!
//! SQLite-backed record store for users and their birthdays.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Store month-day key beside each date for year-agnostic lookups
//! - 1.1.0: Filter/update value types for bulk queries
//! - 1.0.0: Initial users and birthdays tables

use anyhow::{anyhow, Result};
use log::{debug, info};
use sqlite::{Connection, State, Statement};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::features::birthdays::{month_day_key, BirthdayEntry, DayWindow, DATE_FORMAT};
use crate::features::users::UserProfile;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS users (
        user_key TEXT PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT,
        username TEXT,
        is_bot INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS birthdays (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        owner_key TEXT NOT NULL,
        label TEXT NOT NULL,
        birth_date TEXT NOT NULL,
        month_day TEXT NOT NULL,
        notified INTEGER NOT NULL DEFAULT 0,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL,
        UNIQUE(owner_key, label)
    );
    CREATE INDEX IF NOT EXISTS idx_birthdays_month_day ON birthdays(month_day, notified);
";

const BIRTHDAY_COLUMNS: &str =
    "id, owner_key, label, birth_date, notified, created_at, updated_at";

/// Which birthdays a bulk query or update applies to. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BirthdayFilter {
    pub id: Option<i64>,
    pub owner: Option<String>,
    pub day: Option<DayWindow>,
    pub notified: Option<bool>,
}

impl BirthdayFilter {
    pub fn owned_by(owner: &str) -> Self {
        Self {
            owner: Some(owner.to_string()),
            ..Self::default()
        }
    }

    pub fn on_day(day: DayWindow) -> Self {
        Self {
            day: Some(day),
            ..Self::default()
        }
    }

    pub fn with_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn notified(mut self, notified: bool) -> Self {
        self.notified = Some(notified);
        self
    }
}

/// Fields set by a bulk update
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BirthdayUpdate {
    pub notified: Option<bool>,
}

impl BirthdayUpdate {
    pub fn set_notified(notified: bool) -> Self {
        Self {
            notified: Some(notified),
        }
    }
}

enum Param {
    Text(String),
    OptText(Option<String>),
    Int(i64),
}

fn bind_all(statement: &mut Statement<'_>, params: &[Param]) -> Result<()> {
    for (i, param) in params.iter().enumerate() {
        let index = i + 1;
        match param {
            Param::Text(value) => statement.bind((index, value.as_str()))?,
            Param::OptText(value) => statement.bind((index, value.as_deref()))?,
            Param::Int(value) => statement.bind((index, *value))?,
        }
    }
    Ok(())
}

fn timestamp_now() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn where_clause(filter: &BirthdayFilter) -> (String, Vec<Param>) {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    if let Some(id) = filter.id {
        conditions.push("id = ?".to_string());
        params.push(Param::Int(id));
    }
    if let Some(owner) = &filter.owner {
        conditions.push("owner_key = ?".to_string());
        params.push(Param::Text(owner.clone()));
    }
    if let Some(day) = &filter.day {
        let keys = day.month_day_keys();
        let placeholders = vec!["?"; keys.len()].join(", ");
        conditions.push(format!("month_day IN ({placeholders})"));
        params.extend(keys.into_iter().map(Param::Text));
    }
    if let Some(notified) = filter.notified {
        conditions.push("notified = ?".to_string());
        params.push(Param::Int(notified as i64));
    }

    if conditions.is_empty() {
        (String::new(), params)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), params)
    }
}

fn read_birthday(statement: &Statement<'_>) -> Result<BirthdayEntry> {
    let raw_date = statement.read::<String, _>("birth_date")?;
    let date = chrono::NaiveDate::parse_from_str(&raw_date, DATE_FORMAT)
        .map_err(|e| anyhow!("Corrupt birth_date '{raw_date}': {e}"))?;

    Ok(BirthdayEntry {
        id: statement.read::<i64, _>("id")?,
        owner_key: statement.read::<String, _>("owner_key")?,
        label: statement.read::<String, _>("label")?,
        date,
        notified: statement.read::<i64, _>("notified")? != 0,
        created_at: statement.read::<String, _>("created_at")?,
        updated_at: statement.read::<String, _>("updated_at")?,
    })
}

fn select_birthdays(conn: &Connection, filter: &BirthdayFilter) -> Result<Vec<BirthdayEntry>> {
    let (clause, params) = where_clause(filter);
    let query = format!("SELECT {BIRTHDAY_COLUMNS} FROM birthdays{clause} ORDER BY id");

    let mut statement = conn.prepare(query)?;
    bind_all(&mut statement, &params)?;

    let mut entries = Vec::new();
    while let State::Row = statement.next()? {
        entries.push(read_birthday(&statement)?);
    }
    Ok(entries)
}

fn select_user(conn: &Connection, user_key: &str) -> Result<Option<UserProfile>> {
    let mut statement = conn.prepare(
        "SELECT user_key, first_name, last_name, username, is_bot FROM users WHERE user_key = ?",
    )?;
    statement.bind((1, user_key))?;

    if let State::Row = statement.next()? {
        Ok(Some(UserProfile {
            user_key: statement.read::<String, _>("user_key")?,
            first_name: statement.read::<String, _>("first_name")?,
            last_name: statement.read::<Option<String>, _>("last_name")?,
            username: statement.read::<Option<String>, _>("username")?,
            is_bot: statement.read::<i64, _>("is_bot")? != 0,
        }))
    } else {
        Ok(None)
    }
}

/// Shared handle to the SQLite store. Cloning shares the connection.
#[derive(Clone)]
pub struct Database {
    connection: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and ensure the schema exists
    pub async fn open(path: &str) -> Result<Self> {
        info!("Opening database at {path}");
        let connection = sqlite::open(path)?;
        Self::with_connection(connection)
    }

    /// Fresh private in-memory store
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(sqlite::open(":memory:")?)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection.execute(SCHEMA)?;
        Ok(Database {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Insert the profile if its key is unknown; an existing row is returned untouched
    pub async fn upsert_user(&self, profile: &UserProfile) -> Result<UserProfile> {
        let conn = self.connection.lock().await;
        let now = timestamp_now();

        let mut statement = conn.prepare(
            "INSERT INTO users (user_key, first_name, last_name, username, is_bot, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(user_key) DO NOTHING",
        )?;
        bind_all(
            &mut statement,
            &[
                Param::Text(profile.user_key.clone()),
                Param::Text(profile.first_name.clone()),
                Param::OptText(profile.last_name.clone()),
                Param::OptText(profile.username.clone()),
                Param::Int(profile.is_bot as i64),
                Param::Text(now.clone()),
                Param::Text(now),
            ],
        )?;
        while let State::Row = statement.next()? {}
        drop(statement);

        if conn.change_count() > 0 {
            debug!("Registered new user {}", profile.user_key);
        }

        select_user(&conn, &profile.user_key)?
            .ok_or_else(|| anyhow!("User {} missing after upsert", profile.user_key))
    }

    pub async fn find_user(&self, user_key: &str) -> Result<Option<UserProfile>> {
        let conn = self.connection.lock().await;
        select_user(&conn, user_key)
    }

    /// Insert a birthday, or replace the date of the existing (owner, label) entry
    ///
    /// Either way the entry comes back with `notified = false`.
    pub async fn upsert_birthday(
        &self,
        owner_key: &str,
        label: &str,
        date: chrono::NaiveDate,
    ) -> Result<BirthdayEntry> {
        let conn = self.connection.lock().await;
        let now = timestamp_now();

        let mut statement = conn.prepare(
            "INSERT INTO birthdays (owner_key, label, birth_date, month_day, notified, created_at, updated_at)
             VALUES (?, ?, ?, ?, 0, ?, ?)
             ON CONFLICT(owner_key, label) DO UPDATE SET
                 birth_date = excluded.birth_date,
                 month_day = excluded.month_day,
                 notified = 0,
                 updated_at = excluded.updated_at",
        )?;
        bind_all(
            &mut statement,
            &[
                Param::Text(owner_key.to_string()),
                Param::Text(label.to_string()),
                Param::Text(date.format(DATE_FORMAT).to_string()),
                Param::Text(month_day_key(date)),
                Param::Text(now.clone()),
                Param::Text(now),
            ],
        )?;
        while let State::Row = statement.next()? {}
        drop(statement);

        let filter = BirthdayFilter {
            owner: Some(owner_key.to_string()),
            ..BirthdayFilter::default()
        };
        select_birthdays(&conn, &filter)?
            .into_iter()
            .find(|entry| entry.label == label)
            .ok_or_else(|| anyhow!("Birthday '{label}' for {owner_key} missing after upsert"))
    }

    /// All birthdays matching the filter, in insertion order
    pub async fn find_birthdays(&self, filter: &BirthdayFilter) -> Result<Vec<BirthdayEntry>> {
        let conn = self.connection.lock().await;
        select_birthdays(&conn, filter)
    }

    /// Apply `update` to every birthday matching `filter`, returning the affected row count
    pub async fn update_birthdays(
        &self,
        filter: &BirthdayFilter,
        update: BirthdayUpdate,
    ) -> Result<usize> {
        let Some(notified) = update.notified else {
            return Ok(0);
        };

        let conn = self.connection.lock().await;
        let (clause, where_params) = where_clause(filter);
        let query = format!("UPDATE birthdays SET notified = ?, updated_at = ?{clause}");

        let mut params = vec![Param::Int(notified as i64), Param::Text(timestamp_now())];
        params.extend(where_params);

        let mut statement = conn.prepare(query)?;
        bind_all(&mut statement, &params)?;
        while let State::Row = statement.next()? {}
        drop(statement);

        Ok(conn.change_count())
    }
}
