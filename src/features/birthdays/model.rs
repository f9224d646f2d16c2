//! Birthday entries and the "today" window used by the sweeps
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Year-agnostic matching, 29 February folds onto 28 February in common years
//! - 1.0.0: Initial release

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Date format accepted by the `add` command and stored in the database
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One tracked birthday, unique per (owner, label)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub id: i64,
    pub owner_key: String,
    pub label: String,
    /// Date as supplied by the user. Only month and day take part in matching.
    pub date: NaiveDate,
    pub notified: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl BirthdayEntry {
    /// Human listing line, e.g. `Alice: Fri May 10 2024`
    pub fn listing_line(&self) -> String {
        format!("{}: {}", self.label, self.date.format("%a %b %d %Y"))
    }
}

/// `MM-DD` key stored alongside each entry and used for day matching
pub fn month_day_key(date: NaiveDate) -> String {
    date.format("%m-%d").to_string()
}

/// Parse user input in `YYYY-MM-DD` form
pub fn parse_birth_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT).ok()
}

/// The local calendar day `[today, tomorrow)` a sweep operates on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    today: NaiveDate,
}

impl DayWindow {
    pub fn new(today: NaiveDate) -> Self {
        Self { today }
    }

    /// Window containing the given local instant
    pub fn containing(instant: NaiveDateTime) -> Self {
        Self::new(instant.date())
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Midnight starting the window
    pub fn start(&self) -> NaiveDateTime {
        self.today.and_time(NaiveTime::MIN)
    }

    /// Exclusive end, 24 hours after `start`
    pub fn end(&self) -> NaiveDateTime {
        self.start() + Duration::hours(24)
    }

    /// Month-day keys that count as "today", ignoring the year
    pub fn month_day_keys(&self) -> Vec<String> {
        let mut keys = vec![month_day_key(self.today)];
        if self.today.month() == 2 && self.today.day() == 28 && !is_leap_year(self.today.year()) {
            keys.push("02-29".to_string());
        }
        keys
    }

    /// Whether a stored birth date falls on this day in the current year
    pub fn matches(&self, date: NaiveDate) -> bool {
        self.month_day_keys().contains(&month_day_key(date))
    }
}

fn is_leap_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}
