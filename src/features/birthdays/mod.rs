//! # Birthdays Feature
//!
//! Per-user birthday tracking: the stored entries, the add/list registry, and the
//! year-agnostic day window the reminder sweeps query with.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod model;
pub mod registry;

pub use model::{month_day_key, parse_birth_date, BirthdayEntry, DayWindow, DATE_FORMAT};
pub use registry::{format_listing, AddBirthdayError, BirthdayRegistry};
