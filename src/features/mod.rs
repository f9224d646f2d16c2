//! # Features
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod acknowledgment;
pub mod birthdays;
pub mod reminders;
pub mod users;

pub use acknowledgment::acknowledge;
pub use birthdays::{AddBirthdayError, BirthdayEntry, BirthdayRegistry, DayWindow};
pub use reminders::{
    DiscordNotifier, Notifier, NotifyPolicy, ReminderScheduler, ReminderSettings, SchedulerHandle,
};
pub use users::{register_user, UserProfile};
