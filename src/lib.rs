// Core layer - configuration and reply utilities
pub mod core;

// Features layer - birthdays, reminders, acknowledgment, users
pub mod features;

// Infrastructure
pub mod database;

// Application layer
pub mod commands;

pub use crate::core::Config;

pub use features::{
    // Acknowledgment
    acknowledge,
    // Birthdays
    BirthdayEntry, BirthdayRegistry, DayWindow,
    // Reminders
    Notifier, NotifyPolicy, ReminderScheduler, ReminderSettings, SchedulerHandle,
    // Users
    UserProfile,
};
