//! # Reminders Feature
//!
//! Scheduled birthday reminders delivered by direct message, silenced by
//! acknowledgment and re-armed every night.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod notifier;
pub mod scheduler;
pub mod sweep;

pub use notifier::{DiscordNotifier, Notifier};
pub use scheduler::{next_slot, next_top_of_hour, ReminderScheduler, SchedulerHandle};
pub use sweep::{
    reminder_text, run_due_sweep, run_rearm_sweep, NotifyPolicy, ReminderSettings, SweepReport,
};
