//! # Acknowledgment Feature
//!
//! Silences pending birthday reminders when the user answers `ok`.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

use anyhow::Result;
use log::info;

use crate::database::{BirthdayFilter, BirthdayUpdate, Database};

/// Mark every not-yet-notified birthday of `owner_key` as notified
///
/// Returns how many entries changed; zero is a normal outcome.
pub async fn acknowledge(database: &Database, owner_key: &str) -> Result<usize> {
    let filter = BirthdayFilter::owned_by(owner_key).notified(false);
    let changed = database
        .update_birthdays(&filter, BirthdayUpdate::set_notified(true))
        .await?;
    info!("User {owner_key} acknowledged reminders ({changed} entries silenced)");
    Ok(changed)
}
