//! First-contact user registration
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use log::info;

use crate::database::Database;

/// A bot user as seen by the messaging transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub user_key: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub is_bot: bool,
}

/// Record the caller on first contact. Re-registering never overwrites stored fields.
pub async fn register_user(database: &Database, profile: &UserProfile) -> Result<UserProfile> {
    let stored = database.upsert_user(profile).await?;
    info!("User {} registered ({})", stored.user_key, stored.first_name);
    Ok(stored)
}

/// Greeting sent in reply to `start`
pub fn welcome_message(first_name: &str) -> String {
    format!(
        "Hey {first_name}! 🎉 Welcome! I'm here to keep track of important birthdays for you. \
         Just add birthdays to my list, and I'll make sure you never miss a celebration. \
         Let's make every birthday special! 🎂"
    )
}
