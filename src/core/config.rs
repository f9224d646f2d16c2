//! Environment-driven bot configuration
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add COMMAND_PREFIX and NOTIFY_POLICY
//! - 1.0.0: Initial release with token, database path and log level

use anyhow::{Context, Result};
use std::env;

use crate::features::reminders::NotifyPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    pub discord_token: String,
    pub database_path: String,
    pub log_level: String,
    pub discord_guild_id: Option<String>,
    pub command_prefix: String,
    pub notify_policy: NotifyPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env vars in production)
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let discord_token = lookup("DISCORD_TOKEN")
            .filter(|v| !v.trim().is_empty())
            .context("DISCORD_TOKEN must be set")?;

        let notify_policy = match lookup("NOTIFY_POLICY") {
            Some(raw) => raw
                .parse::<NotifyPolicy>()
                .with_context(|| format!("Invalid NOTIFY_POLICY value: {raw}"))?,
            None => NotifyPolicy::default(),
        };

        let command_prefix = lookup("COMMAND_PREFIX")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| "!".to_string());

        Ok(Config {
            discord_token,
            database_path: lookup("DATABASE_PATH").unwrap_or_else(|| "birthdays.db".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            discord_guild_id: lookup("DISCORD_GUILD_ID").filter(|v| !v.trim().is_empty()),
            command_prefix,
            notify_policy,
        })
    }
}
