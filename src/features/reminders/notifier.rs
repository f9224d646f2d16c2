//! Outbound reminder delivery
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use serenity::http::Http;
use serenity::model::id::UserId;
use std::sync::Arc;

/// Sends a plain text message to a user
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_text(&self, user_key: &str, text: &str) -> Result<()>;
}

/// Delivers reminders as Discord direct messages
#[derive(Clone)]
pub struct DiscordNotifier {
    http: Arc<Http>,
}

impl DiscordNotifier {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Notifier for DiscordNotifier {
    async fn send_text(&self, user_key: &str, text: &str) -> Result<()> {
        let user_id: u64 = user_key
            .parse()
            .with_context(|| format!("'{user_key}' is not a Discord user id"))?;

        let http: &Http = &self.http;
        let dm = UserId(user_id).create_dm_channel(http).await?;
        dm.say(http, text).await?;
        debug!("Sent DM to {user_key}");
        Ok(())
    }
}
