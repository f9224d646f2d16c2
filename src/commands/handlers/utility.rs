//! Utility command handlers
//!
//! Handles: start, help
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use log::error;
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;
use crate::features::users::{register_user, welcome_message};

/// Handler for utility commands: start, help
pub struct UtilityHandler;

#[async_trait]
impl CommandHandler for UtilityHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["start", "help"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<Vec<String>> {
        match invocation.command.as_str() {
            "start" => Ok(self.handle_start(&ctx, invocation).await),
            "help" => Ok(vec![help_text(&ctx.command_prefix)]),
            _ => Ok(Vec::new()),
        }
    }
}

impl UtilityHandler {
    /// Register the caller (first contact only) and greet them
    async fn handle_start(&self, ctx: &CommandContext, invocation: &Invocation) -> Vec<String> {
        let mut replies = Vec::new();

        if let Err(e) = register_user(&ctx.database, &invocation.caller).await {
            error!(
                "[{}] Error saving user data for {}: {e}",
                invocation.request_id, invocation.caller.user_key
            );
            replies.push("Facing difficulties in saving user data.".to_string());
        }

        replies.push(welcome_message(&invocation.caller.first_name));
        replies
    }
}

pub fn help_text(prefix: &str) -> String {
    format!(
        "**Available Commands:**\n\
         `{prefix}start` - Say hello and register\n\
         `{prefix}add <name> <YYYY-MM-DD>` - Add or update a birthday\n\
         `{prefix}birthdays` - List your birthdays\n\
         `{prefix}ok` - Acknowledge today's reminders\n\
         `{prefix}help` - Show this help message"
    )
}
