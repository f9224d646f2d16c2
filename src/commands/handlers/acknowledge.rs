//! Acknowledgment command handler
//!
//! Handles: ok
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
use crate::features::acknowledgment::acknowledge;

pub struct AcknowledgeHandler;

#[async_trait]
impl CommandHandler for AcknowledgeHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["ok"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<Vec<String>> {
        let reply = match acknowledge(&ctx.database, &invocation.caller.user_key).await {
            Ok(_) => "Thank you! No more birthday reminders for today.",
            Err(e) => {
                error!("[{}] Error updating acknowledgment: {e}", invocation.request_id);
                "There was an error acknowledging your reminder. Please try again."
            }
        };
        Ok(vec![reply.to_string()])
    }
}
