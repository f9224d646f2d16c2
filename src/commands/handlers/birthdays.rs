//! Birthday command handlers
//!
//! Handles: add, birthdays
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Multi-word names, date taken from the last argument
//! - 1.0.0: Initial release

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error};
use std::sync::Arc;

use crate::commands::context::CommandContext;
use crate::commands::handler::CommandHandler;
use crate::commands::invocation::Invocation;
use crate::core::chunk_for_message;
use crate::features::birthdays::format_listing;

const USAGE: &str = "Please provide a valid name and date (YYYY-MM-DD).";

/// Handler for birthday commands: add, birthdays
pub struct BirthdaysHandler;

#[async_trait]
impl CommandHandler for BirthdaysHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["add", "birthdays"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Result<Vec<String>> {
        match invocation.command.as_str() {
            "add" => Ok(vec![self.handle_add(&ctx, invocation).await]),
            "birthdays" => Ok(self.handle_list(&ctx, invocation).await),
            _ => Ok(Vec::new()),
        }
    }
}

impl BirthdaysHandler {
    /// Split `add` arguments into (name, date)
    ///
    /// The last argument is the date; everything before it is the name.
    fn split_add_args(args: &[String]) -> Option<(String, &str)> {
        let (date, name) = args.split_last()?;
        if name.is_empty() {
            return None;
        }
        Some((name.join(" "), date.as_str()))
    }

    async fn handle_add(&self, ctx: &CommandContext, invocation: &Invocation) -> String {
        let request_id = invocation.request_id;
        let owner = &invocation.caller.user_key;

        let Some((label, date_text)) = Self::split_add_args(&invocation.args) else {
            debug!("[{request_id}] add called with {} args", invocation.args.len());
            return USAGE.to_string();
        };

        match ctx.birthdays.add(owner, &label, date_text).await {
            Ok(entry) => format!(
                "Birthday for {} on {date_text} has been added.",
                entry.label
            ),
            Err(e) if e.is_validation() => {
                debug!("[{request_id}] Rejected add from {owner}: {e}");
                USAGE.to_string()
            }
            Err(e) => {
                error!("[{request_id}] Error adding birthday: {e}");
                "There was an error adding the birthday. Please try again.".to_string()
            }
        }
    }

    async fn handle_list(&self, ctx: &CommandContext, invocation: &Invocation) -> Vec<String> {
        match ctx.birthdays.list(&invocation.caller.user_key).await {
            Ok(entries) => chunk_for_message(&format_listing(&entries)),
            Err(e) => {
                error!("[{}] Error listing birthdays: {e}", invocation.request_id);
                vec!["There was an error fetching your birthdays. Please try again.".to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;
    use crate::features::users::UserProfile;

    fn invocation(command: &str, args: &[&str]) -> Invocation {
        Invocation::new(
            command,
            args.iter().map(|a| a.to_string()).collect(),
            UserProfile {
                user_key: "7".to_string(),
                first_name: "Ada".to_string(),
                last_name: None,
                username: None,
                is_bot: false,
            },
        )
    }

    fn context() -> Arc<CommandContext> {
        Arc::new(CommandContext::new(Database::open_in_memory().unwrap(), "!"))
    }

    #[test]
    fn test_birthdays_handler_commands() {
        let names = BirthdaysHandler.command_names();
        assert!(names.contains(&"add"));
        assert!(names.contains(&"birthdays"));
        assert_eq!(names.len(), 2);
    }

    #[test]
    fn test_split_add_args() {
        let args = |a: &[&str]| a.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let two = args(&["Alice", "2024-05-10"]);
        assert_eq!(
            BirthdaysHandler::split_add_args(&two),
            Some(("Alice".to_string(), "2024-05-10"))
        );

        let multi = args(&["Mary", "Jane", "1990-01-02"]);
        assert_eq!(
            BirthdaysHandler::split_add_args(&multi),
            Some(("Mary Jane".to_string(), "1990-01-02"))
        );

        assert_eq!(BirthdaysHandler::split_add_args(&args(&["Alice"])), None);
        assert_eq!(BirthdaysHandler::split_add_args(&[]), None);
    }

    #[tokio::test]
    async fn test_add_and_list() {
        let ctx = context();

        let added = BirthdaysHandler
            .handle(ctx.clone(), &invocation("add", &["Alice", "2024-05-10"]))
            .await
            .unwrap();
        assert_eq!(added, vec!["Birthday for Alice on 2024-05-10 has been added."]);

        let listed = BirthdaysHandler
            .handle(ctx, &invocation("birthdays", &[]))
            .await
            .unwrap();
        assert_eq!(listed, vec!["🎂 Here are the birthdays:\nAlice: Fri May 10 2024"]);
    }

    #[tokio::test]
    async fn test_add_rejects_bad_input() {
        let ctx = context();

        for args in [&["Alice"][..], &["Alice", "10-05-2024"][..], &[][..]] {
            let reply = BirthdaysHandler
                .handle(ctx.clone(), &invocation("add", args))
                .await
                .unwrap();
            assert_eq!(reply, vec![USAGE]);
        }

        assert!(ctx.birthdays.list("7").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_listing() {
        let replies = BirthdaysHandler
            .handle(context(), &invocation("birthdays", &[]))
            .await
            .unwrap();
        assert_eq!(replies, vec!["No birthdays have been added yet."]);
    }
}
