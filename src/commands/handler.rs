//! Command handler trait
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use super::context::CommandContext;
use super::invocation::Invocation;

/// Trait for command handlers
///
/// A handler processes one or more commands and returns the reply messages to
/// send back to the caller, in order. Problems the user should hear about
/// (bad input, storage hiccups) are replies, not errors; an `Err` means the
/// handler could not produce a reply at all.
///
/// # Example
///
/// ```ignore
/// pub struct PingHandler;
///
/// #[async_trait]
/// impl CommandHandler for PingHandler {
///     fn command_names(&self) -> &'static [&'static str] {
///         &["ping"]
///     }
///
///     async fn handle(&self, _ctx: Arc<CommandContext>, _invocation: &Invocation) -> Result<Vec<String>> {
///         Ok(vec!["Pong!".to_string()])
///     }
/// }
/// ```
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Command name(s) this handler processes
    fn command_names(&self) -> &'static [&'static str];

    async fn handle(&self, ctx: Arc<CommandContext>, invocation: &Invocation)
        -> Result<Vec<String>>;
}
