//! Command handler registry
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//!
//! ## Changelog
//! - 1.1.0: Add dispatch with per-request logging
//! - 1.0.0: Initial implementation for handler lookup

use anyhow::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::sync::Arc;

use super::context::CommandContext;
use super::handler::CommandHandler;
use super::handlers::create_all_handlers;
use super::invocation::Invocation;

/// Registry mapping command names to handlers
///
/// Multiple command names can map to the same handler if they share logic.
#[derive(Clone)]
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry holding every built-in handler
    pub fn with_default_handlers() -> Self {
        let mut registry = Self::new();
        for handler in create_all_handlers() {
            registry.register(handler);
        }
        registry
    }

    /// Register a handler for all of its declared command names
    pub fn register(&mut self, handler: Arc<dyn CommandHandler>) {
        for name in handler.command_names() {
            self.handlers.insert(name, Arc::clone(&handler));
        }
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CommandHandler>> {
        self.handlers.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered command names (not unique handlers)
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Route an invocation to its handler
    ///
    /// Returns None for commands nobody handles; those are ignored silently.
    pub async fn dispatch(
        &self,
        ctx: Arc<CommandContext>,
        invocation: &Invocation,
    ) -> Option<Result<Vec<String>>> {
        let request_id = invocation.request_id;
        let Some(handler) = self.get(&invocation.command) else {
            debug!(
                "[{request_id}] Ignoring unknown command '{}'",
                invocation.command
            );
            return None;
        };

        info!(
            "[{request_id}] 📥 Command received | Command: {} | User: {} | Args: {}",
            invocation.command,
            invocation.caller.user_key,
            invocation.args.len()
        );
        let result = handler.handle(ctx, invocation).await;
        debug!("[{request_id}] Command {} finished", invocation.command);
        Some(result)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
