//! # Command System
//!
//! Text (`!add ...`) and slash (`/add`) commands share one set of handlers.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod context;
pub mod discord;
pub mod handler;
pub mod handlers;
pub mod invocation;
pub mod registry;
pub mod slash;

pub use context::CommandContext;
pub use handler::CommandHandler;
pub use invocation::{parse_command, Invocation};
pub use registry::CommandRegistry;

pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};
