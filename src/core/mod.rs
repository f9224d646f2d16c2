//! # Core Module
//!
//! Configuration and reply utilities shared by the bot and its features.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add response module with Discord message chunking
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{chunk_for_message, chunk_text, MESSAGE_LIMIT};
