//! # Users Feature
//!
//! Registers callers on first contact.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false

pub mod registration;

pub use registration::{register_user, welcome_message, UserProfile};
