//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

pub mod acknowledge;
pub mod birthdays;
pub mod utility;

use std::sync::Arc;

use super::handler::CommandHandler;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn CommandHandler>> {
    vec![
        Arc::new(utility::UtilityHandler),
        Arc::new(birthdays::BirthdaysHandler),
        Arc::new(acknowledge::AcknowledgeHandler),
    ]
}
