//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use crate::database::Database;
use crate::features::birthdays::BirthdayRegistry;

/// Services every command handler can reach
#[derive(Clone)]
pub struct CommandContext {
    pub database: Database,
    pub birthdays: BirthdayRegistry,
    pub command_prefix: String,
}

impl CommandContext {
    pub fn new(database: Database, command_prefix: &str) -> Self {
        Self {
            birthdays: BirthdayRegistry::new(database.clone()),
            database,
            command_prefix: command_prefix.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_context_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<CommandContext>();
    }
}
