//! Transport-neutral command invocations
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.1.0

use uuid::Uuid;

use crate::features::users::UserProfile;

/// One command call: who sent it, the command name and its arguments
#[derive(Debug, Clone)]
pub struct Invocation {
    pub request_id: Uuid,
    pub command: String,
    pub args: Vec<String>,
    pub caller: UserProfile,
}

impl Invocation {
    pub fn new(command: &str, args: Vec<String>, caller: UserProfile) -> Self {
        Self {
            request_id: Uuid::new_v4(),
            command: command.to_lowercase(),
            args,
            caller,
        }
    }

    /// Build an invocation from message text, if it is a prefixed command
    pub fn from_text(text: &str, prefix: &str, caller: UserProfile) -> Option<Self> {
        let (command, args) = parse_command(text, prefix)?;
        Some(Self::new(&command, args, caller))
    }
}

/// Split `!add Alice 2024-05-10` into `("add", ["Alice", "2024-05-10"])`
///
/// Returns None when the text does not start with `prefix` or names no command.
pub fn parse_command(text: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    let rest = text.trim_start().strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace();
    let command = tokens.next()?.to_lowercase();
    if command.is_empty() {
        return None;
    }
    Some((command, tokens.map(str::to_string).collect()))
}
