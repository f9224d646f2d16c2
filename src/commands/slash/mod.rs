//! # Slash Commands (/)
//!
//! Discord slash command definitions mirroring the text commands.
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false

mod birthdays;
mod utility;

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command;
use serenity::model::application::interaction::application_command::CommandDataOption;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

/// Option names per command, in the order they become invocation arguments
const ARGUMENT_ORDER: &[(&str, &[&str])] = &[("add", &["label", "date"])];

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    let mut commands = Vec::new();
    commands.extend(utility::create_commands());
    commands.extend(birthdays::create_commands());
    commands
}

/// Registers all slash commands globally
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    Command::set_global_application_commands(&ctx.http, |commands| {
        for command in slash_commands {
            commands.add_application_command(command);
        }
        commands
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (faster for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let slash_commands = create_slash_commands();
    let count = slash_commands.len();

    guild_id
        .set_application_commands(&ctx.http, |commands| {
            for command in slash_commands {
                commands.add_application_command(command);
            }
            commands
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

/// Utility function to get string option from slash command
pub fn get_string_option(options: &[CommandDataOption], name: &str) -> Option<String> {
    options
        .iter()
        .find(|opt| opt.name == name)
        .and_then(|opt| opt.value.as_ref())
        .and_then(|val| val.as_str())
        .map(|s| s.to_string())
}

/// Positional arguments for a slash command, matching the text command's argument order
pub fn slash_args(command_name: &str, options: &[CommandDataOption]) -> Vec<String> {
    ARGUMENT_ORDER
        .iter()
        .find(|(name, _)| *name == command_name)
        .map(|(_, option_names)| {
            option_names
                .iter()
                .filter_map(|option| get_string_option(options, option))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_slash_commands() {
        let commands = create_slash_commands();
        assert_eq!(commands.len(), 5);

        let command_names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();

        for expected in ["start", "help", "add", "birthdays", "ok"] {
            assert!(
                command_names.contains(&expected.to_string()),
                "Missing command: {expected}"
            );
        }
    }

    #[test]
    fn test_slash_args_without_options() {
        assert!(slash_args("add", &[]).is_empty());
        assert!(slash_args("birthdays", &[]).is_empty());
    }
}
