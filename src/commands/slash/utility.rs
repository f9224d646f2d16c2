//! Utility slash commands: /start, /help

use serenity::builder::CreateApplicationCommand;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        CreateApplicationCommand::default()
            .name("start")
            .description("Say hello and start tracking birthdays")
            .to_owned(),
        CreateApplicationCommand::default()
            .name("help")
            .description("Show the available commands")
            .to_owned(),
    ]
}
