//! Birthday slash commands: /add, /birthdays, /ok

use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::CommandOptionType;

pub fn create_commands() -> Vec<CreateApplicationCommand> {
    vec![
        create_add_command(),
        create_birthdays_command(),
        create_ok_command(),
    ]
}

fn create_add_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("add")
        .description("Add a birthday, or change the date of one you already added")
        .create_option(|option| {
            option
                .name("label")
                .description("Whose birthday it is")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .create_option(|option| {
            option
                .name("date")
                .description("Birth date as YYYY-MM-DD")
                .kind(CommandOptionType::String)
                .required(true)
        })
        .to_owned()
}

fn create_birthdays_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("birthdays")
        .description("List the birthdays you are tracking")
        .to_owned()
}

fn create_ok_command() -> CreateApplicationCommand {
    CreateApplicationCommand::default()
        .name("ok")
        .description("Acknowledge today's birthday reminders")
        .to_owned()
}
