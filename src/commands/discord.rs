//! Discord adapters: turn messages and interactions into invocations and
//! deliver handler replies back
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.2.0

use anyhow::Result;
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::Message;
use serenity::model::id::ChannelId;
use serenity::model::user::User;

use super::invocation::Invocation;
use super::slash::slash_args;
use crate::features::users::UserProfile;

pub fn profile_from_user(user: &User) -> UserProfile {
    UserProfile {
        user_key: user.id.to_string(),
        first_name: user.name.clone(),
        last_name: None,
        username: Some(user.tag()),
        is_bot: user.bot,
    }
}

/// Prefixed text command sent by a human, if this message is one
pub fn invocation_from_message(msg: &Message, prefix: &str) -> Option<Invocation> {
    if msg.author.bot {
        return None;
    }
    Invocation::from_text(&msg.content, prefix, profile_from_user(&msg.author))
}

pub fn invocation_from_interaction(command: &ApplicationCommandInteraction) -> Invocation {
    let name = command.data.name.as_str();
    Invocation::new(
        name,
        slash_args(name, &command.data.options),
        profile_from_user(&command.user),
    )
}

pub async fn reply_in_channel(http: &Http, channel_id: ChannelId, replies: &[String]) -> Result<()> {
    for reply in replies {
        channel_id.say(http, reply).await?;
    }
    Ok(())
}

/// Answer an interaction: the first reply is the response, the rest are follow-ups
pub async fn reply_to_interaction(
    http: &Http,
    command: &ApplicationCommandInteraction,
    replies: &[String],
) -> Result<()> {
    let (first, rest) = match replies.split_first() {
        Some((first, rest)) => (first.as_str(), rest),
        None => ("✅", &[][..]),
    };

    command
        .create_interaction_response(http, |response| {
            response
                .kind(InteractionResponseType::ChannelMessageWithSource)
                .interaction_response_data(|message| message.content(first))
        })
        .await?;

    for reply in rest {
        command
            .create_followup_message(http, |message| message.content(reply))
            .await?;
    }
    Ok(())
}
