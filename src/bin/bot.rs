use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::Interaction;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use cakeday::commands::discord::{
    invocation_from_interaction, invocation_from_message, reply_in_channel, reply_to_interaction,
};
use cakeday::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry, Invocation,
};
use cakeday::core::Config;
use cakeday::database::Database;
use cakeday::features::reminders::{DiscordNotifier, ReminderScheduler, ReminderSettings};

const GENERIC_ERROR: &str = "❌ Sorry, I encountered an error processing your command. Please try again.";

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(registry: CommandRegistry, context: Arc<CommandContext>, guild_id: Option<GuildId>) -> Self {
        Handler {
            registry,
            context,
            guild_id,
        }
    }

    /// Run the invocation and collect the replies; None for commands we don't know
    async fn run(&self, invocation: &Invocation) -> Option<Vec<String>> {
        match self.registry.dispatch(self.context.clone(), invocation).await? {
            Ok(replies) => Some(replies),
            Err(e) => {
                error!(
                    "[{}] Error handling command '{}': {e}",
                    invocation.request_id, invocation.command
                );
                Some(vec![GENERIC_ERROR.to_string()])
            }
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        let Some(invocation) = invocation_from_message(&msg, &self.context.command_prefix) else {
            return;
        };
        let Some(replies) = self.run(&invocation).await else {
            return;
        };

        if let Err(why) = reply_in_channel(&ctx.http, msg.channel_id, &replies).await {
            error!("[{}] Failed to send reply: {why}", invocation.request_id);
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        let registered = match self.guild_id {
            Some(guild_id) => register_guild_commands(&ctx, guild_id).await,
            None => register_global_commands(&ctx).await,
        };
        if let Err(e) = registered {
            error!("Failed to register slash commands: {e}");
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        let invocation = invocation_from_interaction(&command);
        let replies = self
            .run(&invocation)
            .await
            .unwrap_or_else(|| vec!["❌ Unknown command.".to_string()]);

        if let Err(why) = reply_to_interaction(&ctx.http, &command, &replies).await {
            error!(
                "[{}] Failed to respond to slash command '{}': {why}",
                invocation.request_id, command.data.name
            );
        }
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix
async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut terminate) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => info!("Received SIGINT"),
                    _ = terminate.recv() => info!("Received SIGTERM"),
                }
            }
            Err(e) => {
                warn!("Could not listen for SIGTERM: {e}");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting birthday bot...");

    // No traffic is accepted until the store is reachable
    let database = Database::open(&config.database_path).await.map_err(|e| {
        error!("Error connecting to DB: {e}");
        e
    })?;
    info!("DB connected successfully");

    let context = Arc::new(CommandContext::new(database.clone(), &config.command_prefix));

    // Parse guild ID if provided for development mode
    let guild_id = config
        .discord_guild_id
        .as_ref()
        .and_then(|id| id.parse::<u64>().ok())
        .map(GuildId);

    let handler = Handler::new(CommandRegistry::with_default_handlers(), context, guild_id);

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    let notifier = Arc::new(DiscordNotifier::new(client.cache_and_http.http.clone()));
    let scheduler = ReminderScheduler::new(
        database,
        notifier,
        ReminderSettings {
            policy: config.notify_policy,
            command_prefix: config.command_prefix.clone(),
        },
    )
    .spawn();

    let shard_manager = client.shard_manager.clone();
    tokio::spawn(async move {
        wait_for_shutdown_signal().await;
        info!("Shutting down: stopping reminder scheduler and gateway");
        scheduler.shutdown().await;
        shard_manager.lock().await.shutdown_all().await;
    });

    info!("Establishing WebSocket connection to Discord gateway...");
    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    info!("Bot stopped");
    Ok(())
}
