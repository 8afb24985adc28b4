use anyhow::{Context as _, Result};
use serenity::async_trait;
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::prelude::{Client, Context, EventHandler, GatewayIntents};
use std::sync::Arc;

use super::router::{Route, route_message};
use crate::request_engine::{GENERIC_FAILURE_REPLY, TurnEngine};
use crate::session::SessionKey;

struct WeatherHandler {
    engine: Arc<TurnEngine>,
}

#[async_trait]
impl EventHandler for WeatherHandler {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        tracing::info!(user = %ready.user.name, "logged in");
        tracing::info!("Ready to provide weather updates!");
    }

    async fn message(&self, ctx: Context, msg: Message) {
        let bot_id = ctx.cache.current_user().id;
        if msg.author.id == bot_id || !msg.mentions_user_id(bot_id) {
            return;
        }

        let reply = match route_message(&msg.content) {
            Route::Query(text) => self.answer(&msg, text).await,
            route => route.canned_reply().unwrap_or(GENERIC_FAILURE_REPLY).to_string(),
        };

        if let Err(err) = msg.channel_id.say(&ctx.http, reply).await {
            tracing::error!(channel = msg.channel_id.get(), error = %err, "failed to send reply");
        }
    }
}

impl WeatherHandler {
    /// The turn runs in its own task so a panic turns into the generic reply
    /// instead of tearing down the shard.
    async fn answer(&self, msg: &Message, text: String) -> String {
        let key = SessionKey::Channel {
            channel_id: msg.channel_id.get(),
            user_id: msg.author.id.get(),
        };
        let engine = Arc::clone(&self.engine);
        let turn = tokio::spawn(async move { engine.answer(&key, &text).await });
        match turn.await {
            Ok(reply) => reply,
            Err(err) => {
                tracing::error!(session = %key, error = %err, "turn task aborted");
                GENERIC_FAILURE_REPLY.to_string()
            }
        }
    }
}

pub async fn run_discord(token: &str, engine: Arc<TurnEngine>) -> Result<()> {
    let intents = GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::MESSAGE_CONTENT;
    let mut client = Client::builder(token, intents)
        .event_handler(WeatherHandler { engine })
        .await
        .context("failed to create Discord client")?;
    client.start().await.context("Discord client stopped")?;
    Ok(())
}
