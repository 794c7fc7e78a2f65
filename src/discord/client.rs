//! Discord gateway client wrapper.

use log::{error, info};
use serenity::all::{Client, GatewayIntents};

use crate::discord::handler::Handler;

/// Discord client connected to the gateway.
///
/// Slash commands and form submissions are interactions, so the bot asks for
/// no privileged or message intents.
pub struct DiscordClient {
    client: Client,
}

impl DiscordClient {
    /// Creates a client authenticated with `token`, dispatching events to `handler`.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is malformed.
    pub async fn new(token: &str, handler: Handler) -> Result<Self, anyhow::Error> {
        let client = Client::builder(token, GatewayIntents::empty())
            .event_handler(handler)
            .await?;

        Ok(DiscordClient { client })
    }

    /// Connects to the gateway and processes events until the connection ends.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is rejected or the connection is lost for good.
    pub async fn start(mut self) -> Result<(), anyhow::Error> {
        info!("connecting to discord");

        if let Err(e) = self.client.start().await {
            error!("discord client ended with error: {}", e);
            return Err(e.into());
        }

        info!("discord client ended");
        Ok(())
    }
}
