//! Bot module wiring the Crafty Controller client to Discord.
//!
//! This module provides the main [`Bot`] implementation that connects a Discord
//! client with a Crafty Controller instance.
//!
//! # Architecture
//!
//! ```text
//! Discord gateway → Handler → Commander → action handler → CraftyRequester → Crafty API
//!                                 │
//!                                 └─▶ InteractionResponder → Discord HTTP API
//! ```
//!
//! Each interaction is processed in its own task by the gateway client. The
//! [`Commander`] holds no mutable state, so it is shared as is.

use std::sync::Arc;

use log::info;

use crate::{
    commands::Commander,
    config::Config,
    crafty::CraftyRequester,
    discord::{DiscordClient, Handler},
    gate::AccessGate,
};

pub struct Bot {
    discord_client: DiscordClient,
}

impl Bot {
    pub async fn new(config: Config) -> Result<Self, anyhow::Error> {
        // Create crafty services
        let crafty_requester = CraftyRequester::new(&config.crafty.url, &config.crafty.api_key);
        info!("relaying commands to {}", config.crafty.url);

        let gate = AccessGate::new(config.discord.owner_id);
        let commander = Arc::new(Commander::new(
            crafty_requester,
            gate,
            config.crafty.field_policy,
        ));

        // Create discord client
        let handler = Handler::new(commander);
        let discord_client = DiscordClient::new(&config.discord.token, handler).await?;

        Ok(Bot { discord_client })
    }

    pub async fn start(self) -> Result<(), anyhow::Error> {
        self.discord_client.start().await
    }
}
