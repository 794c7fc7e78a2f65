//! Craftybot - A Discord bot for Crafty Controller game servers.
//!
//! This is the main entry point of the bot, which relays Discord slash commands
//! to the REST API of a Crafty Controller instance.
//!
//! # Overview
//!
//! The bot lets a single owner manage their game servers from Discord: listing
//! servers, power actions, backups, statistics, whitelisting, console commands
//! and recent logs. Every reply is only visible to the caller.
//!
//! # Configuration
//!
//! Create a `config.yaml` file with your settings:
//!
//! ```yaml
//! crafty:
//!   url: "https://crafty.example.com:8443"
//!   api_key: "your-api-key"
//!
//! discord:
//!   token: "your-bot-token"
//!   owner_id: 123456789012345678
//! ```
//!
//! # Environment Variable Overrides
//!
//! Override any configuration value using environment variables with the `CRAFTYBOT_` prefix:
//!
//! ```bash
//! export CRAFTYBOT_CRAFTY__URL="https://crafty.example.com:8443"
//! export CRAFTYBOT_CRAFTY__API_KEY="your-api-key"
//! export CRAFTYBOT_DISCORD__TOKEN="your-bot-token"
//! export CRAFTYBOT_DISCORD__OWNER_ID="123456789012345678"
//! ```
//!
//! `CRAFTY_BASE_URL`, `CRAFTY_API_KEY`, `DISCORD_TOKEN` and `BOT_OWNER_ID` are
//! also accepted, so the bot runs without any configuration file.

use std::process;

use clap::Parser;
use env_logger::Env;
use log::{error, info};

use crate::{bot::Bot, config::Config};

mod bot;
mod commands;
mod config;
mod crafty;
mod discord;
mod gate;
mod utils;

/// Command-line arguments.
///
/// # Examples
///
/// ```bash
/// craftybot --config config.yaml
/// ```
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the YAML configuration file.
    ///
    /// Optional when every value is provided through environment variables.
    /// See the [`config`] module for the expected format.
    #[arg(short, long)]
    config: Option<String>,
}

/// Main entry point of the bot.
///
/// 1. **Logging Setup**: `info` level by default, overridden by `RUST_LOG`
/// 2. **Argument Parsing**: Parses command-line arguments using `clap`
/// 3. **Configuration Loading**: Merges the YAML file and environment variables
/// 4. **Bot Execution**: Connects to Discord and serves interactions until the
///    connection ends
///
/// A configuration, startup or connection error is logged and ends the
/// process with a non-zero status.
#[tokio::main]
async fn main() {
    // Put logger at info level by default
    let env = Env::default().filter_or("RUST_LOG", "info");
    env_logger::init_from_env(env);

    info!("Starting craftybot {}...", env!("CARGO_PKG_VERSION"));

    // Parse command line arguments
    let args = Args::parse();

    // Load configuration from the YAML file and the environment
    let config = match Config::load(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Launch bot
    let bot = match Bot::new(config).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to initialize bot: {}", e);
            process::exit(1);
        }
    };
    if let Err(e) = bot.start().await {
        error!("Bot stopped: {}", e);
        process::exit(1);
    }
}
