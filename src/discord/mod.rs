//! Discord integration for the bot.
//!
//! This module connects to the Discord gateway and bridges interactions to the
//! command pipeline:
//! - **Client**: Gateway connection via [`DiscordClient`]
//! - **Handler**: Slash command registration and interaction routing
//! - **Responder**: Ephemeral replies, deferrals, follow-ups and forms

mod client;
mod handler;
mod responder;

pub use crate::discord::{client::DiscordClient, handler::Handler};
