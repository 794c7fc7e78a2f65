//! Command action handlers.
//!
//! Individual handler functions for each slash command. Each handler receives
//! the [`Requester`](crate::crafty::Requester) and the command arguments,
//! performs its Crafty API call(s) and returns a [`Reply`](crate::commands::Reply).
//!
//! # Handler Pattern
//!
//! Handlers follow a consistent pattern:
//! 1. Call the typed [`Endpoint`](crate::crafty::Endpoint) of the command
//! 2. Render [`ApiResult::Error`](crate::crafty::ApiResult) messages verbatim
//! 3. Format the payload on success
//!
//! Handlers never retry and never change their request after a failure.
//!
//! # Available Handlers
//!
//! - [`handle_servers`] - List servers with their live status
//! - [`handle_power`] - Start, stop, restart, kill or backup a server
//! - [`handle_stats`] - Show the statistics of a server
//! - [`handle_whitelist`] - Whitelist a player through the console
//! - [`handle_console`] - Send a raw console command
//! - [`handle_logs`] - Show the last console lines

mod logs;
mod power;
mod servers;
mod stats;
mod stdin;

pub use crate::commands::actions::{
    logs::handle_logs,
    power::handle_power,
    servers::handle_servers,
    stats::handle_stats,
    stdin::{handle_console, handle_whitelist},
};
