//! Slash command dispatch and reply formatting.
//!
//! This module provides the complete command processing pipeline of the bot,
//! from an invoked slash command to the reply sent back to the caller.
//!
//! # Overview
//!
//! 1. **Parsing** - Converting a command name and its options into a [`SlashCommand`]
//! 2. **Access control** - Rejecting anyone but the owner before any side effect
//! 3. **Planning** - Showing a [`Form`] when an optional text argument is missing
//! 4. **Execution** - Calling the Crafty API through the matching action handler
//! 5. **Response** - Formatting the outcome as a [`Reply`]
//!
//! # Architecture
//!
//! ```text
//! Interaction
//!      │
//!      ▼
//! ┌─────────────┐   denied    ┌───────────────────┐
//! │  Commander  │ ──────────▶ │ Responder::reply  │
//! └─────────────┘             └───────────────────┘
//!      │ plan()
//!      ├── ShowForm ─────────▶ Responder::show_form
//!      │
//!      └── Run ──▶ Responder::defer ──▶ action handler ──▶ Responder::follow_up
//! ```
//!
//! # Available Commands
//!
//! | Command | Arguments | Description |
//! |---------|-----------|-------------|
//! | `servers` | None | List all servers with their status |
//! | `start`, `stop`, `restart`, `kill` | `<server_id>` | Power actions |
//! | `backup` | `<server_id>` | Start a backup |
//! | `stats` | `<server_id>` | Show server statistics |
//! | `whitelist` | `<server_id> [username]` | Whitelist a player |
//! | `command` | `<server_id> [command]` | Send a console command |
//! | `logs` | `<server_id> [lines]` | Show the last console lines |
//!
//! # Module Organization
//!
//! - [`commander`] - Access control and the defer/follow-up protocol
//! - [`command`] - Command declarations and parsing
//! - [`form`] - Pop-up forms collecting a missing argument
//! - [`actions`] - Individual command handler implementations
//! - [`markdown_response`] - Response formatting utilities

mod actions;
mod command;
mod commander;
mod form;
pub mod markdown_response;

pub use crate::commands::{
    command::{
        COMMAND_DEFINITIONS, CommandDefinition, CommandOption, OptionKind, OptionValue, SlashCommand,
    },
    commander::{Commander, Responder, report_failure},
    form::{Form, INPUT_ID},
};
#[cfg(test)]
pub use crate::commands::commander::MockResponder;

/// Colour of an embed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbedColour {
    Blue,
    Green,
    Red,
}

impl EmbedColour {
    /// RGB value of the colour.
    pub fn rgb(&self) -> u32 {
        match self {
            EmbedColour::Blue => 0x3498db,
            EmbedColour::Green => 0x2ecc71,
            EmbedColour::Red => 0xe74c3c,
        }
    }
}

/// A named field of an embed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

/// A rich reply with a title, a colour and fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedReply {
    pub title: String,
    pub colour: EmbedColour,
    pub fields: Vec<EmbedField>,
}

#[cfg(test)]
impl EmbedReply {
    /// Value of the first field named `name`.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.value.as_str())
    }
}

/// Reply sent back to the caller.
///
/// Every reply is sent privately, only the caller can see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Markdown text
    Text(String),
    /// Embed
    Embed(EmbedReply),
}
