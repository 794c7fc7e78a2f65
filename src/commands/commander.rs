//! Command orchestration and execution.
//!
//! This module provides the [`Commander`] struct, which serves as the main entry point
//! for processing slash commands, and the [`Responder`] trait through which it talks
//! back to the chat platform.
//!
//! # Flow
//!
//! ```text
//! SlashCommand → gate → plan() → ShowForm → Responder::show_form
//!                              → Run      → Responder::defer → handler → Responder::follow_up
//! ```
//!
//! The owner check always comes first, so a rejected caller never triggers a
//! deferral, a form or an API call.

use log::{error, info};
use mockall::automock;

use crate::{
    commands::{
        Reply,
        actions::{
            handle_console, handle_logs, handle_power, handle_servers, handle_stats,
            handle_whitelist,
        },
        command::{Operation, Plan, SlashCommand},
        form::Form,
        markdown_response::{format_access_denied, format_unexpected_error},
    },
    crafty::{FieldPolicy, Requester},
    gate::AccessGate,
};

/// Two-phase reply channel of a single interaction.
///
/// An interaction is answered exactly once with [`Responder::reply`],
/// [`Responder::defer`] or [`Responder::show_form`]. After a deferral the real
/// content is sent with [`Responder::follow_up`]. Every message is private to
/// the caller.
#[automock]
pub trait Responder {
    /// Answers the interaction right away with `reply`.
    async fn reply(&self, reply: Reply) -> Result<(), anyhow::Error>;
    /// Acknowledges the interaction, the content follows later.
    async fn defer(&self) -> Result<(), anyhow::Error>;
    /// Answers the interaction with a pop-up form.
    async fn show_form(&self, form: &Form) -> Result<(), anyhow::Error>;
    /// Sends `reply` after the interaction was answered.
    async fn follow_up(&self, reply: Reply) -> Result<(), anyhow::Error>;
    /// Whether the interaction has already been answered.
    fn has_responded(&self) -> bool;
}

/// Command orchestrator for slash commands.
///
/// The Commander is responsible for:
/// - Rejecting anyone but the owner
/// - Showing a form when a command misses its optional text argument
/// - Deferring the response while the Crafty API is called
/// - Routing commands to the appropriate action handler
///
/// It holds no mutable state and is shared by every interaction.
pub struct Commander<R: Requester> {
    /// Crafty API client
    requester: R,
    /// Owner-only guard
    gate: AccessGate,
    /// Treatment of malformed stats fields
    field_policy: FieldPolicy,
}

impl<R: Requester> Commander<R> {
    /// Creates a new Commander.
    ///
    /// # Arguments
    ///
    /// * `requester` - Client used to reach the Crafty API
    /// * `gate` - Guard deciding who may run commands
    /// * `field_policy` - How the `stats` command treats malformed fields
    pub fn new(requester: R, gate: AccessGate, field_policy: FieldPolicy) -> Self {
        Commander {
            requester,
            gate,
            field_policy,
        }
    }

    /// Id of the only user allowed to run commands.
    pub fn owner_id(&self) -> u64 {
        self.gate.owner_id()
    }

    /// Handles an invoked command from `caller_id` and answers through `responder`.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The interaction was answered
    /// * `Err(anyhow::Error)` - The responder failed, see [`report_failure`]
    pub async fn handle<P: Responder>(
        &self,
        caller_id: u64,
        command: SlashCommand,
        responder: &P,
    ) -> Result<(), anyhow::Error> {
        if !self.gate.authorize(caller_id) {
            return responder.reply(format_access_denied()).await;
        }

        info!("running {} command", command.name());

        match command.plan() {
            Plan::ShowForm(form) => {
                info!("showing form {}", form.custom_id());
                responder.show_form(&form).await
            }
            Plan::Run(operation) => {
                responder.defer().await?;
                let reply = self.execute(&operation).await;
                responder.follow_up(reply).await
            }
        }
    }

    /// Runs an operation against the Crafty API and formats its outcome.
    pub async fn execute(&self, operation: &Operation) -> Reply {
        match operation {
            Operation::Servers => handle_servers(&self.requester).await,
            Operation::Power(server_id, action) => {
                handle_power(&self.requester, server_id, *action).await
            }
            Operation::Stats(server_id) => {
                handle_stats(&self.requester, server_id, self.field_policy).await
            }
            Operation::Whitelist(server_id, username) => {
                handle_whitelist(&self.requester, server_id, username).await
            }
            Operation::Console(server_id, command) => {
                handle_console(&self.requester, server_id, command).await
            }
            Operation::Logs(server_id, lines) => {
                handle_logs(&self.requester, server_id, *lines).await
            }
        }
    }
}

/// Reports an unexpected failure to the caller.
///
/// The error becomes the interaction's answer when nothing was sent yet,
/// otherwise it is sent as a follow-up. A failure to report is only logged.
pub async fn report_failure<P: Responder>(responder: &P, failure: &anyhow::Error) {
    error!("command failed: {:#}", failure);

    let reply = format_unexpected_error(&failure.to_string());
    let sent = match responder.has_responded() {
        true => responder.follow_up(reply).await,
        false => responder.reply(reply).await,
    };

    if let Err(e) = sent {
        error!("unable to report failure: {:#}", e);
    }
}
