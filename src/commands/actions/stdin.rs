//! Console command handlers.
//!
//! `whitelist` and `command` both write a line to the server console through
//! `POST servers/{id}/stdin`. The body is the raw console line, not JSON.

use log::debug;

use crate::{
    commands::{
        Reply,
        markdown_response::{format_command_sent, format_stdin_failed, format_whitelisted},
    },
    crafty::{ApiResult, Endpoint, Requester},
};

/// Runs `whitelist add <username>` on the server.
pub async fn handle_whitelist<R: Requester>(requester: &R, server_id: &str, username: &str) -> Reply {
    debug!("handling whitelist command for {} on {}", username, server_id);

    let command = format!("whitelist add {}", username);
    match requester
        .call(&Endpoint::Stdin(server_id.to_owned(), command))
        .await
    {
        ApiResult::Ok(_) => format_whitelisted(username),
        ApiResult::Error(message) => format_stdin_failed(&message),
    }
}

/// Sends a raw console command to the server.
pub async fn handle_console<R: Requester>(requester: &R, server_id: &str, command: &str) -> Reply {
    debug!("handling console command `{}` on {}", command, server_id);

    match requester
        .call(&Endpoint::Stdin(server_id.to_owned(), command.to_owned()))
        .await
    {
        ApiResult::Ok(_) => format_command_sent(command),
        ApiResult::Error(message) => format_stdin_failed(&message),
    }
}
