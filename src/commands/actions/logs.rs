//! Logs command handler.
//!
//! Shows the last lines of a server console as a code block, trimmed from the
//! front when they do not fit in a Discord message.

use log::debug;

use crate::{
    commands::{
        Reply,
        markdown_response::{format_error, format_logs},
    },
    crafty::{ApiResult, Endpoint, Requester},
};

/// Fetches the console and formats its last `lines` lines.
pub async fn handle_logs<R: Requester>(requester: &R, server_id: &str, lines: usize) -> Reply {
    debug!("handling logs command for server {} ({} lines)", server_id, lines);

    let data = match requester.call(&Endpoint::Logs(server_id.to_owned())).await {
        ApiResult::Ok(data) => data,
        ApiResult::Error(message) => return format_error(&message),
    };

    if data.is_null() {
        return format_logs(&[], lines);
    }
    match serde_json::from_value::<Vec<String>>(data) {
        Ok(log_lines) => format_logs(&log_lines, lines),
        Err(e) => format_error(&e.to_string()),
    }
}
