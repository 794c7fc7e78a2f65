//! Stats command handler.
//!
//! Shows the live statistics of a server: status, CPU and memory usage, player
//! count and names, version, port, world size and ping status, plus warnings
//! when the server has crashed or is updating.

use log::debug;

use crate::{
    commands::{
        Reply,
        markdown_response::{format_error, format_stats},
    },
    crafty::{ApiResult, Endpoint, FieldPolicy, Requester, ServerStats},
};

/// Fetches and formats the statistics of a server.
///
/// `policy` decides whether missing or malformed fields fall back to
/// placeholders or fail the command.
pub async fn handle_stats<R: Requester>(
    requester: &R,
    server_id: &str,
    policy: FieldPolicy,
) -> Reply {
    debug!("handling stats command for server {}", server_id);

    let data = match requester.call(&Endpoint::Stats(server_id.to_owned())).await {
        ApiResult::Ok(data) => data,
        ApiResult::Error(message) => return format_error(&message),
    };

    match ServerStats::from_value(&data, policy) {
        Ok(stats) => format_stats(server_id, &stats),
        Err(e) => format_error(&e.to_string()),
    }
}
