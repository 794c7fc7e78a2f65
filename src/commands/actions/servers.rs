//! Servers command handler.
//!
//! Lists every server known to Crafty with the following information:
//! - Name, id, type and port from the server list
//! - Running status and player count from one stats call per server
//!
//! This is a read-only command issuing N+1 API calls, sequentially.

use log::{debug, warn};

use crate::{
    commands::{
        Reply,
        markdown_response::{ServerLine, format_error, format_no_servers, format_servers},
    },
    crafty::{ApiResult, Endpoint, FieldPolicy, Requester, ServerStats, ServerSummary},
};

/// Discord accepts at most this many fields in an embed.
const EMBED_FIELD_LIMIT: usize = 25;

/// Lists servers with their live status.
///
/// Only the first 25 servers are listed and queried for their statistics. A
/// failed stats call shows the server offline instead of failing the command.
pub async fn handle_servers<R: Requester>(requester: &R) -> Reply {
    debug!("handling servers command");

    let data = match requester.call(&Endpoint::Servers).await {
        ApiResult::Ok(data) => data,
        ApiResult::Error(message) => return format_error(&message),
    };

    if data.is_null() {
        return format_no_servers();
    }
    let servers: Vec<ServerSummary> = match serde_json::from_value(data) {
        Ok(servers) => servers,
        Err(e) => return format_error(&e.to_string()),
    };
    if servers.is_empty() {
        return format_no_servers();
    }

    let mut lines = Vec::with_capacity(servers.len().min(EMBED_FIELD_LIMIT));
    for summary in servers.iter().take(EMBED_FIELD_LIMIT) {
        let stats = match requester.call(&Endpoint::Stats(summary.id())).await {
            ApiResult::Ok(data) => ServerStats::from_value(&data, FieldPolicy::Lenient).ok(),
            ApiResult::Error(message) => {
                warn!("no stats for server {}: {}", summary, message);
                None
            }
        };
        lines.push(ServerLine { summary, stats });
    }

    format_servers(&lines)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::commands::EmbedReply;
    use crate::crafty::MockRequester;

    fn embed(reply: Reply) -> EmbedReply {
        match reply {
            Reply::Embed(embed) => embed,
            other => panic!("Expected embed reply, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_handle_servers_lists_with_stats() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .withf(|endpoint| *endpoint == Endpoint::Servers)
            .times(1)
            .returning(|_| {
                ApiResult::Ok(json!([
                    {"server_id": "s1", "server_name": "Survival", "type": "minecraft-java", "server_port": 25565},
                    {"server_id": "s2", "server_name": "Creative", "type": "minecraft-java", "server_port": 25566}
                ]))
            });
        mock_requester
            .expect_call()
            .withf(|endpoint| *endpoint == Endpoint::Stats("s1".to_string()))
            .times(1)
            .returning(|_| ApiResult::Ok(json!({"running": true, "online": 3, "max": 20})));
        mock_requester
            .expect_call()
            .withf(|endpoint| *endpoint == Endpoint::Stats("s2".to_string()))
            .times(1)
            .returning(|_| ApiResult::Error("unreachable".to_string()));

        let reply = embed(handle_servers(&mock_requester).await);

        assert_eq!(reply.title, "🖥️ Your Minecraft Servers");
        assert_eq!(reply.fields.len(), 2);
        assert_eq!(reply.fields[0].name, "Survival");
        assert!(reply.fields[0].value.contains("🟢 Running"));
        assert!(reply.fields[0].value.contains("**Players:** 3/20"));
        assert_eq!(reply.fields[1].name, "Creative");
        assert!(reply.fields[1].value.contains("🔴 Offline"));
        assert!(reply.fields[1].value.contains("**Players:** N/A"));
    }

    #[tokio::test]
    async fn test_handle_servers_empty() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .times(1)
            .returning(|_| ApiResult::Ok(json!([])));

        let reply = handle_servers(&mock_requester).await;
        assert_eq!(reply, Reply::Text("❌ No servers found!".to_string()));
    }

    #[tokio::test]
    async fn test_handle_servers_without_data() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .times(1)
            .returning(|_| ApiResult::Ok(serde_json::Value::Null));

        let reply = handle_servers(&mock_requester).await;
        assert_eq!(reply, Reply::Text("❌ No servers found!".to_string()));
    }

    #[tokio::test]
    async fn test_handle_servers_error() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .times(1)
            .returning(|_| ApiResult::Error("INVALID_API_KEY".to_string()));

        let reply = handle_servers(&mock_requester).await;
        assert_eq!(reply, Reply::Text("❌ Error: INVALID_API_KEY".to_string()));
    }

    #[tokio::test]
    async fn test_handle_servers_caps_embed_fields() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .withf(|endpoint| *endpoint == Endpoint::Servers)
            .times(1)
            .returning(|_| {
                let servers: Vec<_> = (0..30)
                    .map(|i| json!({"server_id": format!("s{}", i), "server_name": format!("Server {}", i)}))
                    .collect();
                ApiResult::Ok(json!(servers))
            });
        mock_requester
            .expect_call()
            .withf(|endpoint| matches!(endpoint, Endpoint::Stats(_)))
            .times(EMBED_FIELD_LIMIT)
            .returning(|_| ApiResult::Ok(json!({"running": false})));

        let reply = embed(handle_servers(&mock_requester).await);
        assert_eq!(reply.fields.len(), EMBED_FIELD_LIMIT);
    }

    #[tokio::test]
    async fn test_handle_servers_is_idempotent() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .withf(|endpoint| *endpoint == Endpoint::Servers)
            .times(2)
            .returning(|_| ApiResult::Ok(json!([{"server_id": "s1", "server_name": "Survival"}])));
        mock_requester
            .expect_call()
            .withf(|endpoint| matches!(endpoint, Endpoint::Stats(_)))
            .times(2)
            .returning(|_| ApiResult::Ok(json!({"running": true, "online": 1, "max": 5})));

        let first = handle_servers(&mock_requester).await;
        let second = handle_servers(&mock_requester).await;
        assert_eq!(first, second);
    }
}
