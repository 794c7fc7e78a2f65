//! Power and backup command handler.
//!
//! Triggers `start`, `stop`, `restart`, `kill` or `backup` on a server. The
//! action is fire-and-forget: the reply only acknowledges that Crafty accepted
//! it, completion is never polled.

use log::debug;

use crate::{
    commands::{
        Reply,
        markdown_response::{format_action_failed, format_action_started},
    },
    crafty::{ApiResult, Endpoint, Requester, ServerAction},
};

/// Sends `action` to the server and acknowledges it.
pub async fn handle_power<R: Requester>(
    requester: &R,
    server_id: &str,
    action: ServerAction,
) -> Reply {
    debug!("handling {} command for server {}", action.verb(), server_id);

    let endpoint = Endpoint::Action(server_id.to_owned(), action);
    match requester.call(&endpoint).await {
        ApiResult::Ok(_) => format_action_started(action),
        ApiResult::Error(message) => format_action_failed(action, &message),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::crafty::MockRequester;

    #[tokio::test]
    async fn test_handle_power_acknowledges() {
        let cases = [
            (ServerAction::Start, "✅ Starting server..."),
            (ServerAction::Stop, "✅ Stopping server..."),
            (ServerAction::Restart, "✅ Restarting server..."),
            (ServerAction::Kill, "✅ Force killing server..."),
            (ServerAction::Backup, "✅ Backing up server..."),
        ];

        for (action, expected) in cases {
            let mut mock_requester = MockRequester::new();
            mock_requester
                .expect_call()
                .withf(move |endpoint| {
                    *endpoint == Endpoint::Action("s1".to_string(), action)
                })
                .times(1)
                .returning(|_| ApiResult::Ok(Value::Null));

            let reply = handle_power(&mock_requester, "s1", action).await;
            assert_eq!(reply, Reply::Text(expected.to_string()));
        }
    }

    #[tokio::test]
    async fn test_handle_power_failure() {
        let mut mock_requester = MockRequester::new();
        mock_requester
            .expect_call()
            .times(1)
            .returning(|_| ApiResult::Error("SERVER_NOT_RUNNING".to_string()));

        let reply = handle_power(&mock_requester, "s1", ServerAction::Stop).await;
        assert_eq!(
            reply,
            Reply::Text("❌ Failed to stop: SERVER_NOT_RUNNING".to_string())
        );
    }
}
