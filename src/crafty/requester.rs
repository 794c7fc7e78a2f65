//! HTTP client for the Crafty Controller API.
//!
//! This module provides the [`CraftyRequester`] struct for sending requests to
//! the `/api/v2/` routes of a Crafty Controller instance and normalizing every
//! outcome into an [`ApiResult`].

use log::{debug, info, warn};
use mockall::automock;
use reqwest::{Client, header::CONTENT_TYPE};
use serde_json::Value;

use crate::crafty::{
    ApiResult,
    endpoint::{Body, Endpoint, Method},
};

/// HTTP client for the Crafty Controller API.
///
/// Every request carries the API key as a bearer token. Failures never escape
/// this type: transport errors, non-2xx statuses and undecodable bodies all
/// become [`ApiResult::Error`].
///
/// # Examples
///
/// ```no_run
/// let requester = CraftyRequester::new("https://crafty.example.com:8443", "api_key");
/// let result = requester.call(&Endpoint::Servers).await;
/// println!("Servers: {:?}", result);
/// ```
pub struct CraftyRequester {
    /// Crafty Controller base url, without trailing slash
    url: String,
    /// API token generated in the Crafty panel
    api_key: String,
    /// HTTP client
    client: Client,
}

/// Trait for calling the Crafty API.
///
/// This trait abstracts the HTTP operations for easier testing with mocks.
#[automock]
pub trait Requester {
    /// Sends the request described by `endpoint`.
    async fn call(&self, endpoint: &Endpoint) -> ApiResult;
}

impl CraftyRequester {
    /// Create a new [CraftyRequester].
    ///
    /// # Arguments
    ///
    /// * `url` - The base URL of the Crafty Controller instance.
    /// * `api_key` - The API token used as bearer token.
    pub fn new(url: &str, api_key: &str) -> Self {
        let client = reqwest::Client::new();
        CraftyRequester {
            url: url.to_string(),
            api_key: api_key.to_string(),
            client,
        }
    }

    /// Sends a request to `{url}/api/v2/{path}`.
    ///
    /// The `Content-Type` header is `text/plain` for a POST without body or
    /// with a raw text body, `application/json` otherwise.
    ///
    /// # Arguments
    ///
    /// * `method` - The HTTP method.
    /// * `path` - The route, relative to `/api/v2/`.
    /// * `body` - The optional request body.
    pub async fn request(&self, method: Method, path: &str, body: Option<Body>) -> ApiResult {
        info!("request {} {}", method, path);

        match self.send(method, path, body).await {
            Ok(response) => {
                debug!("response from {} {} -> {}", method, path, response);
                ApiResult::from_response(response)
            }
            Err(e) => {
                warn!("request {} {} failed: {}", method, path, e);
                ApiResult::Error(e.to_string())
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<Body>,
    ) -> Result<Value, reqwest::Error> {
        let url = format!("{}/api/v2/{}", &self.url, path);

        let mut builder = self
            .client
            .request(method.into(), &url)
            .bearer_auth(&self.api_key)
            .header(CONTENT_TYPE, content_type(method, body.as_ref()));

        builder = match body {
            Some(Body::Text(text)) => builder.body(text),
            Some(Body::Json(json)) => builder.body(json.to_string()),
            None => builder,
        };

        builder.send().await?.error_for_status()?.json().await
    }
}

impl Requester for CraftyRequester {
    async fn call(&self, endpoint: &Endpoint) -> ApiResult {
        self.request(endpoint.method(), &endpoint.path(), endpoint.body())
            .await
    }
}

fn content_type(method: Method, body: Option<&Body>) -> &'static str {
    match (method, body) {
        (Method::Patch, _) => "application/json",
        (Method::Post, None | Some(Body::Text(_))) => "text/plain",
        _ => "application/json",
    }
}

#[cfg(test)]
mod tests {
    use mockito::Matcher;
    use serde_json::json;

    use super::*;
    use crate::crafty::ServerAction;

    #[tokio::test]
    async fn test_call_servers() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();
        let body = r#"{"status": "ok", "data": [{"server_id": "s1", "server_name": "Survival"}]}"#;

        let mock = server
            .mock("GET", "/api/v2/servers")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester.call(&Endpoint::Servers).await;

        mock.assert_async().await;
        assert_eq!(
            result,
            ApiResult::Ok(json!([{"server_id": "s1", "server_name": "Survival"}]))
        );
    }

    #[tokio::test]
    async fn test_call_action_sends_plain_text_post() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/api/v2/servers/s1/action/start_server")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "text/plain")
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester
            .call(&Endpoint::Action("s1".to_string(), ServerAction::Start))
            .await;

        mock.assert_async().await;
        assert_eq!(result, ApiResult::Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_call_stdin_sends_raw_command() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("POST", "/api/v2/servers/s1/stdin")
            .match_header("content-type", "text/plain")
            .match_body(Matcher::Exact("whitelist add Steve".to_string()))
            .with_status(200)
            .with_body(r#"{"status": "ok", "data": {}}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester
            .call(&Endpoint::Stdin(
                "s1".to_string(),
                "whitelist add Steve".to_string(),
            ))
            .await;

        mock.assert_async().await;
        assert_eq!(result, ApiResult::Ok(json!({})));
    }

    #[tokio::test]
    async fn test_request_patch_sends_json() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("PATCH", "/api/v2/servers/s1")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({"server_name": "Creative"})))
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester
            .request(
                Method::Patch,
                "servers/s1",
                Some(Body::Json(json!({"server_name": "Creative"}))),
            )
            .await;

        mock.assert_async().await;
        assert_eq!(result, ApiResult::Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_request_delete() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("DELETE", "/api/v2/servers/s1")
            .with_status(200)
            .with_body(r#"{"status": "ok"}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester.request(Method::Delete, "servers/s1", None).await;

        mock.assert_async().await;
        assert_eq!(result, ApiResult::Ok(Value::Null));
    }

    #[tokio::test]
    async fn test_call_error_status_field() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/api/v2/servers/s1/stats")
            .with_status(200)
            .with_body(r#"{"status": "error", "error": "NOT_FOUND"}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester.call(&Endpoint::Stats("s1".to_string())).await;

        assert_eq!(result, ApiResult::Error("NOT_FOUND".to_string()));
    }

    #[tokio::test]
    async fn test_call_http_error_status() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/api/v2/servers/s1/logs")
            .with_status(403)
            .with_body(r#"{"status": "error", "error": "ACCESS_DENIED"}"#)
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester.call(&Endpoint::Logs("s1".to_string())).await;

        match result {
            ApiResult::Error(message) => assert!(message.contains("403")),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_invalid_json() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        server
            .mock("GET", "/api/v2/servers")
            .with_status(200)
            .with_body("<html>not json</html>")
            .create_async()
            .await;

        let requester = CraftyRequester::new(&url, "secret");
        let result = requester.call(&Endpoint::Servers).await;

        match result {
            ApiResult::Error(message) => assert!(!message.is_empty()),
            other => panic!("Expected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_call_unreachable_server() {
        // Nothing listens on port 1
        let requester = CraftyRequester::new("http://127.0.0.1:1", "secret");
        let result = requester.call(&Endpoint::Servers).await;

        assert!(matches!(result, ApiResult::Error(message) if !message.is_empty()));
    }

    #[test]
    fn test_content_type() {
        assert_eq!(content_type(Method::Get, None), "application/json");
        assert_eq!(content_type(Method::Delete, None), "application/json");
        assert_eq!(content_type(Method::Post, None), "text/plain");
        assert_eq!(
            content_type(Method::Post, Some(&Body::Text("list".to_string()))),
            "text/plain"
        );
        assert_eq!(
            content_type(Method::Post, Some(&Body::Json(json!({})))),
            "application/json"
        );
        assert_eq!(
            content_type(Method::Patch, Some(&Body::Text("x".to_string()))),
            "application/json"
        );
    }
}
