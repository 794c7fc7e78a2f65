//! Crafty Controller API integration.
//!
//! This module provides the HTTP client used to drive a Crafty Controller
//! instance, the typed routes it exposes and the structures decoded from its
//! JSON payloads.
//!
//! # Modules
//!
//! - `endpoint` - Typed routes with their method and body
//! - `requester` - HTTP client normalizing every outcome into an [`ApiResult`]
//! - `response_structs` - Server list and statistics payloads
//!
//! # Examples
//!
//! ```no_run
//! use craftybot::crafty::{CraftyRequester, Endpoint, Requester};
//!
//! let requester = CraftyRequester::new("https://crafty.example.com:8443", "api_key");
//! let result = requester.call(&Endpoint::Servers).await;
//! ```

mod endpoint;
mod requester;
mod response_structs;

use serde_json::Value;

#[cfg(test)]
pub use crate::crafty::requester::MockRequester;
pub use crate::crafty::{
    endpoint::{Endpoint, ServerAction},
    requester::{CraftyRequester, Requester},
    response_structs::{FieldPolicy, ServerStats, ServerSummary},
};

/// Normalized outcome of a Crafty API call.
///
/// Crafty answers with `{"status": "ok", "data": ...}` on success and
/// `{"status": "error", "error": ...}` otherwise. Transport failures are folded
/// into the same error shape so callers only ever match two cases.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResult {
    /// The `data` payload of a successful response, `null` when absent
    Ok(Value),
    /// Human readable failure description
    Error(String),
}

impl ApiResult {
    /// Builds a result from a decoded response body.
    ///
    /// Any status other than `"ok"` is an error. Its message is the `error`
    /// field when present, otherwise the whole body rendered as JSON.
    pub fn from_response(body: Value) -> Self {
        if body.get("status").and_then(Value::as_str) == Some("ok") {
            return ApiResult::Ok(body.get("data").cloned().unwrap_or(Value::Null));
        }

        let message = match body.get("error") {
            Some(Value::String(error)) => error.clone(),
            Some(error) => error.to_string(),
            None => body.to_string(),
        };
        ApiResult::Error(message)
    }
}
