//! Typed routes of the Crafty Controller API.
//!
//! Every request the bot sends goes through an [`Endpoint`], which knows its
//! HTTP method, its path relative to `/api/v2/` and its optional body.

use std::fmt;

use serde_json::Value;

/// HTTP methods supported by the Crafty API client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    #[allow(dead_code)]
    Patch,
    #[allow(dead_code)]
    Delete,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        };
        write!(f, "{}", name)
    }
}

/// Request body sent to the Crafty API.
///
/// Console commands are sent as literal text, everything else as JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    /// Raw text, sent as `text/plain`
    Text(String),
    /// JSON document, sent as `application/json`
    #[allow(dead_code)]
    Json(Value),
}

/// Power and maintenance actions exposed by `servers/{id}/action/{verb}_server`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerAction {
    Start,
    Stop,
    Restart,
    Kill,
    Backup,
}

impl ServerAction {
    /// Verb used in the action route and as the slash command name.
    pub fn verb(&self) -> &'static str {
        match self {
            ServerAction::Start => "start",
            ServerAction::Stop => "stop",
            ServerAction::Restart => "restart",
            ServerAction::Kill => "kill",
            ServerAction::Backup => "backup",
        }
    }
}

/// A route of the Crafty API together with its method and body.
///
/// # Examples
///
/// ```
/// # use craftybot::crafty::{Endpoint, Method, ServerAction};
/// let endpoint = Endpoint::Action("abc".to_string(), ServerAction::Start);
/// assert_eq!(endpoint.method(), Method::Post);
/// assert_eq!(endpoint.path(), "servers/abc/action/start_server");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Endpoint {
    /// `GET servers`: list every server
    Servers,
    /// `GET servers/{id}/stats`: live statistics of a server
    Stats(String),
    /// `GET servers/{id}/logs`: recent console lines of a server
    Logs(String),
    /// `POST servers/{id}/action/{verb}_server`
    Action(String, ServerAction),
    /// `POST servers/{id}/stdin` with the raw console command as body
    Stdin(String, String),
}

impl Endpoint {
    pub fn method(&self) -> Method {
        match self {
            Endpoint::Servers | Endpoint::Stats(_) | Endpoint::Logs(_) => Method::Get,
            Endpoint::Action(_, _) | Endpoint::Stdin(_, _) => Method::Post,
        }
    }

    /// Path relative to the `/api/v2/` prefix.
    pub fn path(&self) -> String {
        match self {
            Endpoint::Servers => "servers".to_owned(),
            Endpoint::Stats(server_id) => format!("servers/{}/stats", server_id),
            Endpoint::Logs(server_id) => format!("servers/{}/logs", server_id),
            Endpoint::Action(server_id, action) => {
                format!("servers/{}/action/{}_server", server_id, action.verb())
            }
            Endpoint::Stdin(server_id, _) => format!("servers/{}/stdin", server_id),
        }
    }

    pub fn body(&self) -> Option<Body> {
        match self {
            Endpoint::Stdin(_, command) => Some(Body::Text(command.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}", self.method(), self.path())
    }
}
