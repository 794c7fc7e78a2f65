//! Payload structures for Crafty API endpoints.
//!
//! This module contains the structures decoded from the `data` payload of
//! `/api/v2/servers` and `/api/v2/servers/{id}/stats`.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::utils::value_text;

/// Representation of a server from `/api/v2/servers`.
///
/// Only the fields displayed by the bot are kept. Crafty sends the id as a
/// UUID string in recent versions and as a number in older ones.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ServerSummary {
    /// Opaque server identifier.
    #[serde(default)]
    pub server_id: Value,
    /// Display name of the server.
    #[serde(default)]
    pub server_name: Option<String>,
    /// Server type, e.g. `minecraft-java`.
    #[serde(rename = "type", default)]
    pub server_type: Option<String>,
    /// Listening port.
    #[serde(default)]
    pub server_port: Option<Value>,
}

impl ServerSummary {
    /// Server id as used in API routes.
    pub fn id(&self) -> String {
        value_text(&self.server_id)
    }
}

impl fmt::Display for ServerSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "id={}, name={:?}, type={:?}",
            self.id(),
            self.server_name,
            self.server_type
        )
    }
}

/// How missing or malformed fields of a stats payload are treated.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum FieldPolicy {
    /// Fall back to a placeholder value.
    #[default]
    Lenient,
    /// Reject the payload.
    Strict,
}

/// A stats field that could not be read under [`FieldPolicy::Strict`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The field is absent or `null`
    Missing(&'static str),
    /// The field has an unexpected JSON type
    Malformed(&'static str),
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldError::Missing(field) => write!(f, "missing field `{}` in server stats", field),
            FieldError::Malformed(field) => {
                write!(f, "malformed field `{}` in server stats", field)
            }
        }
    }
}

impl std::error::Error for FieldError {}

/// Statistics of a server from `/api/v2/servers/{id}/stats`.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerStats {
    /// Display name, taken from the nested `server_id` object.
    pub server_name: String,
    pub running: bool,
    /// CPU usage in percent.
    pub cpu: f64,
    /// Memory usage as formatted by Crafty, e.g. `1.2GB`.
    pub mem: String,
    pub mem_percent: f64,
    /// Number of connected players.
    pub online: u64,
    /// Player slots.
    pub max: u64,
    pub version: String,
    pub port: Option<u64>,
    /// World size as formatted by Crafty, e.g. `45.3MB`.
    pub world_size: String,
    /// Whether Crafty could ping the server.
    pub ping_ok: bool,
    /// Names of the connected players.
    pub players: Vec<String>,
    pub crashed: bool,
    pub updating: bool,
}

impl ServerStats {
    /// Reads the statistics out of a stats payload.
    ///
    /// Under [`FieldPolicy::Lenient`] a missing or malformed field takes a
    /// placeholder value and this never fails. Under [`FieldPolicy::Strict`] the
    /// first such field is reported.
    ///
    /// The `players` field arrives as a JSON encoded string such as
    /// `"[\"Steve\"]"`; it is decoded here.
    pub fn from_value(data: &Value, policy: FieldPolicy) -> Result<Self, FieldError> {
        let reader = FieldReader { data, policy };

        let server_name = data
            .get("server_id")
            .and_then(|server| server.get("server_name"))
            .and_then(Value::as_str)
            .unwrap_or("Server")
            .to_owned();

        Ok(ServerStats {
            server_name,
            running: reader.bool("running")?,
            cpu: reader.f64("cpu")?,
            mem: reader.string("mem", "N/A")?,
            mem_percent: reader.f64("mem_percent")?,
            online: reader.u64("online")?,
            max: reader.u64("max")?,
            version: reader.string("version", "Unknown")?,
            port: reader.optional_u64("server_port")?,
            world_size: reader.string("world_size", "N/A")?,
            ping_ok: reader.string("int_ping_results", "False")? == "True",
            players: reader.players()?,
            crashed: reader.flag("crashed")?,
            updating: reader.flag("updating")?,
        })
    }
}

struct FieldReader<'a> {
    data: &'a Value,
    policy: FieldPolicy,
}

impl FieldReader<'_> {
    fn read<T>(
        &self,
        field: &'static str,
        default: T,
        convert: impl FnOnce(&Value) -> Option<T>,
    ) -> Result<T, FieldError> {
        let error = match self.data.get(field) {
            None | Some(Value::Null) => FieldError::Missing(field),
            Some(value) => match convert(value) {
                Some(converted) => return Ok(converted),
                None => FieldError::Malformed(field),
            },
        };

        match self.policy {
            FieldPolicy::Lenient => Ok(default),
            FieldPolicy::Strict => Err(error),
        }
    }

    fn bool(&self, field: &'static str) -> Result<bool, FieldError> {
        self.read(field, false, Value::as_bool)
    }

    fn f64(&self, field: &'static str) -> Result<f64, FieldError> {
        self.read(field, 0.0, Value::as_f64)
    }

    fn u64(&self, field: &'static str) -> Result<u64, FieldError> {
        self.read(field, 0, Value::as_u64)
    }

    fn optional_u64(&self, field: &'static str) -> Result<Option<u64>, FieldError> {
        self.read(field, None, |value| value.as_u64().map(Some))
    }

    fn string(&self, field: &'static str, default: &str) -> Result<String, FieldError> {
        self.read(field, default.to_owned(), |value| {
            value.as_str().map(str::to_owned)
        })
    }

    /// Warning flags are only present when set, so absence is never an error.
    fn flag(&self, field: &'static str) -> Result<bool, FieldError> {
        match self.data.get(field) {
            None | Some(Value::Null) => Ok(false),
            Some(_) => self.bool(field),
        }
    }

    fn players(&self) -> Result<Vec<String>, FieldError> {
        self.read("players", Vec::new(), |value| match value {
            Value::String(encoded) => serde_json::from_str::<Vec<String>>(encoded).ok(),
            Value::Array(_) => serde_json::from_value::<Vec<String>>(value.clone()).ok(),
            _ => None,
        })
    }
}
