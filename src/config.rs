//! Configuration structures and loading for the bot.
//!
//! The configuration is split into two sections: Crafty Controller settings and
//! Discord account settings. Values come from an optional YAML file and from
//! environment variables, the latter taking precedence.
//!
//! # Configuration File Format
//!
//! ```yaml
//! crafty:
//!   # Base URL of the Crafty Controller web interface
//!   url: "https://crafty.example.com:8443"
//!   # API token created in the Crafty panel
//!   api_key: "your-api-key"
//!   # How missing or malformed stats fields are handled: lenient or strict
//!   field_policy: lenient
//!
//! discord:
//!   # Bot token from the Discord developer portal
//!   token: "your-bot-token"
//!   # Discord user id of the only user allowed to run commands
//!   owner_id: 123456789012345678
//! ```
//!
//! # Environment Variables
//!
//! Any value can be set with the `CRAFTYBOT_` prefix, sections being separated
//! by a double underscore:
//!
//! ```bash
//! export CRAFTYBOT_CRAFTY__URL="https://crafty.example.com:8443"
//! export CRAFTYBOT_DISCORD__OWNER_ID="123456789012345678"
//! ```
//!
//! The flat variables `CRAFTY_BASE_URL`, `CRAFTY_API_KEY`, `DISCORD_TOKEN` and
//! `BOT_OWNER_ID` are also read, and take precedence over everything else.

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::Deserialize;

use crate::crafty::FieldPolicy;

/// Prefix of the structured environment variables.
const ENV_PREFIX: &str = "CRAFTYBOT_";

/// Flat environment variables and the configuration key each one sets.
const FLAT_ENV_VARS: &[(&str, &str)] = &[
    ("CRAFTY_BASE_URL", "crafty.url"),
    ("CRAFTY_API_KEY", "crafty.api_key"),
    ("DISCORD_TOKEN", "discord.token"),
    ("BOT_OWNER_ID", "discord.owner_id"),
];

/// Root configuration structure.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// Crafty Controller configuration
    pub crafty: Crafty,
    /// Discord account configuration
    pub discord: Discord,
}

/// Crafty Controller configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Crafty {
    /// Base URL of the Crafty Controller, `/api/v2` is appended to it.
    ///
    /// A trailing slash is removed on load.
    pub url: String,

    /// API token sent as a bearer token.
    pub api_key: String,

    /// Treatment of missing or malformed fields in server statistics.
    #[serde(default)]
    pub field_policy: FieldPolicy,
}

/// Discord account configuration.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Discord {
    /// Bot token.
    pub token: String,

    /// Id of the only user allowed to run commands.
    pub owner_id: u64,
}

impl Config {
    /// Loads the configuration from `path`, when given, and the environment.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `path` is given but the file does not exist or is not valid YAML
    /// - A required value is missing from every source
    /// - A value has the wrong type, like a non numeric owner id
    pub fn load(path: Option<&str>) -> Result<Self, figment::Error> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file_exact(path));
        }

        let flat_names: Vec<&str> = FLAT_ENV_VARS.iter().map(|(name, _)| *name).collect();
        let mut config: Config = figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&flat_names).map(|key| {
                let flat = FLAT_ENV_VARS
                    .iter()
                    .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name));
                match flat {
                    Some((_, mapped)) => (*mapped).into(),
                    None => key.as_str().to_owned().into(),
                }
            }))
            .extract()?;

        while config.crafty.url.ends_with('/') {
            config.crafty.url.pop();
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use super::*;

    const FULL_YAML: &str = r#"
crafty:
  url: "https://crafty.local:8443/"
  api_key: "yaml-key"
discord:
  token: "yaml-token"
  owner_id: 42
"#;

    fn clear_env() {
        let structured = [
            "CRAFTYBOT_CRAFTY__URL",
            "CRAFTYBOT_CRAFTY__API_KEY",
            "CRAFTYBOT_CRAFTY__FIELD_POLICY",
            "CRAFTYBOT_DISCORD__TOKEN",
            "CRAFTYBOT_DISCORD__OWNER_ID",
        ];
        for name in structured
            .iter()
            .chain(FLAT_ENV_VARS.iter().map(|(name, _)| name))
        {
            // SAFETY: env tests are serialized
            unsafe { std::env::remove_var(name) };
        }
    }

    fn set_env(name: &str, value: &str) {
        // SAFETY: env tests are serialized
        unsafe { std::env::set_var(name, value) };
    }

    fn yaml_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    #[serial]
    fn test_load_from_yaml() {
        clear_env();
        let file = yaml_file(FULL_YAML);

        let config = Config::load(file.path().to_str()).unwrap();

        assert_eq!(
            config,
            Config {
                crafty: Crafty {
                    url: "https://crafty.local:8443".to_string(),
                    api_key: "yaml-key".to_string(),
                    field_policy: FieldPolicy::Lenient,
                },
                discord: Discord {
                    token: "yaml-token".to_string(),
                    owner_id: 42,
                },
            }
        );
    }

    #[test]
    #[serial]
    fn test_load_strict_field_policy() {
        clear_env();
        let file = yaml_file(&FULL_YAML.replace(
            "  api_key: \"yaml-key\"",
            "  api_key: \"yaml-key\"\n  field_policy: strict",
        ));

        let config = Config::load(file.path().to_str()).unwrap();
        assert_eq!(config.crafty.field_policy, FieldPolicy::Strict);
    }

    #[test]
    #[serial]
    fn test_load_from_flat_env() {
        clear_env();
        set_env("CRAFTY_BASE_URL", "http://localhost:8000/");
        set_env("CRAFTY_API_KEY", "env-key");
        set_env("DISCORD_TOKEN", "env-token");
        set_env("BOT_OWNER_ID", "1234567890");

        let config = Config::load(None).unwrap();
        clear_env();

        assert_eq!(config.crafty.url, "http://localhost:8000");
        assert_eq!(config.crafty.api_key, "env-key");
        assert_eq!(config.discord.token, "env-token");
        assert_eq!(config.discord.owner_id, 1234567890);
    }

    #[test]
    #[serial]
    fn test_prefixed_env_overrides_yaml() {
        clear_env();
        let file = yaml_file(FULL_YAML);
        set_env("CRAFTYBOT_DISCORD__OWNER_ID", "7");
        set_env("CRAFTYBOT_CRAFTY__API_KEY", "override-key");

        let config = Config::load(file.path().to_str()).unwrap();
        clear_env();

        assert_eq!(config.discord.owner_id, 7);
        assert_eq!(config.crafty.api_key, "override-key");
        assert_eq!(config.discord.token, "yaml-token");
    }

    #[test]
    #[serial]
    fn test_flat_env_overrides_prefixed_env() {
        clear_env();
        let file = yaml_file(FULL_YAML);
        set_env("CRAFTYBOT_DISCORD__TOKEN", "prefixed-token");
        set_env("DISCORD_TOKEN", "flat-token");

        let config = Config::load(file.path().to_str()).unwrap();
        clear_env();

        assert_eq!(config.discord.token, "flat-token");
    }

    #[test]
    #[serial]
    fn test_load_missing_value_fails() {
        clear_env();
        let file = yaml_file(
            r#"
crafty:
  url: "https://crafty.local"
discord:
  token: "yaml-token"
  owner_id: 42
"#,
        );

        let error = Config::load(file.path().to_str()).unwrap_err();
        assert!(error.to_string().contains("api_key"));
    }

    #[test]
    #[serial]
    fn test_load_invalid_owner_id_fails() {
        clear_env();
        let file = yaml_file(FULL_YAML);
        set_env("BOT_OWNER_ID", "not-a-number");

        let result = Config::load(file.path().to_str());
        clear_env();

        assert!(result.is_err());
    }

    #[test]
    #[serial]
    fn test_load_missing_file_fails() {
        clear_env();
        assert!(Config::load(Some("/nonexistent/craftybot.yaml")).is_err());
    }
}
