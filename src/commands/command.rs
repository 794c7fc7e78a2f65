//! Slash command definitions and parsing.
//!
//! This module declares the slash commands advertised to Discord and converts
//! an invoked command name and its options into a structured [`SlashCommand`].
//! A [`SlashCommand`] is then planned into either a form to show or an
//! [`Operation`] to run against the Crafty API.

use std::fmt;

use log::debug;

use crate::{
    commands::form::{Form, FormKind},
    crafty::ServerAction,
};

/// Number of log lines returned when the caller does not ask for a count.
pub const DEFAULT_LOG_LINES: usize = 20;

/// Represents an invoked slash command.
///
/// Optional arguments stay optional here; [`SlashCommand::plan`] decides
/// whether a form must collect them first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    /// List every server with its live status
    Servers,
    /// Start, stop, restart, kill or backup a server
    ///
    /// # Fields
    ///
    /// * `String` - Server ID
    /// * `ServerAction` - Action to trigger
    Power(String, ServerAction),
    /// Show the statistics of a server
    Stats(String),
    /// Add a player to the whitelist
    ///
    /// # Fields
    ///
    /// * `String` - Server ID
    /// * `Option<String>` - Username, collected with a form when absent
    Whitelist(String, Option<String>),
    /// Send a raw console command
    ///
    /// # Fields
    ///
    /// * `String` - Server ID
    /// * `Option<String>` - Command, collected with a form when absent
    Command(String, Option<String>),
    /// Show the last console lines
    ///
    /// # Fields
    ///
    /// * `String` - Server ID
    /// * `Option<i64>` - Number of lines
    Logs(String, Option<i64>),
}

/// Fully specified work to run against the Crafty API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Servers,
    Power(String, ServerAction),
    Stats(String),
    /// Server ID and username
    Whitelist(String, String),
    /// Server ID and raw console command
    Console(String, String),
    /// Server ID and number of lines, at least 1
    Logs(String, usize),
}

/// What the commander does with a [`SlashCommand`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Plan {
    /// Ask for the missing argument with a pop-up form
    ShowForm(Form),
    /// Defer the response and run the operation
    Run(Operation),
}

/// Value of a slash command option, as delivered by the chat platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionValue {
    String(String),
    Integer(i64),
}

/// A named option of an invoked slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOption {
    pub name: String,
    pub value: OptionValue,
}

impl CommandOption {
    pub fn new(name: &str, value: OptionValue) -> Self {
        CommandOption {
            name: name.to_owned(),
            value,
        }
    }
}

/// Errors that can occur while parsing an invoked slash command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    /// The command name is not one of the registered commands
    Unknown(String),
    /// A required option was not supplied
    MissingOption(&'static str),
    /// An option was supplied with the wrong type
    InvalidOption(&'static str),
}

impl fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CommandParseError::Unknown(name) => write!(f, "unknown command `{}`", name),
            CommandParseError::MissingOption(option) => {
                write!(f, "missing required option `{}`", option)
            }
            CommandParseError::InvalidOption(option) => write!(f, "invalid option `{}`", option),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Type of a declared slash command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
}

/// Declaration of a slash command option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: OptionKind,
    pub required: bool,
}

/// Declaration of a slash command, used to register it with the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub options: &'static [OptionDefinition],
}

const SERVER_ID: OptionDefinition = OptionDefinition {
    name: "server_id",
    description: "The server ID (copy from /servers)",
    kind: OptionKind::String,
    required: true,
};

const SERVER_ONLY: &[OptionDefinition] = &[SERVER_ID];

/// Every slash command advertised by the bot.
pub const COMMAND_DEFINITIONS: &[CommandDefinition] = &[
    CommandDefinition {
        name: "servers",
        description: "List all Minecraft servers",
        options: &[],
    },
    CommandDefinition {
        name: "start",
        description: "Start a Minecraft server",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "stop",
        description: "Stop a Minecraft server",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "restart",
        description: "Restart a Minecraft server",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "kill",
        description: "Force kill a Minecraft server",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "backup",
        description: "Backup a Minecraft server",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "stats",
        description: "Get server statistics",
        options: SERVER_ONLY,
    },
    CommandDefinition {
        name: "whitelist",
        description: "Whitelist a player",
        options: &[
            SERVER_ID,
            OptionDefinition {
                name: "username",
                description: "Optional: username (or leave empty for modal)",
                kind: OptionKind::String,
                required: false,
            },
        ],
    },
    CommandDefinition {
        name: "command",
        description: "Send a custom command to the server",
        options: &[
            SERVER_ID,
            OptionDefinition {
                name: "command",
                description: "Optional: command (or leave empty for modal)",
                kind: OptionKind::String,
                required: false,
            },
        ],
    },
    CommandDefinition {
        name: "logs",
        description: "Get recent server logs",
        options: &[
            SERVER_ID,
            OptionDefinition {
                name: "lines",
                description: "Number of lines (default: 20)",
                kind: OptionKind::Integer,
                required: false,
            },
        ],
    },
];

impl SlashCommand {
    /// Parses an invoked command name and its options into a [`SlashCommand`].
    ///
    /// Empty string options are treated as absent, so an empty username opens
    /// the whitelist form just like an omitted one.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The command name is unknown - [`CommandParseError::Unknown`]
    /// - `server_id` is absent - [`CommandParseError::MissingOption`]
    /// - An option has the wrong type - [`CommandParseError::InvalidOption`]
    ///
    /// # Examples
    ///
    /// ```
    /// # use craftybot::commands::{SlashCommand, CommandOption, OptionValue};
    /// let options = vec![CommandOption::new("server_id", OptionValue::String("s1".to_string()))];
    /// let command = SlashCommand::parse("stats", &options).unwrap();
    /// assert_eq!(command, SlashCommand::Stats("s1".to_string()));
    /// ```
    pub fn parse(name: &str, options: &[CommandOption]) -> Result<Self, CommandParseError> {
        debug!("parsing command {} with options {:?}", name, options);

        let power = |action: ServerAction| -> Result<Self, CommandParseError> {
            Ok(SlashCommand::Power(server_id(options)?, action))
        };

        match name {
            "servers" => Ok(SlashCommand::Servers),
            "start" => power(ServerAction::Start),
            "stop" => power(ServerAction::Stop),
            "restart" => power(ServerAction::Restart),
            "kill" => power(ServerAction::Kill),
            "backup" => power(ServerAction::Backup),
            "stats" => Ok(SlashCommand::Stats(server_id(options)?)),
            "whitelist" => Ok(SlashCommand::Whitelist(
                server_id(options)?,
                string_option(options, "username")?,
            )),
            "command" => Ok(SlashCommand::Command(
                server_id(options)?,
                string_option(options, "command")?,
            )),
            "logs" => Ok(SlashCommand::Logs(
                server_id(options)?,
                integer_option(options, "lines")?,
            )),
            _ => Err(CommandParseError::Unknown(name.to_owned())),
        }
    }

    /// Name of the slash command, as registered.
    pub fn name(&self) -> &'static str {
        match self {
            SlashCommand::Servers => "servers",
            SlashCommand::Power(_, action) => action.verb(),
            SlashCommand::Stats(_) => "stats",
            SlashCommand::Whitelist(_, _) => "whitelist",
            SlashCommand::Command(_, _) => "command",
            SlashCommand::Logs(_, _) => "logs",
        }
    }

    /// Decides whether the command needs a form or can run right away.
    ///
    /// Only `whitelist` and `command` have a form, shown when their optional
    /// argument is absent. The line count of `logs` defaults to
    /// [`DEFAULT_LOG_LINES`] and is raised to 1 when lower.
    pub fn plan(self) -> Plan {
        match self {
            SlashCommand::Servers => Plan::Run(Operation::Servers),
            SlashCommand::Power(server_id, action) => Plan::Run(Operation::Power(server_id, action)),
            SlashCommand::Stats(server_id) => Plan::Run(Operation::Stats(server_id)),
            SlashCommand::Whitelist(server_id, Some(username)) => {
                Plan::Run(Operation::Whitelist(server_id, username))
            }
            SlashCommand::Whitelist(server_id, None) => {
                Plan::ShowForm(Form::new(FormKind::Whitelist, &server_id))
            }
            SlashCommand::Command(server_id, Some(command)) => {
                Plan::Run(Operation::Console(server_id, command))
            }
            SlashCommand::Command(server_id, None) => {
                Plan::ShowForm(Form::new(FormKind::Command, &server_id))
            }
            SlashCommand::Logs(server_id, lines) => {
                let lines = match lines {
                    Some(lines) => usize::try_from(lines.max(1)).unwrap_or(usize::MAX),
                    None => DEFAULT_LOG_LINES,
                };
                Plan::Run(Operation::Logs(server_id, lines))
            }
        }
    }
}

fn find<'a>(options: &'a [CommandOption], name: &str) -> Option<&'a OptionValue> {
    options
        .iter()
        .find(|option| option.name == name)
        .map(|option| &option.value)
}

fn string_option(
    options: &[CommandOption],
    name: &'static str,
) -> Result<Option<String>, CommandParseError> {
    match find(options, name) {
        None => Ok(None),
        Some(OptionValue::String(value)) if value.is_empty() => Ok(None),
        Some(OptionValue::String(value)) => Ok(Some(value.clone())),
        Some(OptionValue::Integer(_)) => Err(CommandParseError::InvalidOption(name)),
    }
}

fn integer_option(
    options: &[CommandOption],
    name: &'static str,
) -> Result<Option<i64>, CommandParseError> {
    match find(options, name) {
        None => Ok(None),
        Some(OptionValue::Integer(value)) => Ok(Some(*value)),
        Some(OptionValue::String(_)) => Err(CommandParseError::InvalidOption(name)),
    }
}

fn server_id(options: &[CommandOption]) -> Result<String, CommandParseError> {
    string_option(options, SERVER_ID.name)?.ok_or(CommandParseError::MissingOption(SERVER_ID.name))
}
