//! One-field pop-up forms.
//!
//! `whitelist` and `command` can be invoked without their text argument. The
//! commander then shows a [`Form`] and, once the user submits it, the captured
//! text turns the form back into the [`SlashCommand`] that would have been
//! invoked inline.
//!
//! The target server id travels in the form's custom id (`whitelist:<id>` or
//! `command:<id>`), so nothing has to be kept between showing and submitting.

use std::fmt;

use crate::commands::command::SlashCommand;

/// Custom id of the single text input of every form.
pub const INPUT_ID: &str = "value";

/// The two kinds of forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Collects a Minecraft username to whitelist
    Whitelist,
    /// Collects a raw console command
    Command,
}

impl FormKind {
    fn prefix(&self) -> &'static str {
        match self {
            FormKind::Whitelist => "whitelist",
            FormKind::Command => "command",
        }
    }
}

/// Layout of the text input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub placeholder: &'static str,
    pub max_length: Option<u16>,
}

/// A form awaiting submission, bound to a server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub server_id: String,
}

/// Errors that can occur when reading a submitted form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The custom id does not belong to one of our forms
    UnknownForm(String),
    /// The submitted text is empty
    EmptyValue,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FormError::UnknownForm(custom_id) => write!(f, "unknown form `{}`", custom_id),
            FormError::EmptyValue => write!(f, "the form was submitted empty"),
        }
    }
}

impl std::error::Error for FormError {}

impl Form {
    pub fn new(kind: FormKind, server_id: &str) -> Self {
        Form {
            kind,
            server_id: server_id.to_owned(),
        }
    }

    /// Identifier sent with the form and echoed back on submission.
    pub fn custom_id(&self) -> String {
        format!("{}:{}", self.kind.prefix(), self.server_id)
    }

    pub fn title(&self) -> &'static str {
        match self.kind {
            FormKind::Whitelist => "Whitelist Player",
            FormKind::Command => "Send Server Command",
        }
    }

    pub fn field(&self) -> FormField {
        match self.kind {
            FormKind::Whitelist => FormField {
                label: "Minecraft Username",
                placeholder: "Enter the player's username...",
                max_length: Some(16),
            },
            FormKind::Command => FormField {
                label: "Command",
                placeholder: "Enter command (without /)...",
                max_length: None,
            },
        }
    }

    /// Rebuilds a form from the custom id of a submission.
    pub fn parse(custom_id: &str) -> Result<Self, FormError> {
        let unknown = || FormError::UnknownForm(custom_id.to_owned());

        let (prefix, server_id) = custom_id.split_once(':').ok_or_else(unknown)?;
        if server_id.is_empty() {
            return Err(unknown());
        }

        let kind = match prefix {
            "whitelist" => FormKind::Whitelist,
            "command" => FormKind::Command,
            _ => return Err(unknown()),
        };

        Ok(Form::new(kind, server_id))
    }

    /// Turns the submitted text into the command it stands for.
    pub fn submit(self, value: &str) -> Result<SlashCommand, FormError> {
        if value.is_empty() {
            return Err(FormError::EmptyValue);
        }

        let value = Some(value.to_owned());
        Ok(match self.kind {
            FormKind::Whitelist => SlashCommand::Whitelist(self.server_id, value),
            FormKind::Command => SlashCommand::Command(self.server_id, value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_id_round_trip() {
        let form = Form::new(FormKind::Whitelist, "0c1a6a54-93f9");
        assert_eq!(form.custom_id(), "whitelist:0c1a6a54-93f9");
        assert_eq!(Form::parse(&form.custom_id()), Ok(form));
    }

    #[test]
    fn test_parse_server_id_with_colon() {
        let form = Form::parse("command:a:b").unwrap();
        assert_eq!(form.kind, FormKind::Command);
        assert_eq!(form.server_id, "a:b");
    }

    #[test]
    fn test_parse_unknown_form() {
        assert_eq!(
            Form::parse("register:s1"),
            Err(FormError::UnknownForm("register:s1".to_string()))
        );
        assert_eq!(
            Form::parse("whitelist"),
            Err(FormError::UnknownForm("whitelist".to_string()))
        );
        assert_eq!(
            Form::parse("whitelist:"),
            Err(FormError::UnknownForm("whitelist:".to_string()))
        );
    }

    #[test]
    fn test_submit_whitelist() {
        let form = Form::new(FormKind::Whitelist, "s1");
        assert_eq!(
            form.submit("Steve"),
            Ok(SlashCommand::Whitelist(
                "s1".to_string(),
                Some("Steve".to_string())
            ))
        );
    }

    #[test]
    fn test_submit_command() {
        let form = Form::new(FormKind::Command, "s1");
        assert_eq!(
            form.submit("time set day"),
            Ok(SlashCommand::Command(
                "s1".to_string(),
                Some("time set day".to_string())
            ))
        );
    }

    #[test]
    fn test_submit_empty_value() {
        let form = Form::new(FormKind::Command, "s1");
        assert_eq!(form.submit(""), Err(FormError::EmptyValue));
    }

    #[test]
    fn test_whitelist_field_length() {
        let form = Form::new(FormKind::Whitelist, "s1");
        assert_eq!(form.title(), "Whitelist Player");
        assert_eq!(form.field().max_length, Some(16));
    }
}
