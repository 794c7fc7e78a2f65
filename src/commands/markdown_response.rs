//! Markdown response formatters for bot commands.
//!
//! This module provides functions to format bot replies for display in
//! Discord. Plain replies are Markdown text, server listings and statistics are
//! embeds.

use crate::{
    commands::{EmbedColour, EmbedField, EmbedReply, Reply},
    crafty::{ServerAction, ServerStats, ServerSummary},
    utils::{head_chars, shorten_middle, tail_chars, value_text},
};

/// Size budget, in characters, of the log text shown by `logs`.
pub const LOG_TEXT_BUDGET: usize = 1900;
/// Characters kept from the end of the log text once it exceeds the budget.
pub const LOG_TEXT_TAIL: usize = 1850;
/// Marker prepended to truncated log text.
pub const TRUNCATION_MARKER: &str = "... (truncated)\n";
/// Discord rejects embed field values longer than this.
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;

/// A listed server together with its statistics, if they could be fetched.
#[derive(Debug)]
pub struct ServerLine<'a> {
    pub summary: &'a ServerSummary,
    pub stats: Option<ServerStats>,
}

fn status_text(running: bool) -> &'static str {
    match running {
        true => "🟢 Running",
        false => "🔴 Offline",
    }
}

/// Formats the fixed rejection sent to anyone but the owner.
///
/// # Examples
///
/// ```
/// # use craftybot::commands::markdown_response::format_access_denied;
/// let reply = format_access_denied();
/// ```
pub fn format_access_denied() -> Reply {
    Reply::Text("❌ Only the bot owner can use this command!".to_owned())
}

/// Formats a failed API call of a read command.
pub fn format_error(message: &str) -> Reply {
    Reply::Text(format!("❌ Error: {}", message))
}

/// Formats an unexpected failure caught by the error hook.
pub fn format_unexpected_error(error: &str) -> Reply {
    Reply::Text(format!("❌ An error occurred: {}", error))
}

/// Formats the acknowledgment of a power or backup action.
pub fn format_action_started(action: ServerAction) -> Reply {
    let progress = match action {
        ServerAction::Start => "Starting server...",
        ServerAction::Stop => "Stopping server...",
        ServerAction::Restart => "Restarting server...",
        ServerAction::Kill => "Force killing server...",
        ServerAction::Backup => "Backing up server...",
    };
    Reply::Text(format!("✅ {}", progress))
}

/// Formats a failed power or backup action.
pub fn format_action_failed(action: ServerAction, message: &str) -> Reply {
    Reply::Text(format!("❌ Failed to {}: {}", action.verb(), message))
}

pub fn format_whitelisted(username: &str) -> Reply {
    Reply::Text(format!("✅ Whitelisted **{}**!", username))
}

pub fn format_command_sent(command: &str) -> Reply {
    Reply::Text(format!("✅ Sent: `{}`", command))
}

/// Formats a failed console write, shared by `whitelist` and `command`.
pub fn format_stdin_failed(message: &str) -> Reply {
    Reply::Text(format!("❌ Failed: {}", message))
}

pub fn format_no_servers() -> Reply {
    Reply::Text("❌ No servers found!".to_owned())
}

/// Formats the server list, one embed field per server.
///
/// Servers whose statistics could not be fetched are shown offline with
/// `N/A` players.
pub fn format_servers(servers: &[ServerLine]) -> Reply {
    let fields = servers
        .iter()
        .map(|line| {
            let (running, players) = match &line.stats {
                Some(stats) => (stats.running, format!("{}/{}", stats.online, stats.max)),
                None => (false, "N/A".to_owned()),
            };
            let port = match &line.summary.server_port {
                Some(port) => value_text(port),
                None => "N/A".to_owned(),
            };

            EmbedField {
                name: line
                    .summary
                    .server_name
                    .clone()
                    .unwrap_or_else(|| "Unknown".to_owned()),
                value: format!(
                    "**ID:** `{}`\n**Status:** {}\n**Type:** {}\n**Port:** {}\n**Players:** {}",
                    line.summary.id(),
                    status_text(running),
                    line.summary.server_type.as_deref().unwrap_or("Unknown"),
                    port,
                    players
                ),
                inline: false,
            }
        })
        .collect();

    Reply::Embed(EmbedReply {
        title: "🖥️ Your Minecraft Servers".to_owned(),
        colour: EmbedColour::Blue,
        fields,
    })
}

/// Formats the statistics of a server.
///
/// Server ids longer than 20 characters are shortened to their first and last
/// 8 characters. Warning fields are appended when the server has crashed or is
/// updating.
pub fn format_stats(server_id: &str, stats: &ServerStats) -> Reply {
    let field = |name: &str, value: String, inline: bool| EmbedField {
        name: name.to_owned(),
        value,
        inline,
    };

    let players = match stats.players.is_empty() {
        true => "None".to_owned(),
        false => stats.players.join(", "),
    };
    let port = match stats.port {
        Some(port) => port.to_string(),
        None => "N/A".to_owned(),
    };

    let mut fields = vec![
        field(
            "Server ID",
            format!("`{}`", shorten_middle(server_id, 20, 8)),
            false,
        ),
        field("Status", status_text(stats.running).to_owned(), true),
        field("CPU Usage", format!("{}%", stats.cpu), true),
        field(
            "RAM Usage",
            format!("{} ({}%)", stats.mem, stats.mem_percent),
            true,
        ),
        field("Players", format!("{}/{}", stats.online, stats.max), true),
        field("Version", stats.version.clone(), true),
        field("Port", port, true),
        field("World Size", stats.world_size.clone(), true),
        field(
            "Ping",
            if stats.ping_ok { "✅" } else { "❌" }.to_owned(),
            true,
        ),
        field(
            "Online Players",
            head_chars(&players, EMBED_FIELD_VALUE_LIMIT).to_owned(),
            false,
        ),
    ];

    if stats.crashed {
        fields.push(field("⚠️ Warning", "Server has crashed!".to_owned(), false));
    }
    if stats.updating {
        fields.push(field("🔄 Status", "Server is updating...".to_owned(), false));
    }

    Reply::Embed(EmbedReply {
        title: format!("📊 {} Statistics", stats.server_name),
        colour: match stats.running {
            true => EmbedColour::Green,
            false => EmbedColour::Red,
        },
        fields,
    })
}

/// Formats the last `count` console lines as a code block.
///
/// When the joined text exceeds [`LOG_TEXT_BUDGET`] characters only the last
/// [`LOG_TEXT_TAIL`] are kept, behind [`TRUNCATION_MARKER`].
pub fn format_logs(lines: &[String], count: usize) -> Reply {
    let recent = &lines[lines.len().saturating_sub(count)..];
    let text = recent.join("\n");

    if text.is_empty() {
        return Reply::Text("❌ No logs available".to_owned());
    }

    let text = match text.chars().count() > LOG_TEXT_BUDGET {
        true => format!("{}{}", TRUNCATION_MARKER, tail_chars(&text, LOG_TEXT_TAIL)),
        false => text,
    };

    Reply::Text(format!(
        "📄 **Last {} lines:**\n```\n{}\n```",
        recent.len(),
        text
    ))
}
