//! Output formatting for extracted chat data.
//!
//! Supports three output formats: Markdown, raw text and JSON.

use colored::Colorize;
use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::domain::{AppError, ConversationTurn, ExportSummary, OutputFormat, Result};

/// Document heading of Markdown exports.
const MARKDOWN_TITLE: &str = "# Cursor Chat History";

/// Separator line between turns in raw exports.
const RAW_SEPARATOR: &str = "----------------------------------------";

/// Renders turns in the requested format.
///
/// # Errors
/// Returns error if JSON serialization fails.
pub fn format_conversation(turns: &[ConversationTurn], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(format_conversation_markdown(turns)),
        OutputFormat::Raw => Ok(format_conversation_raw(turns)),
        OutputFormat::Json => format_conversation_json(turns),
    }
}

/// Formats turns as Markdown.
pub fn format_conversation_markdown(turns: &[ConversationTurn]) -> String {
    let mut out = format!("{MARKDOWN_TITLE}\n\n");

    for turn in turns {
        out.push_str("## User Query\n\n");
        out.push_str(&turn.user_query);
        out.push_str("\n\n## AI Response\n\n");
        out.push_str(&turn.ai_response);
        out.push_str("\n\n---\n\n");
    }

    out
}

/// Formats turns as plain labeled text.
pub fn format_conversation_raw(turns: &[ConversationTurn]) -> String {
    let mut out = String::new();

    for turn in turns {
        out.push_str("User Query:\n");
        out.push_str(&turn.user_query);
        out.push_str("\n\nAI Response:\n");
        out.push_str(&turn.ai_response);
        out.push_str(&format!("\n\n{RAW_SEPARATOR}\n\n"));
    }

    out
}

/// Formats turns as a JSON array indented with four spaces.
///
/// # Errors
/// Returns error if serialization fails.
pub fn format_conversation_json(turns: &[ConversationTurn]) -> Result<String> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    turns
        .serialize(&mut serializer)
        .map_err(AppError::json_parse)?;

    String::from_utf8(buf).map_err(|e| AppError::InvalidData {
        message: format!("serialized JSON is not UTF-8: {e}"),
    })
}

/// Formats an export summary for display.
pub fn format_summary(summary: &ExportSummary) -> String {
    format!(
        "{}\n  Workspaces scanned: {}\n  Without state DB: {}\n  Failed stores: {}\n  Skipped records: {}\n  Empty conversations: {}\n  Turns exported: {}\n  Files written: {}",
        "📊 Export summary".bold(),
        summary.workspaces_scanned.to_string().cyan(),
        summary.workspaces_without_store.to_string().yellow(),
        summary.stores_failed.to_string().red(),
        summary.records_skipped.to_string().red(),
        summary.empty_conversations.to_string().yellow(),
        summary.turns_exported.to_string().cyan(),
        summary.files_written.len().to_string().green()
    )
}
