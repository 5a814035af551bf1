//! Domain models for Cursor workspace chat data.
//!
//! These models represent the entities read from a workspace `state.vscdb`
//! and the artifacts written for them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Recognized keys in a workspace's `ItemTable`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKey {
    /// Saved prompts (`aiService.prompts`). Fetched, not expanded.
    Prompts,
    /// Chat panel history (`workbench.panel.aichat.view.aichat.chatdata`).
    ChatData,
}

impl RecordKey {
    /// All recognized keys, in query order.
    pub const ALL: [Self; 2] = [Self::Prompts, Self::ChatData];

    /// The raw key as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Prompts => "aiService.prompts",
            Self::ChatData => "workbench.panel.aichat.view.aichat.chatdata",
        }
    }

    /// Looks up a raw database key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }

    /// Name of the output subdirectory for this key.
    #[must_use]
    pub fn dir_name(self) -> String {
        self.as_str().replace('.', "_")
    }
}

impl std::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row returned by the state store lookup.
#[derive(Debug, Clone)]
pub struct StateRecord {
    pub rowid: i64,
    pub key: RecordKey,
    pub value: String,
}

/// Kind of a chat bubble, decided by its `type` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BubbleKind {
    /// Message typed by the user (trimmed text).
    User(String),
    /// Reply from the assistant (trimmed text).
    Ai(String),
    /// Any other bubble type. Ignored.
    Other,
}

impl BubbleKind {
    /// Builds a bubble kind from its raw tag and text.
    #[must_use]
    pub fn from_parts(tag: Option<&str>, text: Option<&str>) -> Self {
        let body = || text.unwrap_or_default().trim().to_string();
        match tag {
            Some("user") => Self::User(body()),
            Some("ai") => Self::Ai(body()),
            _ => Self::Other,
        }
    }
}

/// A paired user query and AI response kept for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub user_query: String,
    pub ai_response: String,
}

impl ConversationTurn {
    /// Whether the turn carries any text worth exporting.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.user_query.trim().is_empty() || !self.ai_response.trim().is_empty()
    }
}

/// Turns decoded from one chat-data record.
#[derive(Debug, Clone)]
pub struct ExtractedConversation {
    pub key: RecordKey,
    pub rowid: i64,
    pub turns: Vec<ConversationTurn>,
}

/// A workspace directory under `workspaceStorage`.
#[derive(Debug, Clone)]
pub struct WorkspaceStore {
    /// The workspace directory itself.
    pub dir: PathBuf,
    /// Path to `state.vscdb`, if the workspace has one.
    pub state_db: Option<PathBuf>,
}

impl WorkspaceStore {
    /// Directory name of the workspace (usually an MD5 hash).
    #[must_use]
    pub fn name(&self) -> String {
        self.dir
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned())
    }
}

/// A rendered conversation ready to be written.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    pub path: PathBuf,
    pub content: String,
}

impl ExportArtifact {
    /// Destination of an export:
    /// `{output_dir}/{key_dir}/{workspace}_{key}_extracted.{extension}`.
    #[must_use]
    pub fn destination(
        output_dir: &Path,
        workspace: &str,
        key: RecordKey,
        extension: &str,
    ) -> PathBuf {
        output_dir
            .join(key.dir_name())
            .join(format!("{workspace}_{key}_extracted.{extension}"))
    }
}

/// Outcome counters of an export run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExportSummary {
    /// Workspace directories visited.
    pub workspaces_scanned: usize,
    /// Workspaces without a `state.vscdb`.
    pub workspaces_without_store: usize,
    /// Stores that could not be opened, queried or written.
    pub stores_failed: usize,
    /// Rows or records skipped because they could not be decoded.
    pub records_skipped: usize,
    /// Chat-data records that held no exportable turns.
    pub empty_conversations: usize,
    /// Number of turns exported across all files.
    pub turns_exported: usize,
    /// Files written, in write order.
    pub files_written: Vec<PathBuf>,
}
