//! Domain layer - core types and configuration.
//!
//! This layer contains pure domain models and error types
//! without any external dependencies (DB, IO, etc.).

pub mod config;
pub mod error;
pub mod models;

pub use config::{
    ConfigOverrides, DefaultPaths, ExportConfig, FileConfig, OutputFormat, Platform,
    STATE_DB_NAME,
};
pub use error::{AppError, Result};
pub use models::{
    BubbleKind, ConversationTurn, ExportArtifact, ExportSummary, ExtractedConversation,
    RecordKey, StateRecord, WorkspaceStore,
};
