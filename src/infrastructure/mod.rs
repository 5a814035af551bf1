//! Infrastructure layer - external adapters (database, filesystem).
//!
//! This layer handles all I/O operations and external dependencies.

pub mod artifact_writer;
pub mod config;
pub mod sqlite_reader;
pub mod workspace_locator;

pub use artifact_writer::write_artifact;
pub use config::{default_config_path, ensure_config_exists, resolve_export_config};
pub use sqlite_reader::StateDbReader;
pub use workspace_locator::WorkspaceLocator;
