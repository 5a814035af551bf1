//! Writes rendered exports to disk.

use std::fs::{self, File};
use std::io::Write;

use crate::domain::{AppError, ExportArtifact, Result};

/// Writes an artifact, creating its parent directories as needed.
///
/// An existing file at the same path is overwritten.
///
/// # Errors
/// Returns error if the directory or file cannot be written.
pub fn write_artifact(artifact: &ExportArtifact) -> Result<()> {
    if let Some(parent) = artifact.path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            AppError::io(
                format!("Failed to create directory {}", parent.display()),
                e,
            )
        })?;
    }

    let mut file = File::create(&artifact.path).map_err(|e| {
        AppError::io(
            format!("Failed to create {}", artifact.path.display()),
            e,
        )
    })?;
    file.write_all(artifact.content.as_bytes())
        .map_err(|e| AppError::io("Failed to write file", e))?;

    Ok(())
}
