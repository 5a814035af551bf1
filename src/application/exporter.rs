//! Export pipeline.
//!
//! Drives workspace discovery, extraction, formatting and writing. Every
//! workspace is handled on its own: a failing store is logged and counted,
//! and the run moves on to the next one.

use crate::domain::{
    ExportArtifact, ExportConfig, ExportSummary, ExtractedConversation, Result, WorkspaceStore,
};
use crate::infrastructure::{write_artifact, WorkspaceLocator};

use super::extractor::extract_store;
use super::formatter::format_conversation;

/// Exports every chat conversation found under `config.root_dir`.
///
/// # Errors
/// Returns a configuration error if the root directory is missing or not a
/// directory, or if it cannot be listed. Per-store and per-record failures
/// are only reflected in the returned summary.
pub fn run_export(config: &ExportConfig) -> Result<ExportSummary> {
    let locator = WorkspaceLocator::new(&config.root_dir)?;
    let mut summary = ExportSummary::default();

    for workspace in locator.workspaces()? {
        summary.workspaces_scanned += 1;
        export_workspace(&workspace, config, &mut summary);
    }

    tracing::info!(
        "Export completed: {} file(s) from {} workspace(s)",
        summary.files_written.len(),
        summary.workspaces_scanned
    );

    Ok(summary)
}

/// Processes a single workspace, recording the outcome in `summary`.
fn export_workspace(workspace: &WorkspaceStore, config: &ExportConfig, summary: &mut ExportSummary) {
    let Some(db_path) = workspace.state_db.as_deref() else {
        tracing::info!(
            "state.vscdb not found in {}. Skipping.",
            workspace.dir.display()
        );
        summary.workspaces_without_store += 1;
        return;
    };

    tracing::info!("Processing {}", db_path.display());

    let extraction = match extract_store(db_path) {
        Ok(extraction) => extraction,
        Err(e) => {
            tracing::warn!("Failed to process {}: {}", db_path.display(), e);
            summary.stores_failed += 1;
            return;
        }
    };
    summary.records_skipped += extraction.records_skipped;

    let workspace_name = workspace.name();
    for conversation in &extraction.conversations {
        if conversation.turns.is_empty() {
            tracing::info!(
                "No non-empty conversations found in {}. Skipping file creation.",
                db_path.display()
            );
            summary.empty_conversations += 1;
            continue;
        }

        match export_conversation(conversation, &workspace_name, config) {
            Ok(artifact) => {
                tracing::info!(
                    "Exported {} turn(s) from {} (row {}) to {}",
                    conversation.turns.len(),
                    db_path.display(),
                    conversation.rowid,
                    artifact.path.display()
                );
                summary.turns_exported += conversation.turns.len();
                summary.files_written.push(artifact.path);
            }
            Err(e) => {
                tracing::warn!("Failed to export {}: {}", db_path.display(), e);
                summary.stores_failed += 1;
            }
        }
    }
}

/// Renders and writes one non-empty conversation.
fn export_conversation(
    conversation: &ExtractedConversation,
    workspace_name: &str,
    config: &ExportConfig,
) -> Result<ExportArtifact> {
    let artifact = ExportArtifact {
        path: ExportArtifact::destination(
            &config.output_dir,
            workspace_name,
            conversation.key,
            config.format.extension(),
        ),
        content: format_conversation(&conversation.turns, config.format)?,
    };

    write_artifact(&artifact)?;
    Ok(artifact)
}
