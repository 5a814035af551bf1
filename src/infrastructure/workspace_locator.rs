//! Workspace store discovery.
//!
//! Walks Cursor's `workspaceStorage` directory, where every subdirectory is
//! one workspace that may hold a `state.vscdb`.

use std::fs::ReadDir;
use std::path::{Path, PathBuf};

use crate::domain::{AppError, Result, WorkspaceStore, STATE_DB_NAME};

/// Locates workspace stores under a root directory.
#[derive(Debug, Clone)]
pub struct WorkspaceLocator {
    root: PathBuf,
}

impl WorkspaceLocator {
    /// Creates a locator for `root`.
    ///
    /// # Errors
    /// Returns a configuration error if `root` does not exist or is not a directory.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::config(format!(
                "The workspaceStorage directory does not exist at {}",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Root directory being scanned.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns a fresh, lazy iterator over the workspace directories.
    ///
    /// Each call re-reads the root directory.
    ///
    /// # Errors
    /// Returns error if the root directory cannot be read.
    pub fn workspaces(&self) -> Result<Workspaces> {
        let entries = std::fs::read_dir(&self.root).map_err(|e| {
            AppError::io(
                format!("Failed to read directory {}", self.root.display()),
                e,
            )
        })?;
        Ok(Workspaces { entries })
    }
}

/// Iterator over the workspace subdirectories of a root.
///
/// Order follows the file system and is not sorted.
#[derive(Debug)]
pub struct Workspaces {
    entries: ReadDir,
}

impl Iterator for Workspaces {
    type Item = WorkspaceStore;

    fn next(&mut self) -> Option<Self::Item> {
        for entry in self.entries.by_ref() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Failed to read workspace entry: {}", e);
                    continue;
                }
            };

            let dir = entry.path();
            if !dir.is_dir() {
                continue;
            }

            let db_path = dir.join(STATE_DB_NAME);
            let state_db = if db_path.is_file() {
                tracing::debug!("Found workspace state DB: {}", db_path.display());
                Some(db_path)
            } else {
                None
            };

            return Some(WorkspaceStore { dir, state_db });
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::create_workspace;
    use tempfile::tempdir;

    #[test]
    fn test_missing_root_is_config_error() {
        let dir = tempdir().unwrap();
        let err = WorkspaceLocator::new(dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, AppError::Config { .. }));
    }

    #[test]
    fn test_file_root_is_config_error() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file.txt");
        std::fs::write(&file, "x").unwrap();
        assert!(WorkspaceLocator::new(file).is_err());
    }

    #[test]
    fn test_workspaces_pairs_dirs_with_state_db() {
        let dir = tempdir().unwrap();
        create_workspace(dir.path(), "with-db", Some(&[]));
        create_workspace(dir.path(), "without-db", None);
        std::fs::write(dir.path().join("stray.json"), "{}").unwrap();

        let locator = WorkspaceLocator::new(dir.path()).unwrap();
        let mut stores: Vec<_> = locator.workspaces().unwrap().collect();
        stores.sort_by_key(WorkspaceStore::name);

        assert_eq!(stores.len(), 2);
        assert_eq!(stores[0].name(), "with-db");
        assert_eq!(
            stores[0].state_db.as_deref(),
            Some(dir.path().join("with-db").join("state.vscdb").as_path())
        );
        assert_eq!(stores[1].name(), "without-db");
        assert!(stores[1].state_db.is_none());
    }

    #[test]
    fn test_workspaces_is_restartable() {
        let dir = tempdir().unwrap();
        create_workspace(dir.path(), "a", None);
        create_workspace(dir.path(), "b", None);

        let locator = WorkspaceLocator::new(dir.path()).unwrap();
        assert_eq!(locator.workspaces().unwrap().count(), 2);
        assert_eq!(locator.workspaces().unwrap().count(), 2);
    }
}
