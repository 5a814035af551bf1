//! `SQLite` reader for workspace `state.vscdb` files.
//!
//! Reads the recognized chat keys from the `ItemTable` key-value table.

use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use crate::domain::{AppError, RecordKey, Result, StateRecord};

/// Fixed lookup for the recognized keys.
const STATE_RECORDS_QUERY: &str = "SELECT rowid, key, value FROM ItemTable \
     WHERE key IN ('aiService.prompts', 'workbench.panel.aichat.view.aichat.chatdata')";

/// Rows fetched from one store.
#[derive(Debug, Default)]
pub struct FetchedRecords {
    pub records: Vec<StateRecord>,
    /// Rows that matched the query but could not be read.
    pub skipped_rows: usize,
}

/// Read-only reader for a workspace state database.
///
/// The connection is closed when the reader is dropped.
pub struct StateDbReader {
    conn: Connection,
}

impl StateDbReader {
    /// Opens a state database in read-only mode.
    ///
    /// # Errors
    /// Returns error if database cannot be opened.
    pub fn open(path: &Path) -> Result<Self> {
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(path, flags).map_err(AppError::database)?;

        conn.execute_batch(
            "PRAGMA query_only = ON;
             PRAGMA temp_store = MEMORY;",
        )
        .map_err(AppError::database)?;

        Ok(Self { conn })
    }

    /// Fetches every row whose key is one of the recognized keys.
    ///
    /// Rows that cannot be read are skipped with a warning.
    ///
    /// # Errors
    /// Returns error if the query cannot be prepared or executed.
    pub fn fetch_state_records(&self) -> Result<FetchedRecords> {
        let mut stmt = self
            .conn
            .prepare(STATE_RECORDS_QUERY)
            .map_err(AppError::database)?;

        let rows = stmt
            .query_map([], read_row)
            .map_err(AppError::database)?;

        let mut fetched = FetchedRecords::default();
        for row in rows {
            match row {
                Ok(Some(record)) => fetched.records.push(record),
                Ok(None) => fetched.skipped_rows += 1,
                Err(e) => {
                    tracing::warn!("Failed to read row: {}", e);
                    fetched.skipped_rows += 1;
                }
            }
        }

        tracing::debug!(
            "Fetched {} state records ({} skipped)",
            fetched.records.len(),
            fetched.skipped_rows
        );

        Ok(fetched)
    }
}

/// Maps one result row, returning `None` for rows that are not usable.
fn read_row(row: &Row<'_>) -> rusqlite::Result<Option<StateRecord>> {
    let rowid: i64 = row.get(0)?;
    let key: String = row.get(1)?;

    let Some(key) = RecordKey::from_key(&key) else {
        tracing::warn!("Row {}: unexpected key '{}'", rowid, key);
        return Ok(None);
    };

    // Values may be stored as TEXT or BLOB
    let bytes = match row.get_ref(2)? {
        ValueRef::Text(t) | ValueRef::Blob(t) => t,
        ValueRef::Null => {
            tracing::warn!("Row {} ({}): value is NULL", rowid, key);
            return Ok(None);
        }
        other => {
            tracing::warn!(
                "Row {} ({}): unsupported value type {:?}",
                rowid,
                key,
                other.data_type()
            );
            return Ok(None);
        }
    };

    match std::str::from_utf8(bytes) {
        Ok(value) => Ok(Some(StateRecord {
            rowid,
            key,
            value: value.to_string(),
        })),
        Err(e) => {
            tracing::warn!("Row {} ({}): value is not UTF-8: {}", rowid, key, e);
            Ok(None)
        }
    }
}
