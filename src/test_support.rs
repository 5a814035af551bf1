//! Fixture helpers shared by unit tests.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

/// Creates a `state.vscdb` with the same `ItemTable` schema Cursor uses and
/// lets the caller insert rows.
pub fn create_state_db_with<F>(path: &Path, insert: F)
where
    F: FnOnce(&Connection) -> rusqlite::Result<()>,
{
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS ItemTable (key TEXT UNIQUE ON CONFLICT REPLACE, value BLOB);",
    )
    .unwrap();
    insert(&conn).unwrap();
}

/// Creates a `state.vscdb` holding the given text rows.
pub fn create_state_db(path: &Path, rows: &[(&str, &str)]) {
    create_state_db_with(path, |conn| {
        for (key, value) in rows {
            conn.execute(
                "INSERT INTO ItemTable (key, value) VALUES (?1, ?2)",
                rusqlite::params![key, value],
            )?;
        }
        Ok(())
    });
}

/// Creates a workspace directory under `root`, with a state database when
/// `rows` is given.
pub fn create_workspace(root: &Path, name: &str, rows: Option<&[(&str, &str)]>) -> PathBuf {
    let dir = root.join(name);
    std::fs::create_dir_all(&dir).unwrap();
    if let Some(rows) = rows {
        create_state_db(&dir.join("state.vscdb"), rows);
    }
    dir
}

/// Chat-data value with a single user/ai exchange.
pub const HI_HELLO_CHAT: &str =
    r#"{"tabs":[{"bubbles":[{"type":"user","text":"hi"},{"type":"ai","text":"hello"}]}]}"#;

/// Key of the chat panel history.
pub const CHAT_KEY: &str = "workbench.panel.aichat.view.aichat.chatdata";
