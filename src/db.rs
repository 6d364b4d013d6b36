use anyhow::{Context, Result};
use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::Duration;

use crate::navigation::UserType;
use crate::phrasebook::Language;

pub const KEY_LANGUAGE: &str = "language";
pub const KEY_USER_TYPE: &str = "user_type";

pub fn open_rw(path: &Path) -> Result<Connection> {
    let mut conn = Connection::open(path)
        .with_context(|| format!("Failed to open preferences DB at {}", path.display()))?;
    conn.busy_timeout(Duration::from_millis(5000))?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA synchronous=NORMAL;")?;
    create_tables(&mut conn)?;
    Ok(conn)
}

pub fn create_tables(conn: &mut Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS preferences (
          key   TEXT PRIMARY KEY,
          value TEXT NOT NULL
        );
    "#,
    )?;
    Ok(())
}

pub fn get_pref(conn: &Connection, key: &str) -> Result<Option<String>> {
    let v = conn
        .query_row("SELECT value FROM preferences WHERE key=?1", params![key], |r| r.get(0))
        .optional()?;
    Ok(v)
}

pub fn set_pref(conn: &Connection, key: &str, value: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO preferences(key, value) VALUES(?1, ?2) ON CONFLICT(key) DO UPDATE SET value=excluded.value",
        params![key, value],
    )?;
    debug!("pref {} = {}", key, value);
    Ok(())
}

/// Removes every stored preference. Returns the number of rows deleted.
pub fn clear_prefs(conn: &Connection) -> Result<usize> {
    Ok(conn.execute("DELETE FROM preferences", [])?)
}

/// Stored language, or the default when absent or unrecognised.
pub fn language(conn: &Connection) -> Result<Language> {
    Ok(get_pref(conn, KEY_LANGUAGE)?.and_then(|s| s.parse().ok()).unwrap_or_default())
}

pub fn user_type(conn: &Connection) -> Result<UserType> {
    Ok(get_pref(conn, KEY_USER_TYPE)?.and_then(|s| s.parse().ok()).unwrap_or_default())
}
