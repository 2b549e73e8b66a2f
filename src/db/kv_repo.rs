use rusqlite::{params, Connection, OptionalExtension};

use crate::error::TaskboardError;
use crate::session::CredentialStore;

pub fn get(conn: &Connection, key: &str) -> Result<Option<String>, TaskboardError> {
    let value = conn
        .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| row.get(0))
        .optional()?;
    Ok(value)
}

pub fn put(conn: &Connection, key: &str, value: &str) -> Result<(), TaskboardError> {
    conn.execute(
        "INSERT INTO kv (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete(conn: &Connection, key: &str) -> Result<(), TaskboardError> {
    conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
    Ok(())
}

/// Session credentials backed by the `kv` table.
pub struct SqliteKv<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteKv<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl CredentialStore for SqliteKv<'_> {
    fn read(&self, key: &str) -> Result<Option<String>, TaskboardError> {
        get(self.conn, key)
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), TaskboardError> {
        put(self.conn, key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), TaskboardError> {
        delete(self.conn, key)
    }
}
