use rusqlite::Connection;

use crate::error::TaskboardError;

pub fn run_migrations(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS tasks (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            title TEXT NOT NULL CHECK (length(trim(title)) > 0),
            priority TEXT NOT NULL
                CHECK (priority IN ('low', 'normal', 'medium', 'high')),
            stage TEXT NOT NULL
                CHECK (stage IN ('todo', 'in-progress', 'completed')),
            is_trashed INTEGER NOT NULL DEFAULT 0,
            trashed_at TEXT,
            body TEXT NOT NULL,
            CHECK (is_trashed = 1 OR trashed_at IS NULL)
        );

        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            position INTEGER NOT NULL,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            title TEXT NOT NULL DEFAULT '',
            role TEXT NOT NULL
                CHECK (role IN ('Admin', 'Manager', 'Developer', 'Designer', 'Tester'))
        );

        CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_tasks_position ON tasks(position);
        CREATE INDEX IF NOT EXISTS idx_tasks_trashed ON tasks(is_trashed, trashed_at);
        CREATE INDEX IF NOT EXISTS idx_users_position ON users(position);
        ",
    )?;
    Ok(())
}
