use std::env;
use std::fs;
use std::path::PathBuf;

use rusqlite::Connection;

use crate::error::TaskboardError;

use super::migrations;

pub const WORKSPACE_ENV: &str = "TASKBOARD_DIR";

/// Workspace directory: `$TASKBOARD_DIR`, or `.taskboard` under the current directory.
pub fn workspace_dir() -> Result<PathBuf, TaskboardError> {
    if let Some(dir) = env::var_os(WORKSPACE_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    let cwd = env::current_dir().map_err(|e| TaskboardError::database(e.to_string()))?;
    Ok(cwd.join(".taskboard"))
}

/// Get the path to the taskboard database.
pub fn db_path() -> Result<PathBuf, TaskboardError> {
    Ok(workspace_dir()?.join("taskboard.db"))
}

/// Get the config file path.
pub fn config_path() -> Result<PathBuf, TaskboardError> {
    Ok(workspace_dir()?.join("config.json"))
}

/// Open a connection to the database. Returns error if not initialized.
pub fn open_db() -> Result<Connection, TaskboardError> {
    let path = db_path()?;
    if !path.exists() {
        return Err(TaskboardError::not_initialized());
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    Ok(conn)
}

/// Create the workspace directory and database, then run migrations.
/// Returns the database path and whether it already existed.
pub fn init_db() -> Result<(PathBuf, bool), TaskboardError> {
    let path = db_path()?;
    let existed = path.exists();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| TaskboardError::database(e.to_string()))?;
    }
    let conn = Connection::open(&path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok((path, existed))
}

/// Open an in-memory database with the schema applied.
pub fn open_in_memory() -> Result<Connection, TaskboardError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), TaskboardError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}
