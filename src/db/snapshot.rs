use rusqlite::Connection;
use tracing::debug;

use crate::error::TaskboardError;
use crate::models::{Task, User};
use crate::source::DataSource;

use super::{task_repo, user_repo};

/// Reads the persisted collections back as a data source.
pub struct StoreSource<'c> {
    conn: &'c Connection,
}

impl<'c> StoreSource<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }
}

impl DataSource for StoreSource<'_> {
    fn load_initial_tasks(&self) -> Result<Vec<Task>, TaskboardError> {
        task_repo::list_tasks(self.conn)
    }

    fn load_initial_users(&self) -> Result<Vec<User>, TaskboardError> {
        user_repo::list_users(self.conn)
    }
}

/// Atomically overwrite the stored tasks and users.
pub fn save(conn: &Connection, tasks: &[Task], users: &[User]) -> Result<(), TaskboardError> {
    conn.execute_batch("BEGIN IMMEDIATE")?;
    let result = (|| -> Result<(), TaskboardError> {
        task_repo::replace_tasks(conn, tasks)?;
        user_repo::replace_users(conn, users)?;
        Ok(())
    })();

    match result {
        Ok(()) => {
            conn.execute_batch("COMMIT")?;
            debug!(tasks = tasks.len(), users = users.len(), "snapshot saved");
            Ok(())
        }
        Err(e) => {
            let _ = conn.execute_batch("ROLLBACK");
            Err(e)
        }
    }
}
