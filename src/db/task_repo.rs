use rusqlite::{params, Connection};

use crate::error::TaskboardError;
use crate::models::Task;

/// All tasks in insertion order.
pub fn list_tasks(conn: &Connection) -> Result<Vec<Task>, TaskboardError> {
    let mut stmt = conn.prepare("SELECT body FROM tasks ORDER BY position ASC")?;
    let bodies = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;
    bodies
        .iter()
        .map(|body| serde_json::from_str(body).map_err(|e| TaskboardError::database(e.to_string())))
        .collect()
}

pub fn count_tasks(conn: &Connection) -> Result<i64, TaskboardError> {
    let count = conn.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get(0))?;
    Ok(count)
}

/// Replace the stored snapshot with `tasks`. Call inside a transaction.
pub fn replace_tasks(conn: &Connection, tasks: &[Task]) -> Result<(), TaskboardError> {
    conn.execute("DELETE FROM tasks", [])?;
    let mut stmt = conn.prepare(
        "INSERT INTO tasks (id, position, title, priority, stage, is_trashed, trashed_at, body)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )?;
    for (position, task) in tasks.iter().enumerate() {
        let body = serde_json::to_string(task).map_err(|e| TaskboardError::database(e.to_string()))?;
        stmt.execute(params![
            task.id,
            position as i64,
            task.title,
            task.priority.as_str(),
            task.stage.as_str(),
            task.is_trashed,
            task.trashed_at.map(|at| at.to_rfc3339()),
            body,
        ])?;
    }
    Ok(())
}
