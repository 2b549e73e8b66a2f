use rusqlite::{params, Connection};

use crate::error::TaskboardError;
use crate::models::{Role, User};

pub fn list_users(conn: &Connection) -> Result<Vec<User>, TaskboardError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, email, title, role FROM users ORDER BY position ASC",
    )?;
    let users = stmt
        .query_map([], row_to_user)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(users)
}

/// Replace the stored directory with `users`. Call inside a transaction.
pub fn replace_users(conn: &Connection, users: &[User]) -> Result<(), TaskboardError> {
    conn.execute("DELETE FROM users", [])?;
    let mut stmt = conn.prepare(
        "INSERT INTO users (id, position, name, email, title, role) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for (position, user) in users.iter().enumerate() {
        stmt.execute(params![
            user.id,
            position as i64,
            user.name,
            user.email,
            user.title,
            user.role.as_str(),
        ])?;
    }
    Ok(())
}

fn row_to_user(row: &rusqlite::Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        title: row.get(3)?,
        role: Role::from_str(&row.get::<_, String>(4)?).unwrap_or_default(),
    })
}
