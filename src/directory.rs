//! Team-member directory.
//!
//! The directory is seeded from the data source and from the team copies
//! embedded in tasks, then lives on its own: edits here never reach
//! `Task::team`, and edits to a task's team never reach the directory.

use std::collections::HashSet;

use tracing::debug;

use crate::error::TaskboardError;
use crate::models::{NewUser, Task, User, UserPatch};

/// Distinct team members across `tasks`, in first-seen order. When the same
/// id appears with different fields, the first occurrence wins.
pub fn derive_users(tasks: &[Task]) -> Vec<User> {
    let mut seen = HashSet::new();
    let mut users = Vec::new();
    for member in tasks.iter().flat_map(|t| t.team.iter()) {
        if seen.insert(member.id.as_str()) {
            users.push(member.clone());
        }
    }
    users
}

#[derive(Debug, Clone, Default)]
pub struct UserDirectory {
    users: Vec<User>,
}

impl UserDirectory {
    pub fn new(users: Vec<User>) -> Self {
        Self { users }
    }

    /// Start from `initial`, then append members derived from `tasks` whose
    /// id is not already present.
    pub fn seed(initial: Vec<User>, tasks: &[Task]) -> Self {
        let mut directory = Self::new(Vec::new());
        for user in initial.into_iter().chain(derive_users(tasks)) {
            if directory.get(&user.id).is_none() {
                directory.users.push(user);
            }
        }
        directory
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn add(&mut self, input: NewUser) -> Result<&User, TaskboardError> {
        let (name, email) = require_identity(&input.name, &input.email)?;
        let user = User {
            id: ulid::Ulid::new().to_string(),
            name,
            email,
            title: input.title.trim().to_string(),
            role: input.role.unwrap_or_default(),
        };
        debug!(user_id = %user.id, "user added");
        self.users.push(user);
        Ok(&self.users[self.users.len() - 1])
    }

    pub fn edit(&mut self, id: &str, patch: UserPatch) -> Result<Option<&User>, TaskboardError> {
        let Some(idx) = self.users.iter().position(|u| u.id == id) else {
            return Ok(None);
        };
        let user = &self.users[idx];
        let (name, email) = require_identity(
            patch.name.as_deref().unwrap_or(&user.name),
            patch.email.as_deref().unwrap_or(&user.email),
        )?;

        let user = &mut self.users[idx];
        user.name = name;
        user.email = email;
        if let Some(title) = patch.title {
            user.title = title.trim().to_string();
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        debug!(user_id = %id, "user updated");
        Ok(Some(&*user))
    }

    pub fn remove(&mut self, id: &str) -> Option<User> {
        let idx = self.users.iter().position(|u| u.id == id)?;
        debug!(user_id = %id, "user removed");
        Some(self.users.remove(idx))
    }

    /// Case-insensitive substring match over name, email and role.
    pub fn search(&self, term: &str) -> Vec<&User> {
        let needle = term.to_lowercase();
        self.users
            .iter()
            .filter(|u| {
                needle.is_empty()
                    || u.name.to_lowercase().contains(&needle)
                    || u.email.to_lowercase().contains(&needle)
                    || u.role.as_str().to_lowercase().contains(&needle)
            })
            .collect()
    }
}

fn require_identity(name: &str, email: &str) -> Result<(String, String), TaskboardError> {
    let (name, email) = (name.trim(), email.trim());
    if name.is_empty() || email.is_empty() {
        return Err(TaskboardError::validation("Name and email are required"));
    }
    Ok((name.to_string(), email.to_string()))
}
