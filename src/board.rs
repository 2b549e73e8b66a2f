//! Application context: the task collection and user directory behind one
//! notifier. Every mutation reports its outcome as exactly one notice.

use chrono::{DateTime, Duration, Utc};
use tracing::info;

use crate::collection::TaskCollection;
use crate::directory::UserDirectory;
use crate::error::TaskboardError;
use crate::filter::{filter_tasks, TaskFilter};
use crate::models::{NewTask, NewUser, Subtask, Task, TaskPatch, User, UserPatch};
use crate::notify::{Notifier, Route};
use crate::source::DataSource;
use crate::summary::{recent_tasks, summarize, TaskSummary};
use crate::trash::Selection;

/// A task that was moved to the trash, and where the caller should go next.
#[derive(Debug, Clone)]
pub struct Trashed {
    pub task: Task,
    pub navigate: Route,
}

pub struct Board<N: Notifier> {
    tasks: TaskCollection,
    users: UserDirectory,
    notifier: N,
}

impl<N: Notifier> Board<N> {
    pub fn new(tasks: TaskCollection, users: UserDirectory, notifier: N) -> Self {
        Self {
            tasks,
            users,
            notifier,
        }
    }

    /// Build a board from a data source. The directory is seeded from the
    /// source's users plus the team members embedded in its tasks.
    pub fn load(source: &dyn DataSource, notifier: N) -> Result<Self, TaskboardError> {
        let tasks = source.load_initial_tasks()?;
        let users = UserDirectory::seed(source.load_initial_users()?, &tasks);
        info!(tasks = tasks.len(), users = users.users().len(), "board loaded");
        Ok(Self::new(TaskCollection::new(tasks), users, notifier))
    }

    /// Rebuild a board from a source that already holds a curated directory,
    /// such as a saved snapshot. No users are derived from tasks.
    pub fn resume(source: &dyn DataSource, notifier: N) -> Result<Self, TaskboardError> {
        let tasks = TaskCollection::new(source.load_initial_tasks()?);
        let users = UserDirectory::new(source.load_initial_users()?);
        Ok(Self::new(tasks, users, notifier))
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    pub fn users(&self) -> &UserDirectory {
        &self.users
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    // --- views ---

    pub fn view(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter_tasks(self.tasks.tasks(), filter)
    }

    pub fn summary(&self) -> TaskSummary {
        summarize(self.tasks.tasks())
    }

    pub fn recent(&self, limit: usize) -> Vec<&Task> {
        recent_tasks(self.tasks.tasks(), limit)
    }

    // --- tasks ---

    pub fn create_task(&mut self, input: NewTask) -> Result<Task, TaskboardError> {
        match self.tasks.create(input) {
            Ok(task) => {
                let task = task.clone();
                self.notifier.success("Task created successfully");
                Ok(task)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<Option<Task>, TaskboardError> {
        match self.tasks.update(id, patch) {
            Ok(Some(task)) => {
                let task = task.clone();
                self.notifier.success("Task updated successfully");
                Ok(Some(task))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn change_stage(&mut self, id: &str, stage: &str) -> Result<Option<Task>, TaskboardError> {
        match self.tasks.change_stage(id, stage) {
            Ok(Some(task)) => {
                let task = task.clone();
                self.notifier
                    .success(format!("Task status updated to {}", task.stage.as_str()));
                Ok(Some(task))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Trashed> {
        let task = self.tasks.soft_delete(id)?.clone();
        self.notifier.success("Task moved to trash");
        Some(Trashed {
            task,
            navigate: Route::Tasks,
        })
    }

    /// A blank title is not an error: the user is warned and nothing changes.
    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> Option<Subtask> {
        if title.trim().is_empty() {
            self.notifier.warning("Subtask title is required");
            return None;
        }
        let subtask = self.tasks.add_subtask(task_id, title)?.clone();
        self.notifier.success("Subtask added");
        Some(subtask)
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> Option<Subtask> {
        let subtask = self.tasks.toggle_subtask(task_id, subtask_id)?.clone();
        let state = if subtask.completed { "completed" } else { "reopened" };
        self.notifier.success(format!("Subtask {state}"));
        Some(subtask)
    }

    pub fn remove_subtask(&mut self, task_id: &str, subtask_id: &str) -> Option<Subtask> {
        let subtask = self.tasks.remove_subtask(task_id, subtask_id)?;
        self.notifier.success("Subtask deleted");
        Some(subtask)
    }

    // --- trash ---

    pub fn restore(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.trash().restore(id)?.clone();
        self.notifier
            .success(format!("\"{}\" restored successfully", task.title));
        Some(task)
    }

    pub fn permanently_delete(&mut self, id: &str) -> Option<Task> {
        let task = self.tasks.trash().permanently_delete(id)?;
        self.notifier
            .success(format!("\"{}\" permanently deleted", task.title));
        Some(task)
    }

    /// Restore the selected tasks and clear the selection.
    pub fn restore_selected(&mut self, selection: &mut Selection) -> Result<Vec<String>, TaskboardError> {
        if selection.is_empty() {
            return Err(self.reject(TaskboardError::empty_selection("restore")));
        }
        let restored = self.tasks.trash().restore_many(selection.ids());
        selection.clear();
        self.notifier
            .success(format!("{} task(s) restored successfully", restored.len()));
        Ok(restored)
    }

    /// Permanently delete the selected tasks and clear the selection.
    pub fn delete_selected(&mut self, selection: &mut Selection) -> Result<Vec<Task>, TaskboardError> {
        if selection.is_empty() {
            return Err(self.reject(TaskboardError::empty_selection("delete")));
        }
        let deleted = self.tasks.trash().delete_many(selection.ids());
        selection.clear();
        self.notifier
            .success(format!("{} task(s) permanently deleted", deleted.len()));
        Ok(deleted)
    }

    pub fn empty_trash(&mut self, selection: &mut Selection) -> Vec<Task> {
        let removed = self.tasks.trash().empty();
        selection.clear();
        self.notifier.success("Trash emptied successfully");
        removed
    }

    pub fn purge_expired(&mut self, retention: Duration, now: DateTime<Utc>) -> Vec<Task> {
        let purged = self.tasks.trash().purge_expired(retention, now);
        self.notifier
            .success(format!("{} expired task(s) purged", purged.len()));
        purged
    }

    // --- users ---

    pub fn add_user(&mut self, input: NewUser) -> Result<User, TaskboardError> {
        match self.users.add(input) {
            Ok(user) => {
                let user = user.clone();
                self.notifier.success("User added successfully");
                Ok(user)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn edit_user(&mut self, id: &str, patch: UserPatch) -> Result<Option<User>, TaskboardError> {
        match self.users.edit(id, patch) {
            Ok(Some(user)) => {
                let user = user.clone();
                self.notifier.success("User updated successfully");
                Ok(Some(user))
            }
            Ok(None) => Ok(None),
            Err(e) => Err(self.reject(e)),
        }
    }

    pub fn remove_user(&mut self, id: &str) -> Option<User> {
        let user = self.users.remove(id)?;
        self.notifier.success("User removed successfully");
        Some(user)
    }

    fn reject(&mut self, err: TaskboardError) -> TaskboardError {
        self.notifier.error(err.message.clone());
        err
    }
}
