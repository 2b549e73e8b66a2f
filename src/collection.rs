//! In-memory task collection and its mutations.
//!
//! Single-target operations return `Option`: `None` means no task (or
//! subtask) matched and nothing changed. Validation failures return
//! `Err` and likewise leave the collection untouched.

use chrono::Utc;
use tracing::debug;

use crate::error::TaskboardError;
use crate::models::task::default_tag;
use crate::models::{NewTask, Stage, Subtask, Task, TaskPatch};

#[derive(Debug, Clone, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
}

impl TaskCollection {
    /// Wrap an already loaded sequence. Insertion order is kept as-is.
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub(crate) fn tasks_mut(&mut self) -> &mut Vec<Task> {
        &mut self.tasks
    }

    pub fn create(&mut self, input: NewTask) -> Result<&Task, TaskboardError> {
        let title = require_title(&input.title)?;
        let now = Utc::now();
        let task = Task {
            id: ulid::Ulid::new().to_string(),
            title,
            priority: input.priority.unwrap_or_default(),
            stage: input.stage.unwrap_or_default(),
            date: input.date.unwrap_or_else(|| now.date_naive()),
            team: Vec::new(),
            subtasks: Vec::new(),
            assets: Vec::new(),
            activities: Vec::new(),
            is_trashed: false,
            trashed_at: None,
            created_at: now,
            updated_at: now,
        };
        debug!(task_id = %task.id, "task created");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Option<&Task>, TaskboardError> {
        let title = match patch.title.as_deref() {
            Some(raw) => Some(require_title(raw)?),
            None => None,
        };
        let Some(task) = self.get_mut(id) else {
            return Ok(None);
        };

        if let Some(title) = title {
            task.title = title;
        }
        if let Some(priority) = patch.priority {
            task.priority = priority;
        }
        if let Some(stage) = patch.stage {
            task.stage = stage;
        }
        if let Some(date) = patch.date {
            task.date = date;
        }
        if let Some(team) = patch.team {
            task.team = team;
        }
        if let Some(subtasks) = patch.subtasks {
            task.subtasks = subtasks;
        }
        if let Some(assets) = patch.assets {
            task.assets = assets;
        }
        task.updated_at = Utc::now();
        debug!(task_id = %id, "task updated");
        Ok(Some(&*task))
    }

    /// Mark a task as trashed. A task that is already trashed keeps its
    /// original `trashed_at`.
    pub fn soft_delete(&mut self, id: &str) -> Option<&Task> {
        let task = self.get_mut(id)?;
        if !task.is_trashed {
            let now = Utc::now();
            task.is_trashed = true;
            task.trashed_at = Some(now);
            task.updated_at = now;
            debug!(task_id = %id, "task moved to trash");
        }
        Some(&*task)
    }

    /// Move a task to another stage, given by its wire name.
    pub fn change_stage(&mut self, id: &str, stage: &str) -> Result<Option<&Task>, TaskboardError> {
        let stage = Stage::from_str(stage)
            .ok_or_else(|| TaskboardError::invalid_value("stage", stage, &Stage::ALL))?;
        let Some(task) = self.get_mut(id) else {
            return Ok(None);
        };
        task.stage = stage;
        task.updated_at = Utc::now();
        Ok(Some(&*task))
    }

    /// Append a subtask. A blank title or an unknown task is a no-op.
    pub fn add_subtask(&mut self, task_id: &str, title: &str) -> Option<&Subtask> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = self.get_mut(task_id)?;
        let now = Utc::now();
        task.subtasks.push(Subtask {
            id: ulid::Ulid::new().to_string(),
            title: title.to_string(),
            date: now,
            completed: false,
            tag: default_tag(),
        });
        task.updated_at = now;
        task.subtasks.last()
    }

    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> Option<&Subtask> {
        let task = self.get_mut(task_id)?;
        let idx = task.subtasks.iter().position(|s| s.id == subtask_id)?;
        task.subtasks[idx].completed = !task.subtasks[idx].completed;
        task.updated_at = Utc::now();
        Some(&task.subtasks[idx])
    }

    pub fn remove_subtask(&mut self, task_id: &str, subtask_id: &str) -> Option<Subtask> {
        let task = self.get_mut(task_id)?;
        let idx = task.subtasks.iter().position(|s| s.id == subtask_id)?;
        task.updated_at = Utc::now();
        Some(task.subtasks.remove(idx))
    }
}

fn require_title(raw: &str) -> Result<String, TaskboardError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(TaskboardError::validation("Task title is required"));
    }
    Ok(trimmed.to_string())
}
