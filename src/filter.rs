//! Derived views over a task slice. Output always preserves input order.

use crate::error::TaskboardError;
use crate::models::{Stage, Task};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Stage(Stage),
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Stage(stage) => stage.as_str(),
        }
    }

    pub fn parse(s: &str) -> Result<Self, TaskboardError> {
        if s == "all" {
            return Ok(Self::All);
        }
        Stage::from_str(s).map(Self::Stage).ok_or_else(|| {
            TaskboardError::invalid_value("status", s, &["all", "todo", "in-progress", "completed"])
        })
    }

    fn matches(&self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Stage(stage) => task.stage == *stage,
        }
    }
}

/// Which side of the trash flag a view looks at. The trash view is the
/// exact complement of the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    #[default]
    Active,
    Trash,
}

#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: StatusFilter,
    pub scope: Scope,
    pub search: String,
}

impl TaskFilter {
    pub fn active() -> Self {
        Self::default()
    }

    pub fn trash() -> Self {
        Self {
            scope: Scope::Trash,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        let in_scope = match self.scope {
            Scope::Active => !task.is_trashed,
            Scope::Trash => task.is_trashed,
        };
        in_scope && self.status.matches(task) && matches_search(task, &self.search)
    }
}

pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t)).collect()
}

/// Case-insensitive substring match over title or priority. An empty term
/// matches everything.
fn matches_search(task: &Task, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    task.title.to_lowercase().contains(&needle) || task.priority.as_str().contains(&needle)
}
