use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Normal,
    Medium,
    High,
}

impl Priority {
    pub const ALL: [&'static str; 4] = ["low", "normal", "medium", "high"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Normal => "normal",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "normal" => Some(Self::Normal),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// Workflow state of a task. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    #[default]
    Todo,
    InProgress,
    Completed,
}

impl Stage {
    pub const ALL: [&'static str; 3] = ["todo", "in-progress", "completed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "in-progress",
            Self::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(Self::Todo),
            "in-progress" => Some(Self::InProgress),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default = "default_tag")]
    pub tag: String,
}

pub(crate) fn default_tag() -> String {
    "general".to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub stage: Stage,
    pub date: NaiveDate,
    /// Embedded copies of the assigned users, not live references.
    #[serde(default)]
    pub team: Vec<User>,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    /// Image references.
    #[serde(default)]
    pub assets: Vec<String>,
    #[serde(default)]
    pub activities: Vec<serde_json::Value>,
    #[serde(default)]
    pub is_trashed: bool,
    #[serde(default)]
    pub trashed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn completed_subtasks(&self) -> usize {
        self.subtasks.iter().filter(|s| s.completed).count()
    }
}

/// Input for creating a task; absent fields take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub stage: Option<Stage>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl NewTask {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Field-level patch for an existing task. Identity and creation time
/// cannot be patched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub priority: Option<Priority>,
    pub stage: Option<Stage>,
    pub date: Option<NaiveDate>,
    pub team: Option<Vec<User>>,
    pub subtasks: Option<Vec<Subtask>>,
    pub assets: Option<Vec<String>>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.priority.is_none()
            && self.stage.is_none()
            && self.date.is_none()
            && self.team.is_none()
            && self.subtasks.is_none()
            && self.assets.is_none()
    }
}
