//! Initial dataset providers.

use std::cell::OnceCell;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use serde::Deserialize;
use serde_json::json;

use crate::error::TaskboardError;
use crate::models::{Priority, Role, Stage, Subtask, Task, User};

/// Supplies the tasks and users a board starts from.
pub trait DataSource {
    fn load_initial_tasks(&self) -> Result<Vec<Task>, TaskboardError>;
    fn load_initial_users(&self) -> Result<Vec<User>, TaskboardError>;
}

/// JSON document: `{"tasks": [...], "users": [...]}`. Both keys are optional.
/// The file is read once; tasks and users always come from the same read.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    dataset: OnceCell<Dataset>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct Dataset {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(default)]
    users: Vec<User>,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            dataset: OnceCell::new(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Dataset, TaskboardError> {
        let content = fs::read_to_string(&self.path).map_err(|e| {
            TaskboardError::data_source(format!("Cannot read {}: {e}", self.path.display()))
        })?;
        let dataset: Dataset = serde_json::from_str(&content).map_err(|e| {
            TaskboardError::data_source(format!("Invalid dataset {}: {e}", self.path.display()))
        })?;
        validate(&dataset.tasks)?;
        Ok(dataset)
    }

    fn dataset(&self) -> Result<&Dataset, TaskboardError> {
        if let Some(dataset) = self.dataset.get() {
            return Ok(dataset);
        }
        let dataset = self.read()?;
        Ok(self.dataset.get_or_init(|| dataset))
    }
}

impl DataSource for JsonFileSource {
    fn load_initial_tasks(&self) -> Result<Vec<Task>, TaskboardError> {
        Ok(self.dataset()?.tasks.clone())
    }

    fn load_initial_users(&self) -> Result<Vec<User>, TaskboardError> {
        Ok(self.dataset()?.users.clone())
    }
}

fn validate(tasks: &[Task]) -> Result<(), TaskboardError> {
    let mut seen = std::collections::HashSet::new();
    for task in tasks {
        if task.title.trim().is_empty() {
            return Err(TaskboardError::validation(format!(
                "Task {} has an empty title",
                task.id
            )));
        }
        if !task.is_trashed && task.trashed_at.is_some() {
            return Err(TaskboardError::validation(format!(
                "Task {} has trashed_at but is not trashed",
                task.id
            )));
        }
        if !seen.insert(task.id.as_str()) {
            return Err(TaskboardError::validation(format!(
                "Duplicate task id: {}",
                task.id
            )));
        }
    }
    Ok(())
}

/// Built-in demo dataset.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureSource;

impl DataSource for FixtureSource {
    fn load_initial_tasks(&self) -> Result<Vec<Task>, TaskboardError> {
        Ok(fixture_tasks())
    }

    fn load_initial_users(&self) -> Result<Vec<User>, TaskboardError> {
        Ok(Vec::new())
    }
}

fn user(id: &str, name: &str, email: &str, title: &str, role: Role) -> User {
    User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        title: title.to_string(),
        role,
    }
}

fn at(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 9, 0, 0)
        .single()
        .unwrap_or_default()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn subtask(id: &str, title: &str, date: DateTime<Utc>, tag: &str, completed: bool) -> Subtask {
    Subtask {
        id: id.to_string(),
        title: title.to_string(),
        date,
        completed,
        tag: tag.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn task(
    id: &str,
    title: &str,
    priority: Priority,
    stage: Stage,
    date: NaiveDate,
    team: Vec<User>,
    subtasks: Vec<Subtask>,
    created: DateTime<Utc>,
) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        priority,
        stage,
        date,
        team,
        subtasks,
        assets: Vec::new(),
        activities: Vec::new(),
        is_trashed: false,
        trashed_at: None,
        created_at: created,
        updated_at: created,
    }
}

fn fixture_tasks() -> Vec<Task> {
    let codewave = user("u-01", "Codewave Asante", "codewave@example.com", "Administrator", Role::Admin);
    let jane = user("u-02", "Jane Smith", "jane@example.com", "Product Manager", Role::Manager);
    let alex = user("u-03", "Alex Johnson", "alex@example.com", "Designer", Role::Designer);
    let emily = user("u-04", "Emily Wilson", "emily@example.com", "Data Analyst", Role::Developer);
    let sam = user("u-05", "Sam Lee", "sam@example.com", "QA Engineer", Role::Tester);

    let mut website = task(
        "t-01",
        "Website Project Proposal Review",
        Priority::High,
        Stage::Todo,
        day(2024, 2, 29),
        vec![codewave.clone(), jane.clone(), alex.clone()],
        vec![
            subtask("s-01", "Blog App Dashboard", at(2024, 2, 6), "tutorial", false),
            subtask("s-02", "Blog App Admin Dashboard", at(2024, 2, 17), "tutorial", true),
        ],
        at(2024, 2, 9),
    );
    website.assets = vec![
        "https://images.example.com/proposal-1.jpeg".to_string(),
        "https://images.example.com/proposal-2.jpeg".to_string(),
    ];
    website.activities = vec![
        json!({ "type": "started", "activity": "Project started", "by": "u-01", "date": "2024-02-09T09:00:00Z" }),
        json!({ "type": "commented", "activity": "Reviewed the outline", "by": "u-02", "date": "2024-02-10T09:00:00Z" }),
    ];

    let mut duplicate_jane = jane.clone();
    duplicate_jane.title = "Senior Product Manager".to_string();

    vec![
        website,
        task(
            "t-02",
            "Bug Fixing",
            Priority::High,
            Stage::InProgress,
            day(2024, 2, 29),
            vec![codewave.clone(), emily.clone()],
            vec![subtask("s-03", "Reproduce login bug", at(2024, 2, 20), "bug", false)],
            at(2024, 2, 20),
        ),
        task(
            "t-03",
            "Duplicate - Review Code Changes",
            Priority::Medium,
            Stage::InProgress,
            day(2024, 2, 29),
            vec![duplicate_jane, sam.clone()],
            Vec::new(),
            at(2024, 2, 22),
        ),
        task(
            "t-04",
            "Test Task",
            Priority::Normal,
            Stage::Todo,
            day(2024, 3, 5),
            vec![sam, alex],
            Vec::new(),
            at(2024, 2, 24),
        ),
        task(
            "t-05",
            "Deploy to Staging",
            Priority::Low,
            Stage::Completed,
            day(2024, 2, 25),
            vec![emily, codewave],
            vec![subtask("s-04", "Smoke test", at(2024, 2, 25), "release", true)],
            at(2024, 2, 18),
        ),
        task(
            "t-06",
            "Quarterly Planning",
            Priority::Medium,
            Stage::Completed,
            day(2024, 3, 1),
            vec![jane],
            Vec::new(),
            at(2024, 2, 15),
        ),
    ]
}
