//! Workspace configuration stored as `config.json` next to the database.

use std::fs;
use std::path::Path;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::error::TaskboardError;
use crate::trash::DEFAULT_RETENTION_DAYS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Days a task stays in the trash before `trash purge` removes it
    #[serde(default = "default_retention_days")]
    pub retention_days: i64,

    /// Number of tasks listed under "recent" on the dashboard
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            retention_days: default_retention_days(),
            recent_limit: default_recent_limit(),
        }
    }
}

fn default_retention_days() -> i64 {
    DEFAULT_RETENTION_DAYS
}

fn default_recent_limit() -> usize {
    5
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, TaskboardError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| TaskboardError::config(format!("Cannot read {}: {e}", path.display())))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TaskboardError::config(format!("Invalid config {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), TaskboardError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| TaskboardError::config(e.to_string()))?;
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| TaskboardError::config(e.to_string()))?;
        fs::write(path, content).map_err(|e| TaskboardError::config(e.to_string()))
    }

    pub fn retention(&self) -> Result<Duration, TaskboardError> {
        Duration::try_days(self.retention_days)
            .ok_or_else(|| TaskboardError::config(format!("retention_days {} is out of range", self.retention_days)))
    }

    fn validate(&self) -> Result<(), TaskboardError> {
        if self.retention_days < 0 {
            return Err(TaskboardError::config("retention_days must not be negative"));
        }
        self.retention()?;
        Ok(())
    }
}
