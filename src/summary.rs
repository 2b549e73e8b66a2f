use serde::Serialize;

use crate::models::{Stage, Task};

/// Dashboard counters over non-trashed tasks.
#[derive(Debug, Default, Clone, Serialize)]
pub struct TaskSummary {
    pub total: usize,
    pub todo: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub percentage: f64,
}

pub fn summarize(tasks: &[Task]) -> TaskSummary {
    let mut summary = TaskSummary::default();
    for task in tasks.iter().filter(|t| !t.is_trashed) {
        match task.stage {
            Stage::Todo => summary.todo += 1,
            Stage::InProgress => summary.in_progress += 1,
            Stage::Completed => summary.completed += 1,
        }
    }
    summary.total = summary.todo + summary.in_progress + summary.completed;
    summary.percentage = if summary.total > 0 {
        (summary.completed as f64 / summary.total as f64) * 100.0
    } else {
        0.0
    };
    summary
}

/// First `limit` non-trashed tasks in insertion order.
pub fn recent_tasks(tasks: &[Task], limit: usize) -> Vec<&Task> {
    tasks.iter().filter(|t| !t.is_trashed).take(limit).collect()
}
