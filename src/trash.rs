//! Trash policy: restore and permanent removal of soft-deleted tasks.
//!
//! Every operation here only touches tasks whose trash flag is set; an id
//! that names a live task behaves like an unknown id.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info};

use crate::collection::TaskCollection;
use crate::models::Task;

/// Default age after which trashed items are eligible for purge.
pub const DEFAULT_RETENTION_DAYS: i64 = 30;

pub struct Trash<'a> {
    collection: &'a mut TaskCollection,
}

impl TaskCollection {
    pub fn trash(&mut self) -> Trash<'_> {
        Trash { collection: self }
    }
}

impl Trash<'_> {
    pub fn restore(&mut self, id: &str) -> Option<&Task> {
        let task = self.collection.get_mut(id).filter(|t| t.is_trashed)?;
        task.is_trashed = false;
        task.trashed_at = None;
        task.updated_at = Utc::now();
        debug!(task_id = %id, "task restored");
        Some(&*task)
    }

    /// Remove a trashed task from the collection for good.
    pub fn permanently_delete(&mut self, id: &str) -> Option<Task> {
        let tasks = self.collection.tasks_mut();
        let idx = tasks.iter().position(|t| t.id == id && t.is_trashed)?;
        debug!(task_id = %id, "task permanently deleted");
        Some(tasks.remove(idx))
    }

    /// Restore each id independently. Returns the ids actually restored;
    /// unknown or live ids are skipped.
    pub fn restore_many<'s, I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'s str>,
    {
        ids.into_iter()
            .filter_map(|id| self.restore(id).map(|t| t.id.clone()))
            .collect()
    }

    pub fn delete_many<'s, I>(&mut self, ids: I) -> Vec<Task>
    where
        I: IntoIterator<Item = &'s str>,
    {
        ids.into_iter()
            .filter_map(|id| self.permanently_delete(id))
            .collect()
    }

    /// Remove every trashed task, regardless of any active filter.
    pub fn empty(&mut self) -> Vec<Task> {
        let (trashed, kept): (Vec<Task>, Vec<Task>) = std::mem::take(self.collection.tasks_mut())
            .into_iter()
            .partition(|t| t.is_trashed);
        *self.collection.tasks_mut() = kept;
        info!(removed = trashed.len(), "trash emptied");
        trashed
    }

    /// Ids of trashed tasks older than `retention` at `now`. A trashed task
    /// without a timestamp is never considered expired, and neither is
    /// anything when the cutoff falls before the representable range.
    pub fn expired(&self, retention: Duration, now: DateTime<Utc>) -> Vec<String> {
        let Some(cutoff) = now.checked_sub_signed(retention) else {
            return Vec::new();
        };
        self.collection
            .tasks()
            .iter()
            .filter(|t| t.is_trashed && t.trashed_at.is_some_and(|at| at <= cutoff))
            .map(|t| t.id.clone())
            .collect()
    }

    pub fn purge_expired(&mut self, retention: Duration, now: DateTime<Utc>) -> Vec<Task> {
        let expired = self.expired(retention, now);
        let purged = self.delete_many(expired.iter().map(String::as_str));
        info!(purged = purged.len(), "expired trash purged");
        purged
    }
}

/// Ids checked for a batch operation, scoped to whatever list is visible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, id: impl Into<String>) {
        self.ids.insert(id.into());
    }

    pub fn deselect(&mut self, id: &str) {
        self.ids.remove(id);
    }

    /// Mirror a checkbox: checked selects, unchecked deselects.
    pub fn toggle(&mut self, id: &str, checked: bool) {
        if checked {
            self.select(id);
        } else {
            self.deselect(id);
        }
    }

    /// Replace the selection with exactly the visible tasks.
    pub fn select_all(&mut self, visible: &[&Task]) {
        self.ids = visible.iter().map(|t| t.id.clone()).collect();
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// State of the "select all" header checkbox for a visible list.
    pub fn is_all_selected(&self, visible: &[&Task]) -> bool {
        !visible.is_empty()
            && self.ids.len() == visible.len()
            && visible.iter().all(|t| self.ids.contains(&t.id))
    }
}
