//! Task/funding progress accessor.
//!
//! # Responsibility
//! - Split the catalog into completed and pending tasks.
//! - Sum potential and unlocked funding.
//!
//! # Invariants
//! - Output lists keep catalog order.
//! - Completion ids that match no task are ignored by every accessor.
//! - `unlocked_funding() <= total_potential_funding()`.

use super::percent;
use crate::model::task::{Task, TaskCategory, TaskId};
use std::collections::BTreeSet;

/// Read-only view over `(tasks, completed_task_ids)`.
#[derive(Debug, Clone, Copy)]
pub struct TaskProgress<'a> {
    tasks: &'a [Task],
    completed: &'a BTreeSet<TaskId>,
}

impl<'a> TaskProgress<'a> {
    pub fn new(tasks: &'a [Task], completed: &'a BTreeSet<TaskId>) -> Self {
        Self { tasks, completed }
    }

    /// Whole catalog in its original order.
    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    pub fn is_completed(&self, id: &TaskId) -> bool {
        self.completed.contains(id)
    }

    pub fn completed_tasks(&self) -> Vec<&'a Task> {
        self.tasks
            .iter()
            .filter(|task| self.completed.contains(&task.id))
            .collect()
    }

    pub fn pending_tasks(&self) -> Vec<&'a Task> {
        self.tasks
            .iter()
            .filter(|task| !self.completed.contains(&task.id))
            .collect()
    }

    pub fn tasks_by_category(&self, category: TaskCategory) -> Vec<&'a Task> {
        self.tasks
            .iter()
            .filter(|task| task.category == category)
            .collect()
    }

    pub fn total_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks
            .iter()
            .filter(|task| self.completed.contains(&task.id))
            .count()
    }

    /// Sum of all funding; saturates at `u64::MAX`.
    pub fn total_potential_funding(&self) -> u64 {
        saturating_total(self.tasks.iter())
    }

    /// Sum of completed funding; saturates at `u64::MAX`.
    pub fn unlocked_funding(&self) -> u64 {
        saturating_total(
            self.tasks
                .iter()
                .filter(|task| self.completed.contains(&task.id)),
        )
    }

    /// Completed share of the catalog, see [`percent`].
    pub fn completion_percent(&self) -> u32 {
        percent(self.completed_count() as u64, self.total_count() as u64)
    }
}

pub(crate) fn saturating_total<'t>(tasks: impl Iterator<Item = &'t Task>) -> u64 {
    tasks.fold(0u64, |total, task| total.saturating_add(task.funding_amount))
}
