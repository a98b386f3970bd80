//! Application store.
//!
//! # Responsibility
//! - Own every mutable collection (completion set, events, expenses, projects).
//! - Apply state transitions through a single `dispatch` entry point.
//! - Track save progress so callers can render a genuine loading state.
//!
//! # Invariants
//! - Records are validated before insertion or replacement.
//! - `revision` increases exactly when a dispatch reports `Transition::Changed`.
//! - The task catalog is fixed for the store lifetime and its ids are unique.

mod error;
mod snapshot;

pub use error::{EntityKind, StoreError};
pub use snapshot::StoreSnapshot;

use crate::model::event::{Event, EventId};
use crate::model::expense::{Expense, ExpenseId};
use crate::model::project::{Project, ProjectId};
use crate::model::task::{Task, TaskId};
use crate::progress::tasks::TaskProgress;
use log::{debug, warn};
use std::collections::BTreeSet;

/// One requested state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CompleteTask(TaskId),
    ResetTask(TaskId),
    AddEvent(Event),
    UpdateEvent(Event),
    RemoveEvent(EventId),
    AddExpense(Expense),
    UpdateExpense(Expense),
    RemoveExpense(ExpenseId),
    AddProject(Project),
    UpdateProject(Project),
    RemoveProject(ProjectId),
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::CompleteTask(_) => "complete_task",
            Self::ResetTask(_) => "reset_task",
            Self::AddEvent(_) => "add_event",
            Self::UpdateEvent(_) => "update_event",
            Self::RemoveEvent(_) => "remove_event",
            Self::AddExpense(_) => "add_expense",
            Self::UpdateExpense(_) => "update_expense",
            Self::RemoveExpense(_) => "remove_expense",
            Self::AddProject(_) => "add_project",
            Self::UpdateProject(_) => "update_project",
            Self::RemoveProject(_) => "remove_project",
        }
    }
}

/// Whether a dispatch altered state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    Unchanged,
}

/// Progress of the most recent save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving { revision: u64 },
    Saved { revision: u64 },
    Failed { message: String },
}

/// Single-owner application state.
#[derive(Debug, Clone)]
pub struct Store {
    tasks: Vec<Task>,
    completed: BTreeSet<TaskId>,
    events: Vec<Event>,
    expenses: Vec<Expense>,
    projects: Vec<Project>,
    revision: u64,
    saved_revision: Option<u64>,
    save_state: SaveState,
}

impl Store {
    /// Creates a store over a fixed task catalog with nothing completed.
    ///
    /// Catalog ids are unique: a repeated id keeps its first task and later
    /// ones are dropped.
    pub fn new(tasks: Vec<Task>) -> Self {
        let mut seen = BTreeSet::new();
        let given = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|task| seen.insert(task.id.clone()))
            .collect();
        if tasks.len() != given {
            warn!(
                "event=store_new module=store status=deduplicated given={} kept={}",
                given,
                tasks.len()
            );
        }
        Self {
            tasks,
            completed: BTreeSet::new(),
            events: Vec::new(),
            expenses: Vec::new(),
            projects: Vec::new(),
            revision: 0,
            saved_revision: None,
            save_state: SaveState::Idle,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn completed_task_ids(&self) -> &BTreeSet<TaskId> {
        &self.completed
    }

    /// Progress accessor over the current catalog and completion set.
    pub fn progress(&self) -> TaskProgress<'_> {
        TaskProgress::new(&self.tasks, &self.completed)
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| &task.id == id)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, id: EventId) -> Option<&Event> {
        self.events.iter().find(|event| event.id == id)
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.iter().find(|expense| expense.id == id)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn save_state(&self) -> &SaveState {
        &self.save_state
    }

    /// Returns whether state changed since the last successful save.
    pub fn is_dirty(&self) -> bool {
        self.saved_revision != Some(self.revision)
    }

    /// Applies one action.
    ///
    /// # Errors
    /// - `Validation` when an inserted/replaced record is invalid.
    /// - `DuplicateId` when adding a record whose id already exists.
    /// - `NotFound` when updating/removing a record that does not exist.
    pub fn dispatch(&mut self, action: Action) -> Result<Transition, StoreError> {
        let name = action.name();
        let transition = self.reduce(action)?;
        Ok(self.record(name, transition))
    }

    /// Marks a task completed; idempotent.
    pub fn complete_task(&mut self, id: TaskId) -> Transition {
        let transition = changed_if(self.completed.insert(id));
        self.record("complete_task", transition)
    }

    /// Clears a task's completion; idempotent.
    pub fn reset_task(&mut self, id: &TaskId) -> Transition {
        let transition = changed_if(self.completed.remove(id));
        self.record("reset_task", transition)
    }

    fn record(&mut self, name: &'static str, transition: Transition) -> Transition {
        if transition == Transition::Changed {
            self.revision += 1;
        }
        debug!(
            "event=store_dispatch module=store status=ok action={} changed={} revision={}",
            name,
            transition == Transition::Changed,
            self.revision
        );
        transition
    }

    fn reduce(&mut self, action: Action) -> Result<Transition, StoreError> {
        match action {
            Action::CompleteTask(id) => Ok(changed_if(self.completed.insert(id))),
            Action::ResetTask(id) => Ok(changed_if(self.completed.remove(&id))),
            Action::AddEvent(mut event) => {
                event.normalize_attendees();
                event.validate()?;
                insert_unique(&mut self.events, event, |e| e.id, EntityKind::Event)
            }
            Action::UpdateEvent(mut event) => {
                event.normalize_attendees();
                event.validate()?;
                replace_existing(&mut self.events, event, |e| e.id, EntityKind::Event)
            }
            Action::RemoveEvent(id) => {
                remove_existing(&mut self.events, id, |e| e.id, EntityKind::Event)
            }
            Action::AddExpense(expense) => {
                expense.validate()?;
                insert_unique(&mut self.expenses, expense, |e| e.id, EntityKind::Expense)
            }
            Action::UpdateExpense(expense) => {
                expense.validate()?;
                replace_existing(&mut self.expenses, expense, |e| e.id, EntityKind::Expense)
            }
            Action::RemoveExpense(id) => {
                remove_existing(&mut self.expenses, id, |e| e.id, EntityKind::Expense)
            }
            Action::AddProject(project) => {
                project.validate()?;
                insert_unique(&mut self.projects, project, |p| p.id, EntityKind::Project)
            }
            Action::UpdateProject(project) => {
                project.validate()?;
                replace_existing(&mut self.projects, project, |p| p.id, EntityKind::Project)
            }
            Action::RemoveProject(id) => {
                remove_existing(&mut self.projects, id, |p| p.id, EntityKind::Project)
            }
        }
    }

    /// Copies the persistable state and marks the store as saving.
    pub fn begin_save(&mut self) -> StoreSnapshot {
        self.save_state = SaveState::Saving {
            revision: self.revision,
        };
        self.snapshot()
    }

    /// Records the outcome of a save started at `revision`.
    pub fn finish_save(&mut self, revision: u64, result: Result<(), String>) {
        self.save_state = match result {
            Ok(()) => {
                self.saved_revision = Some(revision);
                SaveState::Saved { revision }
            }
            Err(message) => SaveState::Failed { message },
        };
    }

    /// Copies the persistable state without touching save state.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            revision: self.revision,
            completed_task_ids: self.completed.iter().cloned().collect(),
            events: self.events.clone(),
            expenses: self.expenses.clone(),
        }
    }

    /// Replaces persistable state with a loaded snapshot.
    ///
    /// Projects and the task catalog are left as they are. The restored state
    /// counts as saved.
    pub fn restore(&mut self, snapshot: StoreSnapshot) -> Result<(), StoreError> {
        for event in &snapshot.events {
            event.validate()?;
        }
        for expense in &snapshot.expenses {
            expense.validate()?;
        }
        self.completed = snapshot.completed_task_ids.into_iter().collect();
        self.events = snapshot.events;
        self.expenses = snapshot.expenses;
        self.revision += 1;
        self.saved_revision = Some(self.revision);
        self.save_state = SaveState::Saved {
            revision: self.revision,
        };
        Ok(())
    }
}

fn changed_if(changed: bool) -> Transition {
    if changed {
        Transition::Changed
    } else {
        Transition::Unchanged
    }
}

fn insert_unique<T, K>(
    items: &mut Vec<T>,
    item: T,
    key: impl Fn(&T) -> K,
    kind: EntityKind,
) -> Result<Transition, StoreError>
where
    K: PartialEq + ToString,
{
    let id = key(&item);
    if items.iter().any(|existing| key(existing) == id) {
        return Err(StoreError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    items.push(item);
    Ok(Transition::Changed)
}

fn replace_existing<T, K>(
    items: &mut [T],
    item: T,
    key: impl Fn(&T) -> K,
    kind: EntityKind,
) -> Result<Transition, StoreError>
where
    T: PartialEq,
    K: PartialEq + ToString,
{
    let id = key(&item);
    let slot = items
        .iter_mut()
        .find(|existing| key(existing) == id)
        .ok_or_else(|| StoreError::NotFound {
            kind,
            id: id.to_string(),
        })?;
    if *slot == item {
        return Ok(Transition::Unchanged);
    }
    *slot = item;
    Ok(Transition::Changed)
}

fn remove_existing<T, K>(
    items: &mut Vec<T>,
    id: K,
    key: impl Fn(&T) -> K,
    kind: EntityKind,
) -> Result<Transition, StoreError>
where
    K: PartialEq + ToString,
{
    let index = items
        .iter()
        .position(|existing| key(existing) == id)
        .ok_or_else(|| StoreError::NotFound {
            kind,
            id: id.to_string(),
        })?;
    items.remove(index);
    Ok(Transition::Changed)
}
