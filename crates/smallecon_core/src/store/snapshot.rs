use crate::model::event::Event;
use crate::model::expense::Expense;
use crate::model::task::TaskId;
use serde::{Deserialize, Serialize};

/// Persistable slice of the store.
///
/// `completed_task_ids` is sorted; `events` and `expenses` keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub revision: u64,
    pub completed_task_ids: Vec<TaskId>,
    pub events: Vec<Event>,
    pub expenses: Vec<Expense>,
}
