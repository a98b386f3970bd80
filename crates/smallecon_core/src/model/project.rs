//! Project model.

use super::task::TaskId;
use super::{require_text, ModelValidationError};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProjectId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Planning,
    Active,
    OnHold,
    Completed,
}

/// Group of catalog tasks pursued together under one budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: String,
    pub status: ProjectStatus,
    /// Linked catalog tasks; unknown ids are kept and count as pending.
    pub task_ids: Vec<TaskId>,
    pub budget_cents: u64,
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: String::new(),
            status: ProjectStatus::Planning,
            task_ids: Vec::new(),
            budget_cents: 0,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId { entity: "project" });
        }
        require_text("project", "name", &self.name)
    }
}
