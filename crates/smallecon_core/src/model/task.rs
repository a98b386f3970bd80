//! Learning task model.
//!
//! # Responsibility
//! - Define the static task record whose completion unlocks funding.
//! - Provide the exhaustive task category set.
//!
//! # Invariants
//! - `TaskId` is a lowercase slug and stable across releases.
//! - `funding_amount` is whole dollars.

use super::ModelValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static TASK_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9_-]*$").expect("valid task id regex"));

/// Stable slug identifying one task in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TaskId(String);

impl TaskId {
    /// Parses a slug, trimming surrounding whitespace.
    pub fn parse(value: &str) -> Result<Self, ModelValidationError> {
        let trimmed = value.trim();
        if !TASK_ID_RE.is_match(trimmed) {
            return Err(ModelValidationError::InvalidTaskId(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TaskId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for TaskId {
    type Error = ModelValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TaskId> for String {
    fn from(value: TaskId) -> Self {
        value.0
    }
}

impl FromStr for TaskId {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Topic area a task belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    Personal,
    Community,
    Project,
    Cultural,
    Business,
    Mission,
    Operations,
    Finances,
    Marketing,
}

impl TaskCategory {
    /// Every category in declaration order.
    pub const ALL: [TaskCategory; 9] = [
        Self::Personal,
        Self::Community,
        Self::Project,
        Self::Cultural,
        Self::Business,
        Self::Mission,
        Self::Operations,
        Self::Finances,
        Self::Marketing,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Personal => "personal",
            Self::Community => "community",
            Self::Project => "project",
            Self::Cultural => "cultural",
            Self::Business => "business",
            Self::Mission => "mission",
            Self::Operations => "operations",
            Self::Finances => "finances",
            Self::Marketing => "marketing",
        }
    }
}

impl Display for TaskCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskCategory {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or(ModelValidationError::UnknownVariant {
                kind: "task category",
                value: normalized,
            })
    }
}

/// One unit of learning content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub description: String,
    pub category: TaskCategory,
    /// Dollars unlocked when the task is completed.
    pub funding_amount: u64,
    /// Free-form estimate shown to learners, e.g. `"30 min"`.
    pub time_estimate: String,
    pub icon: String,
}

impl Task {
    /// Creates a task with empty description, estimate and icon.
    pub fn new(
        id: TaskId,
        title: impl Into<String>,
        category: TaskCategory,
        funding_amount: u64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            category,
            funding_amount,
            time_estimate: String::new(),
            icon: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_time_estimate(mut self, time_estimate: impl Into<String>) -> Self {
        self.time_estimate = time_estimate.into();
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }
}
