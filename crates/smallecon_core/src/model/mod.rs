//! Domain model for the progress dashboard.
//!
//! # Responsibility
//! - Define tagged records for tasks, events, expenses and projects.
//! - Keep every category/status an exhaustive enum with stable wire names.
//!
//! # Invariants
//! - Records are validated before they enter the store or the database.
//! - Event, expense and project identity is a non-nil UUID.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod event;
pub mod expense;
pub mod project;
pub mod task;

/// Validation failure for any domain record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelValidationError {
    /// Task id is not a lowercase slug.
    InvalidTaskId(String),
    /// UUID identity is the nil value.
    NilId { entity: &'static str },
    /// Required text field is empty after trimming.
    EmptyField {
        entity: &'static str,
        field: &'static str,
    },
    /// Monetary amount must be positive.
    ZeroAmount { entity: &'static str },
    /// Receipt link is not an http(s) URL.
    InvalidReceiptUrl(String),
    /// Enum text does not name a known variant.
    UnknownVariant { kind: &'static str, value: String },
}

impl Display for ModelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidTaskId(value) => write!(f, "invalid task id `{value}`"),
            Self::NilId { entity } => write!(f, "{entity} id must not be nil"),
            Self::EmptyField { entity, field } => {
                write!(f, "{entity} field `{field}` must not be empty")
            }
            Self::ZeroAmount { entity } => write!(f, "{entity} amount must be greater than zero"),
            Self::InvalidReceiptUrl(value) => write!(f, "invalid receipt url `{value}`"),
            Self::UnknownVariant { kind, value } => write!(f, "unknown {kind} `{value}`"),
        }
    }
}

impl Error for ModelValidationError {}

pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ModelValidationError> {
    if value.trim().is_empty() {
        return Err(ModelValidationError::EmptyField { entity, field });
    }
    Ok(())
}
