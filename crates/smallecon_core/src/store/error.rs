use crate::model::ModelValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Record family addressed by a store action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Event,
    Expense,
    Project,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Expense => "expense",
            Self::Project => "project",
        }
    }
}

/// Rejected store transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    Validation(ModelValidationError),
    DuplicateId { kind: EntityKind, id: String },
    NotFound { kind: EntityKind, id: String },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateId { kind, id } => {
                write!(f, "{} already exists: {id}", kind.as_str())
            }
            Self::NotFound { kind, id } => write!(f, "{} not found: {id}", kind.as_str()),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateId { .. } | Self::NotFound { .. } => None,
        }
    }
}

impl From<ModelValidationError> for StoreError {
    fn from(value: ModelValidationError) -> Self {
        Self::Validation(value)
    }
}
