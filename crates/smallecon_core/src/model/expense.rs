//! Expense record model.
//!
//! # Invariants
//! - `amount_cents` is strictly positive.
//! - `receipt_url`, when set, is an absolute http(s) link.

use super::{require_text, ModelValidationError};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use uuid::Uuid;

static RECEIPT_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://\S+$").expect("valid receipt url regex"));

/// Stable identifier of one expense.
pub type ExpenseId = Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Supplies,
    Travel,
    Equipment,
    Marketing,
    Services,
    Venue,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 7] = [
        Self::Supplies,
        Self::Travel,
        Self::Equipment,
        Self::Marketing,
        Self::Services,
        Self::Venue,
        Self::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supplies => "supplies",
            Self::Travel => "travel",
            Self::Equipment => "equipment",
            Self::Marketing => "marketing",
            Self::Services => "services",
            Self::Venue => "venue",
            Self::Other => "other",
        }
    }
}

impl Display for ExpenseCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseCategory {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == normalized)
            .ok_or(ModelValidationError::UnknownVariant {
                kind: "expense category",
                value: normalized,
            })
    }
}

/// Review state of an expense.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseStatus {
    Approved,
    Pending,
    Rejected,
}

impl ExpenseStatus {
    pub const ALL: [ExpenseStatus; 3] = [Self::Approved, Self::Pending, Self::Rejected];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Approved => "approved",
            Self::Pending => "pending",
            Self::Rejected => "rejected",
        }
    }
}

impl Display for ExpenseStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExpenseStatus {
    type Err = ModelValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or(ModelValidationError::UnknownVariant {
                kind: "expense status",
                value: normalized,
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub date: NaiveDate,
    pub amount_cents: u64,
    pub category: ExpenseCategory,
    pub description: String,
    pub status: ExpenseStatus,
    pub receipt_url: Option<String>,
}

impl Expense {
    /// Creates a pending expense with a generated id.
    pub fn new(
        date: NaiveDate,
        amount_cents: u64,
        category: ExpenseCategory,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            amount_cents,
            category,
            description: description.into(),
            status: ExpenseStatus::Pending,
            receipt_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), ModelValidationError> {
        if self.id.is_nil() {
            return Err(ModelValidationError::NilId { entity: "expense" });
        }
        if self.amount_cents == 0 {
            return Err(ModelValidationError::ZeroAmount { entity: "expense" });
        }
        require_text("expense", "description", &self.description)?;
        if let Some(url) = self.receipt_url.as_deref() {
            if !RECEIPT_URL_RE.is_match(url) {
                return Err(ModelValidationError::InvalidReceiptUrl(url.to_string()));
            }
        }
        Ok(())
    }
}
