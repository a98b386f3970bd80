//! Expense use-case service.
//!
//! # Responsibility
//! - Create, update and review expenses held by the store.
//! - Gate deletion behind an explicit confirmation prompt.
//! - Summarize spending per status and per category.
//!
//! # Invariants
//! - A declined confirmation leaves the store untouched.
//! - Summary maps always carry every status and category key.

use crate::model::expense::{Expense, ExpenseCategory, ExpenseId, ExpenseStatus};
use crate::store::{Action, EntityKind, Store, StoreError, Transition};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

#[derive(Debug)]
pub enum ExpenseServiceError {
    Rejected(StoreError),
    ExpenseNotFound(ExpenseId),
}

impl Display for ExpenseServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rejected(err) => write!(f, "{err}"),
            Self::ExpenseNotFound(id) => write!(f, "expense not found: {id}"),
        }
    }
}

impl Error for ExpenseServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rejected(err) => Some(err),
            Self::ExpenseNotFound(_) => None,
        }
    }
}

impl From<StoreError> for ExpenseServiceError {
    fn from(value: StoreError) -> Self {
        if let StoreError::NotFound {
            kind: EntityKind::Expense,
            id,
        } = &value
        {
            if let Ok(uuid) = Uuid::parse_str(id) {
                return Self::ExpenseNotFound(uuid);
            }
        }
        Self::Rejected(value)
    }
}

/// Asks the user to approve a destructive action.
pub trait ConfirmPrompt {
    fn confirm(&self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    Cancelled,
}

/// Input collected by the expense form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateExpenseRequest {
    pub date: NaiveDate,
    pub amount_cents: u64,
    pub category: ExpenseCategory,
    pub description: String,
    pub receipt_url: Option<String>,
}

/// Spending totals in cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseSummary {
    pub count: usize,
    pub total_cents: u64,
    pub by_status: BTreeMap<ExpenseStatus, u64>,
    pub by_category: BTreeMap<ExpenseCategory, u64>,
}

impl ExpenseSummary {
    pub fn approved_cents(&self) -> u64 {
        self.by_status
            .get(&ExpenseStatus::Approved)
            .copied()
            .unwrap_or(0)
    }
}

/// Expense operations over a caller-owned store.
pub struct ExpenseService<'s> {
    store: &'s mut Store,
}

impl<'s> ExpenseService<'s> {
    pub fn new(store: &'s mut Store) -> Self {
        Self { store }
    }

    /// Records a new pending expense.
    pub fn create_expense(
        &mut self,
        request: CreateExpenseRequest,
    ) -> Result<ExpenseId, ExpenseServiceError> {
        let mut expense = Expense::new(
            request.date,
            request.amount_cents,
            request.category,
            request.description.trim(),
        );
        expense.receipt_url = request
            .receipt_url
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let id = expense.id;
        self.store.dispatch(Action::AddExpense(expense))?;
        info!("event=expense_create module=service status=ok expense_id={id}");
        Ok(id)
    }

    pub fn update_expense(&mut self, expense: Expense) -> Result<Transition, ExpenseServiceError> {
        Ok(self.store.dispatch(Action::UpdateExpense(expense))?)
    }

    /// Moves an expense to a new review status.
    pub fn set_status(
        &mut self,
        id: ExpenseId,
        status: ExpenseStatus,
    ) -> Result<Transition, ExpenseServiceError> {
        let mut expense = self
            .store
            .expense(id)
            .cloned()
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))?;
        expense.status = status;
        Ok(self.store.dispatch(Action::UpdateExpense(expense))?)
    }

    /// Deletes an expense once `prompt` approves.
    ///
    /// Unknown ids fail before the prompt is shown.
    pub fn delete_expense(
        &mut self,
        id: ExpenseId,
        prompt: &dyn ConfirmPrompt,
    ) -> Result<DeleteOutcome, ExpenseServiceError> {
        let expense = self
            .store
            .expense(id)
            .ok_or(ExpenseServiceError::ExpenseNotFound(id))?;
        let message = format!(
            "Delete expense \"{}\" ({})?",
            expense.description,
            format_cents(expense.amount_cents)
        );
        if !prompt.confirm(&message) {
            info!("event=expense_delete module=service status=cancelled expense_id={id}");
            return Ok(DeleteOutcome::Cancelled);
        }

        self.store.dispatch(Action::RemoveExpense(id))?;
        info!("event=expense_delete module=service status=ok expense_id={id}");
        Ok(DeleteOutcome::Deleted)
    }

    pub fn get_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.store.expense(id)
    }

    pub fn list_by_status(&self, status: ExpenseStatus) -> Vec<&Expense> {
        self.store
            .expenses()
            .iter()
            .filter(|expense| expense.status == status)
            .collect()
    }

    pub fn summary(&self) -> ExpenseSummary {
        summarize(self.store.expenses())
    }
}

/// Totals for any expense slice.
pub fn summarize(expenses: &[Expense]) -> ExpenseSummary {
    let mut by_status: BTreeMap<ExpenseStatus, u64> =
        ExpenseStatus::ALL.into_iter().map(|s| (s, 0)).collect();
    let mut by_category: BTreeMap<ExpenseCategory, u64> =
        ExpenseCategory::ALL.into_iter().map(|c| (c, 0)).collect();
    let mut total_cents = 0u64;

    for expense in expenses {
        total_cents = total_cents.saturating_add(expense.amount_cents);
        let status_total = by_status.entry(expense.status).or_default();
        *status_total = status_total.saturating_add(expense.amount_cents);
        let category_total = by_category.entry(expense.category).or_default();
        *category_total = category_total.saturating_add(expense.amount_cents);
    }

    ExpenseSummary {
        count: expenses.len(),
        total_cents,
        by_status,
        by_category,
    }
}

/// Renders cents as `$1,234.56`.
pub fn format_cents(cents: u64) -> String {
    let dollars = cents / 100;
    let digits = dollars.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}.{:02}", cents % 100)
}

#[cfg(test)]
mod tests {
    use super::{format_cents, summarize};
    use crate::model::expense::{Expense, ExpenseCategory, ExpenseStatus};
    use chrono::NaiveDate;

    #[test]
    fn formats_cents_with_grouping() {
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(12_345), "$123.45");
        assert_eq!(format_cents(123_456_789), "$1,234,567.89");
    }

    #[test]
    fn summary_totals_saturate_instead_of_overflowing() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let expenses = [
            Expense::new(date, u64::MAX, ExpenseCategory::Venue, "Hall"),
            Expense::new(date, 1, ExpenseCategory::Venue, "Stamp"),
        ];

        let summary = summarize(&expenses);
        assert_eq!(summary.total_cents, u64::MAX);
        assert_eq!(summary.by_status[&ExpenseStatus::Pending], u64::MAX);
        assert_eq!(summary.by_category[&ExpenseCategory::Venue], u64::MAX);
    }
}
