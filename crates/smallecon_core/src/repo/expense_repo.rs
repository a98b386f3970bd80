//! Expense repository contracts and SQLite implementation.

use super::{parse_date, parse_uuid, RepoError, RepoResult};
use crate::model::expense::{Expense, ExpenseCategory, ExpenseId, ExpenseStatus};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const EXPENSE_SELECT_SQL: &str = "SELECT
    uuid,
    expense_date,
    amount_cents,
    category,
    description,
    status,
    receipt_url
FROM expenses";

/// Query options for listing expenses.
#[derive(Debug, Clone, Default)]
pub struct ExpenseListQuery {
    pub status: Option<ExpenseStatus>,
    pub category: Option<ExpenseCategory>,
}

pub trait ExpenseRepository {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId>;
    fn update_expense(&self, expense: &Expense) -> RepoResult<()>;
    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>>;
    fn list_expenses(&self, query: &ExpenseListQuery) -> RepoResult<Vec<Expense>>;
    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()>;
    /// Replaces all rows, keeping the slice order as `position`.
    fn replace_expenses(&self, expenses: &[Expense]) -> RepoResult<()>;
}

pub struct SqliteExpenseRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteExpenseRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ExpenseRepository for SqliteExpenseRepository<'_> {
    fn create_expense(&self, expense: &Expense) -> RepoResult<ExpenseId> {
        expense.validate()?;

        self.conn.execute(
            "INSERT INTO expenses (
                uuid,
                position,
                expense_date,
                amount_cents,
                category,
                description,
                status,
                receipt_url
            ) VALUES (
                ?1,
                (SELECT COALESCE(MAX(position), -1) + 1 FROM expenses),
                ?2, ?3, ?4, ?5, ?6, ?7
            );",
            params![
                expense.id.to_string(),
                expense.date.to_string(),
                amount_to_db(expense.amount_cents)?,
                expense.category.as_str(),
                expense.description.as_str(),
                expense.status.as_str(),
                expense.receipt_url.as_deref(),
            ],
        )?;

        Ok(expense.id)
    }

    fn update_expense(&self, expense: &Expense) -> RepoResult<()> {
        expense.validate()?;

        let changed = self.conn.execute(
            "UPDATE expenses
             SET
                expense_date = ?1,
                amount_cents = ?2,
                category = ?3,
                description = ?4,
                status = ?5,
                receipt_url = ?6,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?7;",
            params![
                expense.date.to_string(),
                amount_to_db(expense.amount_cents)?,
                expense.category.as_str(),
                expense.description.as_str(),
                expense.status.as_str(),
                expense.receipt_url.as_deref(),
                expense.id.to_string(),
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(expense.id.to_string()));
        }
        Ok(())
    }

    fn get_expense(&self, id: ExpenseId) -> RepoResult<Option<Expense>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{EXPENSE_SELECT_SQL} WHERE uuid = ?1;"))?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_expense_row(row)?));
        }
        Ok(None)
    }

    fn list_expenses(&self, query: &ExpenseListQuery) -> RepoResult<Vec<Expense>> {
        let mut sql = format!("{EXPENSE_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(status) = query.status {
            sql.push_str(" AND status = ?");
            bind_values.push(Value::Text(status.as_str().to_string()));
        }
        if let Some(category) = query.category {
            sql.push_str(" AND category = ?");
            bind_values.push(Value::Text(category.as_str().to_string()));
        }
        sql.push_str(" ORDER BY position ASC, uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut expenses = Vec::new();
        while let Some(row) = rows.next()? {
            expenses.push(parse_expense_row(row)?);
        }
        Ok(expenses)
    }

    fn delete_expense(&self, id: ExpenseId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM expenses WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id.to_string()));
        }
        Ok(())
    }

    fn replace_expenses(&self, expenses: &[Expense]) -> RepoResult<()> {
        self.conn.execute("DELETE FROM expenses;", [])?;
        for expense in expenses {
            self.create_expense(expense)?;
        }
        Ok(())
    }
}

fn parse_expense_row(row: &Row<'_>) -> RepoResult<Expense> {
    let uuid_text: String = row.get("uuid")?;
    let date_text: String = row.get("expense_date")?;
    let amount: i64 = row.get("amount_cents")?;
    let category_text: String = row.get("category")?;
    let status_text: String = row.get("status")?;

    let amount_cents = u64::try_from(amount).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid amount `{amount}` in expenses.amount_cents"
        ))
    })?;
    let category = category_text.parse::<ExpenseCategory>().map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid category `{category_text}` in expenses.category"
        ))
    })?;
    let status = status_text.parse::<ExpenseStatus>().map_err(|_| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in expenses.status"))
    })?;

    let expense = Expense {
        id: parse_uuid(&uuid_text, "expenses.uuid")?,
        date: parse_date(&date_text, "expenses.expense_date")?,
        amount_cents,
        category,
        description: row.get("description")?,
        status,
        receipt_url: row.get("receipt_url")?,
    };
    expense.validate()?;
    Ok(expense)
}

fn amount_to_db(amount_cents: u64) -> RepoResult<i64> {
    i64::try_from(amount_cents)
        .map_err(|_| RepoError::InvalidData(format!("amount `{amount_cents}` exceeds storage range")))
}
