//! Defines the budget model and its database queries.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error, amount::validate_amount, category::Category, database_id::BudgetId, month::YearMonth,
};

/// A spending cap for one category in one calendar month.
///
/// There is at most one budget per category and month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// The ID of the budget.
    pub id: BudgetId,
    /// The category the budget applies to.
    pub category: Category,
    /// The most that should be spent in the category during `month`.
    pub amount: f64,
    /// The month the budget applies to.
    pub month: YearMonth,
}

/// The validated fields of a budget that has not been saved yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBudget {
    category: Category,
    amount: f64,
    month: YearMonth,
}

impl NewBudget {
    /// Validate the fields of a budget.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero, negative or not a number,
    /// - or [Error::AmountTooLarge] if `amount` is greater than [crate::MAX_AMOUNT].
    pub fn new(category: Category, amount: f64, month: YearMonth) -> Result<Self, Error> {
        let amount = validate_amount(amount)?;

        Ok(Self {
            category,
            amount,
            month,
        })
    }
}

/// Create the budget for the budget's category and month, or replace the
/// amount of the existing one.
///
/// This is a single upsert statement keyed on the unique (category, month)
/// pair, so concurrent writers cannot create duplicates. When two writers
/// race, the last write wins. The existing budget keeps its ID.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn upsert_budget(budget: NewBudget, connection: &Connection) -> Result<Budget, Error> {
    let now = OffsetDateTime::now_utc();

    let budget = connection
        .prepare(
            "INSERT INTO budget (category, amount, month, created_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(category, month) DO UPDATE SET
                amount = excluded.amount,
                updated_at = ?4
             RETURNING id, category, amount, month",
        )?
        .query_row(
            (budget.category, budget.amount, budget.month, now),
            map_budget_row,
        )?;

    Ok(budget)
}

/// Retrieve all budgets, most recent month first.
///
/// Budgets in the same month are ordered by category name.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_budgets(connection: &Connection) -> Result<Vec<Budget>, Error> {
    connection
        .prepare(
            "SELECT id, category, amount, month FROM budget
             ORDER BY month DESC, category ASC",
        )?
        .query_map([], map_budget_row)?
        .map(|maybe_budget| maybe_budget.map_err(Error::from))
        .collect()
}

/// Create the budget table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_budget_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS budget (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                category TEXT NOT NULL,
                amount REAL NOT NULL CHECK (amount > 0),
                month TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT,
                UNIQUE(category, month)
                )",
        (),
    )?;

    Ok(())
}

fn map_budget_row(row: &Row) -> Result<Budget, rusqlite::Error> {
    let id = row.get(0)?;
    let category = row.get(1)?;
    let amount = row.get(2)?;
    let month = row.get(3)?;

    Ok(Budget {
        id,
        category,
        amount,
        month,
    })
}
