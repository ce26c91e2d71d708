//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    amount::validate_amount,
    category::Category,
    database_id::{DatabaseId, TransactionId},
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense, i.e. an event where money was spent.
///
/// To create a new `Transaction`, validate the fields with [NewTransaction::new]
/// and then insert it with [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// The amount of money spent in this transaction, always greater than zero.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// A text description of what the transaction was for.
    pub description: String,
    /// What the money was spent on.
    pub category: Category,
}

/// The validated fields of a transaction that has not been saved yet.
///
/// Used both for creating a transaction and for replacing the fields of an
/// existing one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    amount: f64,
    date: Date,
    description: String,
    category: Category,
}

impl NewTransaction {
    /// Validate the fields of a transaction.
    ///
    /// The description is trimmed of surrounding whitespace.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::NonPositiveAmount] if `amount` is zero, negative or not a number,
    /// - [Error::AmountTooLarge] if `amount` is greater than [crate::MAX_AMOUNT],
    /// - or [Error::EmptyDescription] if `description` is empty after trimming.
    pub fn new(
        amount: f64,
        date: Date,
        description: &str,
        category: Category,
    ) -> Result<Self, Error> {
        let amount = validate_amount(amount)?;

        let description = description.trim();

        if description.is_empty() {
            return Err(Error::EmptyDescription);
        }

        Ok(Self {
            amount,
            date,
            description: description.to_owned(),
            category,
        })
    }

    /// The amount of money spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// When the transaction happened.
    pub fn date(&self) -> Date {
        self.date
    }

    /// The trimmed description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// What the money was spent on.
    pub fn category(&self) -> Category {
        self.category
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, date, description, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, date, description, category",
        )?
        .query_row(
            (
                transaction.amount,
                transaction.date,
                transaction.description,
                transaction.category,
                OffsetDateTime::now_utc(),
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve all transactions, most recent first.
///
/// Transactions on the same date are ordered by ID, newest first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, date, description, category FROM \"transaction\"
             ORDER BY date DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
        .collect()
}

/// Replace the fields of the transaction `id` and return the updated transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    transaction: NewTransaction,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "UPDATE \"transaction\"
             SET amount = ?1, date = ?2, description = ?3, category = ?4, updated_at = ?5
             WHERE id = ?6
             RETURNING id, amount, date, description, category",
        )?
        .query_row(
            (
                transaction.amount,
                transaction.date,
                transaction.description,
                transaction.category,
                OffsetDateTime::now_utc(),
                id,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Delete the transaction `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM \"transaction\" WHERE id = :id",
        &[(":id", &id)],
    )?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, date, description, category FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL CHECK (amount > 0),
                date TEXT NOT NULL,
                description TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT
                )",
        (),
    )?;

    // Used by the transaction list, which is sorted by date.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_date ON \"transaction\"(date);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let amount = row.get(1)?;
    let date = row.get(2)?;
    let description = row.get(3)?;
    let category = row.get(4)?;

    Ok(Transaction {
        id,
        amount,
        date,
        description,
        category,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod new_transaction_tests {
    use time::macros::date;

    use crate::{Category, Error, NewTransaction};

    #[test]
    fn new_trims_description() {
        let transaction =
            NewTransaction::new(1.0, date!(2024 - 01 - 05), "  Lunch \n", Category::Food)
                .unwrap();

        assert_eq!(transaction.description(), "Lunch");
    }

    #[test]
    fn new_fails_on_zero_amount() {
        let result = NewTransaction::new(0.0, date!(2024 - 01 - 05), "Lunch", Category::Food);

        assert_eq!(result, Err(Error::NonPositiveAmount(0.0)));
    }

    #[test]
    fn new_fails_on_negative_amount() {
        let result = NewTransaction::new(-5.0, date!(2024 - 01 - 05), "Lunch", Category::Food);

        assert_eq!(result, Err(Error::NonPositiveAmount(-5.0)));
    }

    #[test]
    fn new_fails_on_nan_amount() {
        let result = NewTransaction::new(f64::NAN, date!(2024 - 01 - 05), "Lunch", Category::Food);

        assert!(matches!(result, Err(Error::NonPositiveAmount(_))));
    }

    #[test]
    fn new_fails_on_amount_above_max() {
        let result = NewTransaction::new(1e308, date!(2024 - 01 - 05), "Lunch", Category::Food);

        assert_eq!(result, Err(Error::AmountTooLarge(1e308)));
    }

    #[test]
    fn new_fails_on_blank_description() {
        let result = NewTransaction::new(1.0, date!(2024 - 01 - 05), " \t", Category::Food);

        assert_eq!(result, Err(Error::EmptyDescription));
    }
}
