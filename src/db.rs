//! Creates the application's database schema.

use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{Error, budget::create_budget_table, transaction::create_transaction_table};

/// Create the tables for the domain models if they do not already exist.
///
/// All tables are created inside a single exclusive SQL transaction so that a
/// failure leaves the database untouched.
///
/// # Errors
/// Returns an [Error::SqlError] if a table cannot be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_budget_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}

/// Lock the shared database connection.
///
/// # Errors
/// Returns an [Error::DatabaseLockError] if the lock is poisoned.
pub(crate) fn lock_connection(
    db_connection: &Mutex<Connection>,
) -> Result<MutexGuard<'_, Connection>, Error> {
    db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}
