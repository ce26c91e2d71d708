//! The state shared by the transaction endpoints.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{AppState, Error, db::lock_connection};

/// The state needed to list, create, edit or delete transactions.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

impl TransactionState {
    /// Lock the database connection.
    ///
    /// # Errors
    /// Returns an [Error::DatabaseLockError] if the lock is poisoned.
    pub(crate) fn connection(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        lock_connection(&self.db_connection)
    }
}
