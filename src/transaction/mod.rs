//! Transaction management for the budgeting application.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and `NewTransaction` for validated, unsaved transactions
//! - Database functions for storing, querying, and managing transactions
//! - JSON route handlers for listing, creating, editing and deleting transactions

mod core;
mod create_endpoint;
mod delete_endpoint;
mod edit_endpoint;
mod form;
mod list_endpoint;
mod query;
mod state;

pub use core::{
    NewTransaction, Transaction, create_transaction, create_transaction_table,
    get_all_transactions,
};
pub use create_endpoint::create_transaction_endpoint;
pub use delete_endpoint::delete_transaction_endpoint;
pub use edit_endpoint::edit_transaction_endpoint;
pub use form::TransactionForm;
pub use list_endpoint::get_transactions_endpoint;
pub use state::TransactionState;

#[cfg(test)]
pub use core::{count_transactions, delete_transaction, get_transaction, update_transaction};
