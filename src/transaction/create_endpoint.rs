//! Defines the endpoint for creating a new transaction.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::{
    Error,
    transaction::{Transaction, TransactionForm, TransactionState, core::create_transaction},
};

/// A route handler for creating a new transaction, responds with the created transaction.
pub async fn create_transaction_endpoint(
    State(state): State<TransactionState>,
    form: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Json(form) = form.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let transaction = form.validate()?;

    let connection = state.connection()?;

    let transaction = create_transaction(transaction, &connection)
        .inspect_err(|error| tracing::error!("could not create transaction: {error}"))?;

    tracing::info!("created transaction {}", transaction.id);

    Ok(Json(transaction))
}
