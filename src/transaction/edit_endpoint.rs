//! Defines the endpoint for replacing the fields of a transaction.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{Transaction, TransactionForm, TransactionState, core::update_transaction},
};

/// A route handler for editing a transaction, responds with the updated transaction.
///
/// The body is validated before the database is touched, so an invalid body
/// for an unknown ID is a 400 rather than a 404.
pub async fn edit_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
    form: Result<Json<TransactionForm>, JsonRejection>,
) -> Result<Json<Transaction>, Error> {
    let Path(transaction_id) =
        transaction_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let Json(form) = form.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let transaction = form.validate()?;

    let connection = state.connection()?;

    let transaction = update_transaction(transaction_id, transaction, &connection)
        .inspect_err(|error| match error {
            Error::NotFound => {
                tracing::debug!("tried to update missing transaction {transaction_id}")
            }
            error => tracing::error!("could not update transaction {transaction_id}: {error}"),
        })?;

    tracing::info!("updated transaction {transaction_id}");

    Ok(Json(transaction))
}
