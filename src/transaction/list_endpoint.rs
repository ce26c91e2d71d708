//! Defines the endpoint for listing transactions.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

use crate::{
    Error,
    transaction::{
        Transaction, TransactionState, core::get_all_transactions, query::TransactionQuery,
    },
};

/// A route handler for listing transactions, most recent first.
///
/// The optional `search`, `category` and `sort` query parameters filter and
/// reorder the list, see [TransactionQuery].
pub async fn get_transactions_endpoint(
    State(state): State<TransactionState>,
    query: Result<Query<TransactionQuery>, QueryRejection>,
) -> Result<Json<Vec<Transaction>>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.connection()?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;

    Ok(Json(query.apply(transactions)?))
}
