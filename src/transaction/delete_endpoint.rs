use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    database_id::TransactionId,
    transaction::{TransactionState, core::delete_transaction},
};

/// The body of a successful delete response.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// A human readable confirmation.
    pub message: String,
}

/// A route handler for deleting a transaction, responds with a confirmation message.
pub async fn delete_transaction_endpoint(
    State(state): State<TransactionState>,
    transaction_id: Result<Path<TransactionId>, PathRejection>,
) -> Result<Json<DeleteConfirmation>, Error> {
    let Path(transaction_id) =
        transaction_id.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let connection = state.connection()?;

    delete_transaction(transaction_id, &connection).inspect_err(|error| match error {
        Error::NotFound => {
            tracing::debug!("tried to delete missing transaction {transaction_id}")
        }
        error => tracing::error!("could not delete transaction {transaction_id}: {error}"),
    })?;

    tracing::info!("deleted transaction {transaction_id}");

    Ok(Json(DeleteConfirmation {
        message: "Transaction deleted successfully".to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use time::macros::date;

    use crate::{
        Category, Error, NewTransaction,
        test_utils::{assert_status, must_create_shared_connection, response_json},
        transaction::{
            TransactionState, count_transactions, create_transaction,
            delete_endpoint::DeleteConfirmation, delete_transaction_endpoint, get_transaction,
        },
    };

    #[tokio::test]
    async fn deletes_transaction() {
        let state = TransactionState {
            db_connection: must_create_shared_connection(),
        };
        let transaction = create_transaction(
            NewTransaction::new(1.23, date!(2025 - 10 - 26), "Test", Category::Other).unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = delete_transaction_endpoint(State(state.clone()), Ok(Path(transaction.id)))
            .await
            .into_response();

        assert_status(&response, StatusCode::OK);
        let confirmation: DeleteConfirmation = response_json(response).await;
        assert_eq!(confirmation.message, "Transaction deleted successfully");
        assert_eq!(
            get_transaction(transaction.id, &state.db_connection.lock().unwrap()),
            Err(Error::NotFound)
        )
    }

    #[tokio::test]
    async fn delete_missing_transaction_is_not_found() {
        let state = TransactionState {
            db_connection: must_create_shared_connection(),
        };
        create_transaction(
            NewTransaction::new(1.23, date!(2025 - 10 - 26), "Test", Category::Other).unwrap(),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = delete_transaction_endpoint(State(state.clone()), Ok(Path(99)))
            .await
            .into_response();

        assert_status(&response, StatusCode::NOT_FOUND);
        assert_eq!(
            count_transactions(&state.db_connection.lock().unwrap()),
            Ok(1)
        );
    }
}
