//! Ledgerlight is a small web service for tracking personal spending.
//!
//! This library provides a JSON REST API for recording transactions, setting
//! monthly budgets per category and summarising spending for a dashboard.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod amount;
mod app_state;
mod budget;
mod category;
mod dashboard;
mod database_id;
mod db;
pub mod endpoints;
mod logging;
mod month;
mod not_found;
mod routing;
mod timezone;
mod transaction;

#[cfg(test)]
mod test_utils;

pub use amount::MAX_AMOUNT;
pub use app_state::AppState;
pub use budget::{Budget, NewBudget, upsert_budget};
pub use category::Category;
pub use dashboard::{
    BudgetComparison, BudgetUsage, CategoryShare, CategoryTotal, DashboardSummary, MonthlyTotal,
    budget_comparison, category_share, most_recent, top_category, totals_by_category,
    totals_by_month, transactions_in_month,
};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use month::YearMonth;
pub use routing::build_router;
pub use timezone::get_local_offset;
pub use transaction::{NewTransaction, Transaction, create_transaction};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A required field was missing from the request body.
    #[error("missing required field \"{0}\"")]
    MissingField(&'static str),

    /// An amount of zero or less was used for a transaction or budget.
    #[error("amount must be greater than 0, got {0}")]
    NonPositiveAmount(f64),

    /// An amount larger than [MAX_AMOUNT] was used for a transaction or budget.
    #[error("amount must be at most {max}, got {0}", max = MAX_AMOUNT)]
    AmountTooLarge(f64),

    /// A description that is empty after trimming whitespace.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// The category is not one of the known categories.
    #[error("\"{0}\" is not a valid category")]
    InvalidCategory(String),

    /// The month key was not in the format "YYYY-MM".
    #[error("\"{0}\" is not a valid month, expected the format YYYY-MM")]
    InvalidMonth(String),

    /// The date was not an ISO-8601 calendar date ("YYYY-MM-DD").
    #[error("\"{0}\" is not a valid date, expected the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The request body or path could not be parsed.
    ///
    /// Callers should pass in the rejection message from the extractor.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// The response body could not be read back for logging.
    #[error("could not read the response body: {0}")]
    ResponseBodyError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl Error {
    /// Whether the error was caused by the caller supplying bad input.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Error::MissingField(_)
                | Error::NonPositiveAmount(_)
                | Error::AmountTooLarge(_)
                | Error::EmptyDescription
                | Error::InvalidCategory(_)
                | Error::InvalidMonth(_)
                | Error::InvalidDate(_)
                | Error::InvalidRequest(_)
        )
    }
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => not_found::get_404_not_found_response(),
            error if error.is_validation_error() => {
                error_response(StatusCode::BAD_REQUEST, &error.to_string())
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                error_response(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An unexpected error occurred, check the server logs for more details.",
                )
            }
        }
    }
}

/// Create a JSON response of the form `{"error": message}`.
pub(crate) fn error_response(status_code: StatusCode, message: &str) -> Response {
    (status_code, Json(json!({ "error": message }))).into_response()
}
