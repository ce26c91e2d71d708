//! Application router configuration.

use axum::{
    Router,
    routing::{get, put},
};

use crate::{
    AppState,
    budget::{get_budgets_endpoint, set_budget_endpoint},
    dashboard::get_summary_endpoint,
    endpoints,
    not_found::get_404_not_found,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, edit_transaction_endpoint,
        get_transactions_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(get_transactions_endpoint).post(create_transaction_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::BUDGETS,
            get(get_budgets_endpoint).post(set_budget_endpoint),
        )
        .route(endpoints::SUMMARY, get(get_summary_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}
