//! Route handlers for listing and setting budgets.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    budget::{Budget, BudgetForm, get_all_budgets, upsert_budget},
    db::lock_connection,
};

/// The state needed to list or set budgets.
#[derive(Debug, Clone)]
pub struct BudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for listing every budget, most recent month first.
pub async fn get_budgets_endpoint(
    State(state): State<BudgetState>,
) -> Result<Json<Vec<Budget>>, Error> {
    let connection = lock_connection(&state.db_connection)?;

    let budgets = get_all_budgets(&connection)
        .inspect_err(|error| tracing::error!("could not get budgets: {error}"))?;

    Ok(Json(budgets))
}

/// A route handler for setting the budget of a category for a month.
///
/// Responds with the created budget, or the existing budget with its amount
/// replaced if the category already has a budget for that month.
pub async fn set_budget_endpoint(
    State(state): State<BudgetState>,
    form: Result<Json<BudgetForm>, JsonRejection>,
) -> Result<Json<Budget>, Error> {
    let Json(form) = form.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;
    let budget = form.validate()?;

    let connection = lock_connection(&state.db_connection)?;

    let budget = upsert_budget(budget, &connection)
        .inspect_err(|error| tracing::error!("could not save budget: {error}"))?;

    tracing::info!(
        "set {} budget for {} to {:.2}",
        budget.category,
        budget.month,
        budget.amount
    );

    Ok(Json(budget))
}
