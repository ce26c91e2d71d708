//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - The route handler for the dashboard summary
//! - The summary type returned to clients and the function that builds it
//! - State and query types used by the handler

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State, rejection::QueryRejection},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Budget, Error, Transaction, YearMonth,
    budget::get_all_budgets,
    dashboard::aggregation::{
        BudgetComparison, CategoryShare, CategoryTotal, MonthlyTotal, budget_comparison,
        category_share, most_recent, top_category, totals_by_month, transactions_in_month,
    },
    db::lock_connection,
    timezone::local_today,
    transaction::get_all_transactions,
};

/// The state needed for building the dashboard summary.
///
/// Contains the database connection and timezone information required
/// by dashboard handlers.
#[derive(Debug, Clone)]
pub struct SummaryState {
    /// The database connection for reading transactions and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for SummaryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// The query string for the summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// The month to summarise as "YYYY-MM". Defaults to the current month.
    pub month: Option<String>,
}

/// An overview of spending for one month, plus recent history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// The month the summary was built for.
    pub month: YearMonth,
    /// The total amount spent in `month`.
    pub total_spent: f64,
    /// The number of transactions in `month`.
    pub transaction_count: usize,
    /// The category with the most spending in `month`.
    pub top_category: Option<CategoryTotal>,
    /// The latest transaction out of all transactions.
    pub most_recent: Option<Transaction>,
    /// Totals for the most recent months with transactions.
    pub monthly_totals: Vec<MonthlyTotal>,
    /// How spending in `month` was split between categories.
    pub category_share: Vec<CategoryShare>,
    /// The budgets for `month` compared against spending.
    pub budget_comparison: BudgetComparison,
}

/// A route handler for the dashboard summary of a month.
///
/// Summarises the current month in the server's timezone unless the `month`
/// query parameter is given.
pub async fn get_summary_endpoint(
    State(state): State<SummaryState>,
    query: Result<Query<SummaryQuery>, QueryRejection>,
) -> Result<Json<DashboardSummary>, Error> {
    let Query(query) = query.map_err(|rejection| Error::InvalidRequest(rejection.body_text()))?;

    let month = match query.month {
        Some(month) => month.parse::<YearMonth>()?,
        None => YearMonth::from(local_today(&state.local_timezone)?),
    };

    let connection = lock_connection(&state.db_connection)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("could not get transactions: {error}"))?;
    let budgets = get_all_budgets(&connection)
        .inspect_err(|error| tracing::error!("could not get budgets: {error}"))?;

    Ok(Json(build_summary(&transactions, &budgets, month)))
}

/// Builds the dashboard summary for `month`.
///
/// # Arguments
/// * `transactions` - Every transaction, in any order
/// * `budgets` - Every budget, in any order
/// * `month` - The month to summarise
fn build_summary(
    transactions: &[Transaction],
    budgets: &[Budget],
    month: YearMonth,
) -> DashboardSummary {
    let month_transactions = transactions_in_month(transactions, month);

    DashboardSummary {
        month,
        total_spent: month_transactions.iter().map(|t| t.amount).sum(),
        transaction_count: month_transactions.len(),
        top_category: top_category(&month_transactions),
        most_recent: most_recent(transactions).cloned(),
        monthly_totals: totals_by_month(transactions),
        category_share: category_share(&month_transactions),
        budget_comparison: budget_comparison(&month_transactions, budgets, month),
    }
}
