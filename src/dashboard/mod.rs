//! Dashboard module
//!
//! Summarises spending per month and category and compares it against the
//! monthly budgets.

mod aggregation;
mod handlers;

pub use aggregation::{
    BudgetComparison, BudgetUsage, CategoryShare, CategoryTotal, MonthlyTotal, budget_comparison,
    category_share, most_recent, top_category, totals_by_category, totals_by_month,
    transactions_in_month,
};
pub use handlers::{DashboardSummary, get_summary_endpoint};
