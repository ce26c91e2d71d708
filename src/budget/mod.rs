//! Monthly spending budgets per category.

mod core;
mod endpoints;
mod form;

pub use core::{Budget, NewBudget, create_budget_table, get_all_budgets, upsert_budget};
pub use endpoints::{get_budgets_endpoint, set_budget_endpoint};
pub use form::BudgetForm;
