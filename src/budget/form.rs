//! The request body used to set a budget.

use serde::{Deserialize, Serialize};

use crate::{Category, Error, NewBudget, YearMonth};

/// The JSON body for creating or updating a budget.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct BudgetForm {
    /// The name of the category, e.g. "Food".
    pub category: Option<String>,
    /// The budget for the month in dollars.
    pub amount: Option<f64>,
    /// The month in the format "YYYY-MM".
    pub month: Option<String>,
}

impl BudgetForm {
    /// Check the form against the budget schema.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if a field is absent or an empty string,
    /// - [Error::InvalidCategory] if the category is not known,
    /// - [Error::InvalidMonth] if the month is not in the format "YYYY-MM",
    /// - or any error from [NewBudget::new].
    pub fn validate(self) -> Result<NewBudget, Error> {
        let category = match self.category {
            Some(category) if !category.trim().is_empty() => category,
            _ => return Err(Error::MissingField("category")),
        };
        let amount = self.amount.ok_or(Error::MissingField("amount"))?;
        let month = match self.month {
            Some(month) if !month.trim().is_empty() => month,
            _ => return Err(Error::MissingField("month")),
        };

        let category: Category = category.parse()?;
        let month: YearMonth = month.trim().parse()?;

        NewBudget::new(category, amount, month)
    }
}
