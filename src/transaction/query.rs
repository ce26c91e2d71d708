//! Filtering and sorting options for the transaction list.

use serde::{Deserialize, Serialize};

use crate::{Category, Error, Transaction};

/// The order of the transaction list.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSort {
    /// Most recent first.
    #[default]
    Date,
    /// Largest amount first.
    Amount,
    /// Alphabetical by category name.
    Category,
}

/// The query string for the transaction list.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Only keep transactions whose description contains this text, ignoring case.
    pub search: Option<String>,
    /// Only keep transactions in this category. "all" keeps every category.
    pub category: Option<String>,
    /// The order of the list. Defaults to [TransactionSort::Date].
    pub sort: Option<TransactionSort>,
}

impl TransactionQuery {
    /// Filter and sort `transactions`.
    ///
    /// `transactions` must already be ordered by date, most recent first.
    /// Sorting is stable, so transactions that compare equal stay in date
    /// order.
    ///
    /// # Errors
    /// Returns an [Error::InvalidCategory] if the category filter is not a known category.
    pub fn apply(&self, transactions: Vec<Transaction>) -> Result<Vec<Transaction>, Error> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(name) => Some(name.parse::<Category>()?),
        };
        let search = self
            .search
            .as_deref()
            .map(|text| text.trim().to_lowercase())
            .filter(|text| !text.is_empty());

        let mut transactions: Vec<Transaction> = transactions
            .into_iter()
            .filter(|transaction| category.is_none_or(|category| transaction.category == category))
            .filter(|transaction| {
                search.as_ref().is_none_or(|search| {
                    transaction.description.to_lowercase().contains(search.as_str())
                })
            })
            .collect();

        match self.sort.unwrap_or_default() {
            TransactionSort::Date => {}
            TransactionSort::Amount => {
                transactions.sort_by(|a, b| b.amount.total_cmp(&a.amount));
            }
            TransactionSort::Category => {
                transactions.sort_by(|a, b| a.category.as_str().cmp(b.category.as_str()));
            }
        }

        Ok(transactions)
    }
}
