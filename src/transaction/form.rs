//! The request body used to create or edit a transaction.

use serde::{Deserialize, Serialize};
use time::{Date, macros::format_description};

use crate::{Category, Error, NewTransaction};

/// The JSON body for creating or editing a transaction.
///
/// Every field is optional at the parsing stage so that a missing field is
/// reported as a validation error rather than a generic parse failure.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionForm {
    /// The value of the transaction in dollars.
    pub amount: Option<f64>,
    /// The date when the transaction ocurred, e.g. "2024-01-31".
    pub date: Option<String>,
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The name of the category, e.g. "Food".
    pub category: Option<String>,
}

impl TransactionForm {
    /// Check the form against the transaction schema.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingField] if a field is absent or an empty string,
    /// - [Error::InvalidDate] if the date is not an ISO-8601 date,
    /// - [Error::InvalidCategory] if the category is not known,
    /// - or any error from [NewTransaction::new].
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let amount = self.amount.ok_or(Error::MissingField("amount"))?;
        let date = required_text(self.date, "date")?;
        let description = required_text(self.description, "description")?;
        let category = required_text(self.category, "category")?;

        let date = parse_date(&date)?;
        let category: Category = category.parse()?;

        NewTransaction::new(amount, date, &description, category)
    }
}

fn required_text(value: Option<String>, field: &'static str) -> Result<String, Error> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(text),
        _ => Err(Error::MissingField(field)),
    }
}

/// Parse an ISO-8601 calendar date, e.g. "2024-01-31".
///
/// A full timestamp such as "2024-01-31T10:00:00Z" is also accepted and
/// truncated to its date.
fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();
    let date_part = text.split_once('T').map_or(text, |(date, _)| date);

    Date::parse(date_part, format_description!("[year]-[month]-[day]")).map_err(|error| {
        tracing::debug!("could not parse date {text:?}: {error}");
        Error::InvalidDate(text.to_owned())
    })
}
