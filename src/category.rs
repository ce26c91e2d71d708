//! The fixed set of spending categories.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A spending category, e.g. "Food" or "Rent".
///
/// Categories are serialized as their display name both in JSON and in the
/// database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, eating out, etc.
    Food,
    /// Rent or mortgage payments.
    Rent,
    /// Public transport, fuel, parking, etc.
    Transportation,
    /// Power, water, internet, phone.
    Utilities,
    /// Movies, games, concerts, etc.
    Entertainment,
    /// Clothes and other purchases.
    Shopping,
    /// Doctors, pharmacies, insurance.
    Healthcare,
    /// Courses, books, tuition.
    Education,
    /// Flights, accommodation.
    Travel,
    /// Anything that does not fit another category.
    Other,
}

impl Category {
    /// Every category, in the order they are presented to users.
    pub const ALL: [Category; 10] = [
        Category::Food,
        Category::Rent,
        Category::Transportation,
        Category::Utilities,
        Category::Entertainment,
        Category::Shopping,
        Category::Healthcare,
        Category::Education,
        Category::Travel,
        Category::Other,
    ];

    /// The name of the category as shown to users and stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Transportation => "Transportation",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Shopping => "Shopping",
            Category::Healthcare => "Healthcare",
            Category::Education => "Education",
            Category::Travel => "Travel",
            Category::Other => "Other",
        }
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its name.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidCategory] if `s` is not the name of a category.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s.trim())
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use crate::{Category, Error};

    #[test]
    fn parses_every_category_name() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>(), Ok(category));
        }
    }

    #[test]
    fn parse_ignores_surrounding_whitespace() {
        assert_eq!(" Food\n".parse::<Category>(), Ok(Category::Food));
    }

    #[test]
    fn parse_fails_on_unknown_name() {
        assert_eq!(
            "Yachts".parse::<Category>(),
            Err(Error::InvalidCategory("Yachts".to_owned()))
        );
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert!("food".parse::<Category>().is_err());
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Healthcare).unwrap();

        assert_eq!(json, "\"Healthcare\"");
    }
}
