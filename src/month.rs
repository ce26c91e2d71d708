//! Calendar month keys in the format "YYYY-MM".

use std::{cmp::Ordering, fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::{Date, Month};

use crate::Error;

/// A calendar month, e.g. January 2024.
///
/// Serialized as "YYYY-MM" so that the lexical order of the serialized keys
/// matches their chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearMonth {
    year: i32,
    month: Month,
}

impl YearMonth {
    /// The year of the month key.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month of the year.
    pub fn month(&self) -> Month {
        self.month
    }

    /// A short label for charts, e.g. "Jan 2024".
    pub fn label(&self) -> String {
        let month = match self.month {
            Month::January => "Jan",
            Month::February => "Feb",
            Month::March => "Mar",
            Month::April => "Apr",
            Month::May => "May",
            Month::June => "Jun",
            Month::July => "Jul",
            Month::August => "Aug",
            Month::September => "Sep",
            Month::October => "Oct",
            Month::November => "Nov",
            Month::December => "Dec",
        };

        format!("{month} {}", self.year)
    }

    /// Whether `date` falls within this month.
    pub fn contains(&self, date: Date) -> bool {
        date.year() == self.year && date.month() == self.month
    }
}

impl Ord for YearMonth {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month as u8).cmp(&(other.year, other.month as u8))
    }
}

impl PartialOrd for YearMonth {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<Date> for YearMonth {
    /// Truncate a date to its month.
    fn from(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl FromStr for YearMonth {
    type Err = Error;

    /// Parse a month key in the format "YYYY-MM".
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidMonth] if `s` is not a four digit year and a
    /// two digit month between 01 and 12 separated by a hyphen.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidMonth(s.to_owned());

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;

        if year.len() != 4
            || month.len() != 2
            || !year.chars().chain(month.chars()).all(|c| c.is_ascii_digit())
        {
            return Err(invalid());
        }

        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;

        Ok(Self { year, month })
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month as u8)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(serde::de::Error::custom)
    }
}

impl ToSql for YearMonth {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.to_string()))
    }
}

impl FromSql for YearMonth {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{Error, YearMonth};

    #[test]
    fn parses_valid_month() {
        let month: YearMonth = "2024-01".parse().unwrap();

        assert_eq!(month.year(), 2024);
        assert_eq!(month.month(), Month::January);
    }

    #[test]
    fn display_round_trips() {
        let month: YearMonth = "0999-12".parse().unwrap();

        assert_eq!(month.to_string(), "0999-12");
    }

    #[test]
    fn rejects_malformed_months() {
        for text in ["2024-13", "2024-00", "2024-1", "24-01", "2024/01", "", "2024-01-05", "abcd-ef"] {
            assert_eq!(
                text.parse::<YearMonth>(),
                Err(Error::InvalidMonth(text.to_owned())),
                "want {text:?} to be rejected"
            );
        }
    }

    #[test]
    fn orders_chronologically() {
        let december: YearMonth = "2023-12".parse().unwrap();
        let january: YearMonth = "2024-01".parse().unwrap();
        let february: YearMonth = "2024-02".parse().unwrap();

        assert!(december < january);
        assert!(january < february);
    }

    #[test]
    fn truncates_date_to_month() {
        let month = YearMonth::from(date!(2024 - 03 - 31));

        assert_eq!(month.to_string(), "2024-03");
        assert!(month.contains(date!(2024 - 03 - 01)));
        assert!(!month.contains(date!(2024 - 04 - 01)));
        assert!(!month.contains(date!(2023 - 03 - 15)));
    }

    #[test]
    fn label_uses_short_month_name() {
        let month: YearMonth = "2024-09".parse().unwrap();

        assert_eq!(month.label(), "Sep 2024");
    }

    #[test]
    fn serializes_as_string() {
        let month: YearMonth = "2024-05".parse().unwrap();

        assert_eq!(serde_json::to_string(&month).unwrap(), "\"2024-05\"");
        assert_eq!(
            serde_json::from_str::<YearMonth>("\"2024-05\"").unwrap(),
            month
        );
    }
}
