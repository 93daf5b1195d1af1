//! Calendar date parsing and formatting.
//!
//! The product API stores release and revision dates as plain calendar
//! dates. Depending on the backend version they come back either as
//! `YYYY-MM-DD` or as a full timestamp such as
//! `2025-01-01T00:00:00.000+00:00`. Only the calendar part is meaningful, so
//! the date is taken verbatim from the first ten characters without any
//! timezone conversion.

use chrono::NaiveDate;

/// Wire and form format for dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format used in the listing table.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Errors that can occur when parsing a date.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// The input string is empty.
    #[error("date cannot be empty")]
    Empty,
    /// The input is not a `YYYY-MM-DD` date.
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

/// Parse a calendar date from `YYYY-MM-DD` or an ISO-8601 timestamp.
///
/// # Errors
///
/// Returns [`DateError::Empty`] for blank input and [`DateError::Invalid`]
/// when the leading date part does not parse.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateError> {
    let s = s.trim();
    if s.is_empty() {
        return Err(DateError::Empty);
    }

    let date_part = match s.char_indices().nth(10) {
        Some((idx, 'T' | ' ')) => s.get(..idx).unwrap_or(s),
        _ => s,
    };

    NaiveDate::parse_from_str(date_part, DATE_FORMAT)
        .map_err(|_| DateError::Invalid(s.to_string()))
}

/// Format a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Format a date as `DD/MM/YYYY` for display.
#[must_use]
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Serde adapter for product dates.
///
/// Serializes as `YYYY-MM-DD` and deserializes with [`parse_date`].
pub mod api_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    /// Serialize a date as `YYYY-MM-DD`.
    ///
    /// # Errors
    ///
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    /// Deserialize a date from `YYYY-MM-DD` or an ISO-8601 timestamp.
    ///
    /// # Errors
    ///
    /// Fails when the value is not a string or does not parse as a date.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(D::Error::custom)
    }
}
