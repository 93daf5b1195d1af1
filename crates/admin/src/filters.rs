//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use finprod_core::dates;

/// Returns the current year.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Local::now().year())
}

/// Render an ISO date (`YYYY-MM-DD`) as `DD/MM/YYYY`.
///
/// Values that do not parse are shown unchanged.
///
/// Usage in templates: `{{ product.date_release|display_date }}`
#[askama::filter_fn]
pub fn display_date(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(reformat(&value.to_string()))
}

fn reformat(raw: &str) -> String {
    dates::parse_date(raw).map_or_else(|_| raw.to_string(), dates::format_display_date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reformat_iso_date() {
        assert_eq!(reformat("2025-03-09"), "09/03/2025");
        assert_eq!(reformat("2025-03-09T00:00:00.000+00:00"), "09/03/2025");
    }

    #[test]
    fn test_reformat_passes_through_garbage() {
        assert_eq!(reformat("soon"), "soon");
        assert_eq!(reformat(""), "");
    }
}
