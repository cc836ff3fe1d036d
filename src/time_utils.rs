use chrono::NaiveDate;

use crate::domain::errors::{AppError, ValidationResult};

pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date as used by every series and the timeline.
pub fn parse_iso_date(text: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), ISO_DATE_FORMAT)
        .map_err(|e| AppError::ValidationError(format!("invalid date '{}': {}", text, e)))
}

/// Timeline label, e.g. `Jan 3, 2024`
pub fn format_date_label(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

/// Fixed-decimal number, `-` for missing or non-finite values
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
        _ => "-".to_string(),
    }
}

/// Amount prefixed with the currency symbol when one is known
pub fn format_currency(value: Option<f64>, currency: &str) -> String {
    let symbol = match currency {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        _ => "",
    };
    match value {
        Some(v) if v.is_finite() => format!("{}{}", symbol, format_number(Some(v), 2)),
        _ => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_labels_dates() {
        let date = parse_iso_date("2024-01-03").unwrap();
        assert_eq!(format_date_label(date), "Jan 3, 2024");
        assert!(parse_iso_date("03/01/2024").is_err());
    }

    #[test]
    fn formats_numbers() {
        assert_eq!(format_number(Some(145.775), 1), "145.8");
        assert_eq!(format_number(None, 2), "-");
        assert_eq!(format_number(Some(f64::NAN), 2), "-");
        assert_eq!(format_currency(Some(5.5), "USD"), "$5.50");
        assert_eq!(format_currency(Some(0.75), "CHF"), "0.75");
    }
}
