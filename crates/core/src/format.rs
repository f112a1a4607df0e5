//! Display formatting for money and dates, US locale.
//!
//! Pure functions, no locale tables at runtime. Money goes through
//! [`Decimal`] so cents stay exact; `f64` only enters via the explicitly
//! lossy [`format_currency_f64`].

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use thiserror::Error;

/// Formatting failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// Input matched none of the accepted date shapes.
    #[error("unrecognized date: {0}")]
    UnrecognizedDate(String),

    /// Input was not a finite number.
    #[error("amount is not a finite number")]
    NonFiniteAmount,
}

/// Format a USD amount: dollar sign, thousands separators, two decimals.
///
/// `1234.5` renders as `$1,234.50`, zero as `$0.00`, negative amounts as
/// `-$1,234.50`. Sub-cent precision is rounded half-to-even.
#[must_use]
pub fn format_currency(amount: Decimal) -> String {
    let rounded = amount.round_dp(2).abs();
    let text = format!("{rounded:.2}");
    let (dollars, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${}.{cents}", group_thousands(dollars))
}

/// [`format_currency`] for amounts that arrive as floats.
///
/// # Errors
///
/// Returns [`FormatError::NonFiniteAmount`] for NaN or infinite input.
pub fn format_currency_f64(amount: f64) -> Result<String, FormatError> {
    let decimal = Decimal::from_f64(amount).ok_or(FormatError::NonFiniteAmount)?;
    Ok(format_currency(decimal))
}

/// Format an ISO-ish date string as `Mar 5, 2024`.
///
/// Accepts a bare date (`2024-03-05`), an RFC 3339 date-time, or a
/// date-time without offset (`2024-03-05T14:30:00`, the shape server
/// timestamps serialize to). Only the date part is shown.
///
/// # Errors
///
/// Returns [`FormatError::UnrecognizedDate`] when the input matches none
/// of the accepted shapes.
pub fn format_date(input: &str) -> Result<String, FormatError> {
    let date = parse_date(input)?;
    Ok(date.format("%b %-d, %Y").to_string())
}

fn parse_date(input: &str) -> Result<NaiveDate, FormatError> {
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
        return Ok(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(datetime.date());
    }
    Err(FormatError::UnrecognizedDate(input.to_string()))
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
