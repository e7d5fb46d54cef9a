//! Field normalization: raw CSV cell text to typed column values.
//!
//! None of these functions fail. A value that cannot be interpreted becomes `None` and is
//! written as NULL.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Currency symbols removed from amount cells before parsing.
const CURRENCY_SYMBOLS: &[char] = &['₱', '$', '€', '£', '¥', '₹', '₩'];

/// Parse a currency-formatted amount such as `"₱1,250.50"` or `" $ 3,000 "`.
///
/// Absent, blank or non-numeric input yields `None`. Currency symbols, thousands
/// separators and any whitespace are removed before parsing; exponent notation is
/// accepted. A number outside the range `Decimal` can hold also yields `None`.
pub fn clean_amount(value: Option<&str>) -> Option<Decimal> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        return None;
    }

    let cleaned: String = trimmed
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && *c != ',' && !c.is_whitespace())
        .collect();

    let numeric = !cleaned.is_empty()
        && cleaned
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if !numeric {
        return None;
    }

    Decimal::from_str(&cleaned)
        .or_else(|_| Decimal::from_scientific(&cleaned))
        .ok()
}

/// Trim a date cell; blank or absent becomes `None`.
///
/// The text itself is not validated here. The destination parses it as a `date` during
/// the bulk write and rejects the whole batch if it cannot.
pub fn clean_date(value: Option<&str>) -> Option<String> {
    non_blank(value)
}

/// Trim a text cell. Absent columns become `None`; a present but blank cell stays an
/// empty string.
pub fn clean_text(value: Option<&str>) -> Option<String> {
    value.map(|v| v.trim().to_string())
}

/// Trim a text cell; blank or absent becomes `None`.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
