//! Display helpers for the presentation boundary. Nothing in this crate
//! aggregates formatted strings; these are only applied to final values.

use rust_decimal::{Decimal, RoundingStrategy};
use std::time::Duration;

fn currency_symbol(code: &str) -> Option<&'static str> {
    match code.to_ascii_uppercase().as_str() {
        "USD" => Some("$"),
        "EUR" => Some("€"),
        "GBP" => Some("£"),
        "JPY" => Some("¥"),
        _ => None,
    }
}

/// Formats an amount with two decimals and thousands separators,
/// e.g. `-$1,234.50`. Unknown currency codes are written as a prefix.
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };

    let digits = format!("{:.2}", rounded.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match currency_symbol(currency) {
        Some(symbol) => format!("{sign}{symbol}{grouped}.{fraction}"),
        None => format!("{sign}{} {grouped}.{fraction}", currency.to_ascii_uppercase()),
    }
}

/// Formats a percentage with two decimals, e.g. `12.35%`.
pub fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let rounded = if rounded.is_zero() { Decimal::ZERO } else { rounded };
    format!("{:.2}%", rounded)
}

/// Formats a duration as `H:MM:SS`.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn currency_grouping_and_sign() {
        assert_eq!(format_currency(dec!(100000), "USD"), "$100,000.00");
        assert_eq!(format_currency(dec!(-1234.5), "usd"), "-$1,234.50");
        assert_eq!(format_currency(dec!(999.999), "EUR"), "€1,000.00");
        assert_eq!(format_currency(dec!(12.345), "CHF"), "CHF 12.35");
        assert_eq!(format_currency(dec!(-0.001), "USD"), "$0.00");
    }

    #[test]
    fn percentages() {
        assert_eq!(format_percentage(dec!(50)), "50.00%");
        assert_eq!(format_percentage(dec!(-11.4949)), "-11.49%");
        assert_eq!(format_percentage(dec!(33.333333)), "33.33%");
    }

    #[test]
    fn hms() {
        assert_eq!(format_hms(Duration::from_secs(18 * 60)), "0:18:00");
        assert_eq!(format_hms(Duration::from_secs(4530)), "1:15:30");
    }
}
