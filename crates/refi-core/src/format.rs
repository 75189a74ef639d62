//! Display helpers for front ends: currency, percentages and the live
//! thousands-separator mask applied to loan amount inputs.
//!
//! The engine never calls these; figures are rounded only when shown.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Years};

/// Parse a loan amount typed with grouping commas ("1,250,000").
/// Blank or malformed text yields `None`.
pub fn parse_amount(text: &str) -> Option<Money> {
    let cleaned: String = text.chars().filter(|c| *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(cleaned).ok()
}

/// Insert a comma every three digits of the integer part of a plain number
/// string. A leading '-' and any fractional part are preserved.
pub fn group_thousands(number: &str) -> String {
    let (sign, unsigned) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (int_part, frac_part) = match unsigned.find('.') {
        Some(idx) => unsigned.split_at(idx),
        None => (unsigned, ""),
    };

    let len = int_part.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}{grouped}{frac_part}")
}

/// Re-mask a loan amount field as the user types: drop everything except
/// digits and '.', keep only the integer part, then group thousands.
pub fn format_amount_input(text: &str) -> String {
    let kept: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let integer_part = kept.split('.').next().unwrap_or_default();
    group_thousands(integer_part)
}

/// Round to whole currency units, halves rounding up (2.5 -> 3, -2.5 -> -2).
pub fn round_to_unit(amount: Money) -> Money {
    (amount + dec!(0.5)).floor()
}

/// Whole-unit currency string, e.g. `format_money(dec!(1234567.8), "$")`
/// gives `$1,234,568`. Negative amounts put the sign before the prefix.
pub fn format_money(amount: Money, prefix: &str) -> String {
    let rounded = round_to_unit(amount);
    let digits = group_thousands(&rounded.abs().trunc().to_string());
    if rounded.is_sign_negative() && !rounded.is_zero() {
        format!("-{prefix}{digits}")
    } else {
        format!("{prefix}{digits}")
    }
}

/// Rate with two decimals and a percent sign, e.g. `3.32%`.
pub fn format_percent(rate: Percent) -> String {
    let rounded = rate.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

pub fn format_years(years: Years) -> String {
    format!("{} years", years.normalize())
}
