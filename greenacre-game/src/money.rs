//! Currency arithmetic and display formatting.
//!
//! All money in the engine is carried as integer cents (`i64`), matching the
//! catalog's `value_cents` fields. Float dollar amounts arriving from the
//! host shell are rounded through cents before any arithmetic so IEEE 754
//! drift never accumulates.

use crate::numbers::{i64_to_f64, round_f64_to_i64};

/// Convert a float dollar amount to integer cents, rounding half away from zero.
#[must_use]
pub fn to_cents(amount: f64) -> i64 {
    round_f64_to_i64(amount * 100.0)
}

/// Convert integer cents back to a float dollar amount.
#[must_use]
pub fn to_dollars(cents: i64) -> f64 {
    i64_to_f64(cents) / 100.0
}

/// Round a float dollar amount to an exact two-decimal money value.
#[must_use]
pub fn cast_to_money(amount: f64) -> f64 {
    to_dollars(to_cents(amount))
}

/// Sum float dollar amounts without floating-point drift.
///
/// Each addend is rounded to cents before summation, so
/// `money_total(&[0.1, 0.2])` is exactly `0.3`.
#[must_use]
pub fn money_total(amounts: &[f64]) -> f64 {
    let cents: i64 = amounts.iter().map(|amount| to_cents(*amount)).sum();
    to_dollars(cents)
}

/// Format cents with a currency symbol and exact cents: `$1,234.56`.
#[must_use]
pub fn money_string(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let dollars = magnitude / 100;
    let rem = magnitude % 100;
    format!("{sign}${}.{rem:02}", group_thousands(dollars))
}

/// Format cents with a currency symbol, rounded to whole dollars: `$1,235`.
#[must_use]
pub fn dollar_string(cents: i64) -> String {
    let rounded = round_f64_to_i64(i64_to_f64(cents) / 100.0);
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(rounded.unsigned_abs()))
}

/// Format cents as a symbol-less whole-dollar figure: `1,235`.
#[must_use]
pub fn integer_string(cents: i64) -> String {
    let rounded = round_f64_to_i64(i64_to_f64(cents) / 100.0);
    let sign = if rounded < 0 { "-" } else { "" };
    format!("{sign}{}", group_thousands(rounded.unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let bytes = digits.as_bytes();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, b) in bytes.iter().enumerate() {
        if i > 0 && (bytes.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(char::from(*b));
    }
    out
}
