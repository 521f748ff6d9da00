//! Lenient number parsing and fixed-point formatting
//!
//! Form fields and scraped table cells arrive as free text ("4", " 3.0 credits",
//! "", "abc"). These helpers read the numeric prefix of such text and format
//! results with a fixed number of decimals.

use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::sync::LazyLock;

static INT_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?\d+").expect("valid integer prefix pattern"));

static FLOAT_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|\d+(?:\.\d*)?(?:[eE][+-]?\d+)?|\.\d+(?:[eE][+-]?\d+)?)")
        .expect("valid float prefix pattern")
});

/// Parse the integer prefix of `text`.
///
/// Leading whitespace is skipped and parsing stops at the first character that
/// is not a digit, so `"4.7"` reads as 4 and `"12 hrs"` as 12.
///
/// # Returns
/// `None` when the text does not start with an integer, or the integer does not fit in `i64`.
#[must_use]
pub fn parse_int_prefix(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let found = INT_PREFIX.find(trimmed)?;
    found.as_str().parse().ok()
}

/// Parse the decimal prefix of `text`.
///
/// Accepts an optional sign, digits with an optional fraction and exponent, or
/// `Infinity`. Trailing garbage is ignored (`"3.5 credits"` reads as 3.5).
#[must_use]
pub fn parse_float_prefix(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let found = FLOAT_PREFIX.find(trimmed)?.as_str();
    let unsigned = found.trim_start_matches(['+', '-']);
    let negative = found.starts_with('-');
    let magnitude = if unsigned == "Infinity" {
        f64::INFINITY
    } else {
        unsigned.parse::<f64>().ok()?
    };
    Some(if negative { -magnitude } else { magnitude })
}

/// Format `value` with exactly `digits` decimals.
///
/// Halves round away from zero (`22.5` becomes `"23"` with zero digits) and a
/// result that rounds to zero is never rendered as `-0.00`.
#[must_use]
pub fn to_fixed(value: f64, digits: u8) -> String {
    let precision = usize::from(digits);
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let factor = 10f64.powi(i32::from(digits));
    // Adding +0.0 turns a negative zero into a positive one.
    let rounded = (value * factor).round() / factor + 0.0;
    format!("{rounded:.precision$}")
}

/// Deserialize a non-negative integer that may have been stored as a number
/// or as the text the user typed. Anything unreadable or negative becomes 0.
///
/// # Errors
/// Only fails when the underlying deserializer fails to produce a value.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_u32(&value))
}

/// Coerce a JSON value into a non-negative integer, truncating fractions.
#[must_use]
pub fn value_to_u32(value: &serde_json::Value) -> u32 {
    let parsed = match value {
        serde_json::Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().map(f64::trunc).map(saturating_f64_to_i64)),
        serde_json::Value::String(text) => parse_int_prefix(text),
        _ => None,
    };
    parsed.map_or(0, clamp_to_u32)
}

/// Clamp a signed integer into the `u32` range.
#[must_use]
pub fn clamp_to_u32(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

#[allow(clippy::cast_possible_truncation)]
fn saturating_f64_to_i64(value: f64) -> i64 {
    // `as` saturates on overflow and maps NaN to 0.
    value as i64
}
