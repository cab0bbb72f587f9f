use std::num::IntErrorKind;

/// Outcome of reading an integer literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntLiteral {
    /// The literal fits into an `i64`.
    Value(i64),
    /// The literal is well formed but does not fit into an `i64`.
    Overflow,
    /// The literal is not a valid integer.
    Invalid,
}

/// Parses an integer literal in any of the supported bases.
///
/// - `0x1A` is hexadecimal and `0b101` is binary.
/// - A leading `0` followed by more digits is octal, unless the digits contain
///   an `8` or a `9`, in which case the literal is read as decimal.
/// - Anything else is decimal, optionally negative.
///
/// # Example
/// ```
/// use cll::util::num::{IntLiteral, parse_int_literal};
///
/// assert_eq!(parse_int_literal("007"), IntLiteral::Value(7));
/// assert_eq!(parse_int_literal("0x1A"), IntLiteral::Value(26));
/// assert_eq!(parse_int_literal("0b101"), IntLiteral::Value(5));
/// assert_eq!(parse_int_literal("019"), IntLiteral::Value(19));
/// assert_eq!(parse_int_literal("99999999999999999999"), IntLiteral::Overflow);
/// ```
#[must_use]
pub fn parse_int_literal(text: &str) -> IntLiteral {
    let (digits, radix) = if let Some(hex) = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")) {
        (hex, 16)
    } else if let Some(binary) = text.strip_prefix("0b").or_else(|| text.strip_prefix("0B")) {
        (binary, 2)
    } else if text.len() > 1 && text.starts_with('0') && !text.contains(['8', '9']) {
        (&text[1..], 8)
    } else {
        (text, 10)
    };

    match i64::from_str_radix(digits, radix) {
        Ok(value) => IntLiteral::Value(value),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => IntLiteral::Overflow,
            _ => IntLiteral::Invalid,
        },
    }
}

/// Formats a double the way scripts print it.
///
/// Finite values use the shortest representation that reads back to the same
/// number and always carry a fractional part. Non-finite values print as
/// `inf`, `-inf` or `nan`.
///
/// # Example
/// ```
/// use cll::util::num::format_double;
///
/// assert_eq!(format_double(7.5), "7.5");
/// assert_eq!(format_double(3.0), "3.0");
/// assert_eq!(format_double(f64::INFINITY), "inf");
/// ```
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    with_fraction(value.to_string())
}

/// Formats a float without its `f` suffix.
///
/// Same rules as [`format_double`], but the shortest representation is taken
/// at `f32` precision so `0.1f` prints as `0.1` rather than its widened
/// double expansion.
#[must_use]
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return "nan".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_owned();
    }

    with_fraction(value.to_string())
}

fn with_fraction(text: String) -> String {
    if text.contains('.') { text } else { format!("{text}.0") }
}

/// Converts an `f64` to `i64`, truncating toward zero.
///
/// Values outside the `i64` range saturate and `NaN` becomes `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn f64_to_i64(value: f64) -> i64 {
    value as i64
}

/// Converts an `i64` to `f64`, rounding to the nearest representable value.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub const fn i64_to_f64(value: i64) -> f64 {
    value as f64
}

/// Narrows an `f64` to `f32`, rounding to the nearest representable value.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn f64_to_f32(value: f64) -> f32 {
    value as f32
}

/// Converts a length or index to `i64`, saturating at `i64::MAX`.
#[must_use]
pub fn usize_to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Converts a script integer to an index, rejecting negative values.
///
/// # Example
/// ```
/// use cll::util::num::i64_to_index;
///
/// assert_eq!(i64_to_index(3), Some(3));
/// assert_eq!(i64_to_index(-1), None);
/// ```
#[must_use]
pub fn i64_to_index(value: i64) -> Option<usize> {
    usize::try_from(value).ok()
}
