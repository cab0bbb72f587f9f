/// Numeric literal parsing and formatting helpers.
///
/// This module holds the conversions every numeric value passes through: the
/// integer literal forms (decimal, octal, hexadecimal, binary), the canonical
/// textual form of floating-point results and saturating conversions between
/// `i64`, `usize` and `f64`.
///
/// # Responsibilities
/// - Parse integer literals and report overflow separately from bad input.
/// - Format `f32`/`f64` results the way the language prints them.
/// - Convert between numeric types without panicking.
pub mod num;
/// Text scanning helpers shared by the tokenizer and the value layer.
///
/// Scripts keep arrays, strings and calls as flat text, so several components
/// need to walk text while respecting quotes and bracket nesting. These
/// helpers provide that walk once, together with escape-sequence handling for
/// string and char literals.
pub mod text;
