//! # cll
//!
//! cll is an embeddable, dynamically typed scripting language interpreted
//! line by line. Values carry their own textual form and infer their kind
//! from it; scripts declare variables by assigning them, group statements
//! with braces and call host functions registered at runtime.
//!
//! ```
//! use cll::{Interpreter, Value};
//!
//! let mut cll = Interpreter::new();
//! cll.add_function("double_it", |args: &[Value]| {
//!     args.first().map_or_else(Value::empty, |v| v * &Value::int(2))
//! });
//!
//! assert!(cll.read_vector(&["total = 0",
//!                           "for (i = 0, i < 4, i += 1) {",
//!                           "    total += double_it(i)",
//!                           "}"]));
//! assert_eq!(cll.get_var("total").unwrap().as_int(), 12);
//! assert!(cll.get_var("i").is_none());
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

/// Provides the error types raised while checking and running scripts.
///
/// Every failure a script can hit is one variant of [`error::CllError`], whose
/// `Display` form is exactly the diagnostic the script author sees.
///
/// # Responsibilities
/// - Defines the syntax errors found before a statement is evaluated.
/// - Defines the runtime errors raised while it executes.
/// - Wraps failures of nested script files with their file and line.
pub mod error;
/// The interpreter: values, tokenizer, evaluator and statement engine.
///
/// # Responsibilities
/// - Classifies literal text into typed values and implements the operators.
/// - Tokenizes lines and evaluates expressions by precedence tiers.
/// - Runs statements, scopes, loops and functions line by line.
/// - Exposes the embedding API through [`Interpreter`].
pub mod interpreter;
/// General utilities for numeric conversion and literal text handling.
///
/// # Responsibilities
/// - Safely convert between `i64`, `usize`, `f32` and `f64`.
/// - Parse integer literals and format floating-point text.
/// - Track nesting inside literals and groups, and escape or unescape
///   string contents.
pub mod util;

pub use error::CllError;
pub use interpreter::{
    engine::core::Interpreter,
    value::core::{Kind, Value},
};

/// The crate version, as scripts and hosts see it.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Runs multi-line source in a fresh interpreter with console I/O on.
///
/// Returns the interpreter so its variables can be inspected, or the error
/// that stopped the script.
///
/// # Examples
/// ```
/// use cll::run_source;
///
/// let mut cll = run_source("x = 2 ** 10\ny = x / 4").unwrap();
/// assert_eq!(cll.get_var("y").unwrap().text(), "256.0f");
///
/// let error = run_source("y = x + 1").unwrap_err();
/// assert_eq!(error.to_string(), "Name 'x' not recognized!");
/// ```
pub fn run_source(source: &str) -> Result<Interpreter, CllError> {
    let lines: Vec<&str> = source.lines().collect();

    let mut interpreter = Interpreter::new();
    interpreter.enable_io();

    if interpreter.read_vector(&lines) {
        return Ok(interpreter);
    }
    match interpreter.error() {
        Some(error) => Err(error.clone()),
        None => Ok(interpreter),
    }
}
