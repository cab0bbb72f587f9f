/// Syntax errors.
///
/// Defines every diagnostic raised by the syntax check that runs on a line's
/// raw tokens before any of them is evaluated: misplaced keywords and
/// symbols, malformed ternaries, statements with too few arguments and
/// illegal or unknown names.
pub mod syntax_error;
/// Runtime errors.
///
/// Contains the errors raised while a statement executes: names that are
/// still unresolved after evaluation, files that cannot be opened, scopes left
/// open at the end of input and failures inside nested script files.
pub mod runtime_error;

pub use runtime_error::RuntimeError;
pub use syntax_error::SyntaxError;

/// Any error that stops a script.
///
/// The `Display` form of every variant is exactly the message a script author
/// sees after `ERROR: `.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CllError {
    /// Raised by the syntax check before evaluation.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    /// Raised during evaluation or statement execution.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

/// Result type used by the statement engine.
pub type ScriptResult<T> = Result<T, CllError>;
