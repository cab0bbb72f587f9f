use super::CllError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
/// Represents all errors that can occur while a statement executes.
pub enum RuntimeError {
    /// A name is still unresolved after evaluation.
    #[error("Name '{name}' not recognized!")]
    NameNotRecognized {
        /// The unresolved name.
        name: String,
    },
    /// A script file could not be read.
    #[error("File '{path}' could not be opened!")]
    FileNotOpened {
        /// The path as written in the script.
        path: String,
    },
    /// Input ended while a scope was still open.
    #[error("Expected '}}' before the end of input!")]
    UnclosedScope,
    /// A nested script failed; carries the file and line of the failure.
    #[error("Error in file '{file}' on line {line}:\n{inner}")]
    InFile {
        /// The nested script.
        file:  String,
        /// The failing line in that script.
        line:  usize,
        /// The error raised there.
        inner: Box<CllError>,
    },
}
