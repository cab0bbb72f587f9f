/// The statement engine that drives execution line by line.
///
/// The engine owns an interpreter instance's state: its variables, its
/// function registry, the pending block statement and the lines buffered for
/// it. It splits each line into statements, dispatches keywords, and runs
/// closed scopes through child instances that inherit a copy of the
/// variables.
///
/// # Responsibilities
/// - Splits lines at `;`, `{` and `}` and tracks brace depth.
/// - Executes `if`, `else`, `while`, `do`, `for`, `function`, `return`,
///   `break`, `continue`, `delete`, `cll`, `include`, `cout`, `cin` and
///   `pause`.
/// - Merges mutations of pre-existing variables back from child scopes.
/// - Exposes the embedding API and records errors for the host.
pub mod engine;
/// The expression evaluator.
///
/// Given the flat token sequence of a statement, the evaluator first resolves
/// every group, call and name into values and then collapses the sequence
/// with one pass per precedence tier, from prefix operators down to
/// assignment and comma sequencing.
///
/// # Responsibilities
/// - Recursively evaluates parenthesised groups and array literals.
/// - Dispatches calls to defined and native functions.
/// - Reads, writes and deletes variables, including subscripted names.
/// - Applies the operator precedence tiers.
pub mod evaluator;
/// Host and script function registry.
///
/// Functions live in two sorted tables: native callbacks supplied by the host
/// (the builtin library included) and functions defined by scripts, stored as
/// their body lines.
///
/// # Responsibilities
/// - Looks functions up by name with binary search.
/// - Registers the builtin library.
/// - Adds and removes host callbacks and script definitions.
pub mod function;
/// The immutable language configuration.
///
/// Keywords, reserved names, multi-character operators and the character sets
/// that break tokens or make names illegal are bundled into one value that is
/// handed to the tokenizer and to value classification.
pub mod grammar;
/// The tokenizer.
///
/// Turns one line of source into a sequence of values, keeping string and
/// char literals, arrays and parenthesised groups intact, matching the
/// longest operator and stopping at `//` comments.
pub mod lexer;
/// Console input and output.
///
/// `cout`, `cin` and `pause` talk to a console handle that is shared by an
/// interpreter and every child it spawns, so hosts can swap the terminal for
/// an in-memory buffer.
pub mod console;
/// The variable store.
///
/// An ordered collection of named values kept sorted by name so lookups,
/// inserts and deletions are binary searches.
pub mod store;
/// The syntax check run on raw tokens before evaluation.
///
/// Validates keyword placement, operator sequences, ternary shape, statement
/// arity and name legality so that evaluation only sees well-formed input.
pub mod syntax;
/// The dynamically typed value.
///
/// A value is both a token and a variable's content: it keeps its textual
/// form, the kind inferred from that text and a numeric cache, and it
/// implements every operator of the language.
///
/// # Responsibilities
/// - Infers the kind of a literal from its text.
/// - Coerces between kinds when read as a number, char or string.
/// - Implements arithmetic, comparison, bitwise and logical operators.
/// - Reads, replaces and deletes elements of arrays and strings.
pub mod value;
