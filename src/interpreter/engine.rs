/// Block scopes and the constructs that run them.
///
/// A closed scope runs in a child interpreter seeded with a copy of the
/// variables; afterwards only variables that already existed are copied back.
/// This module drives blocks, `if`/`else` chains, `while`, `do ... while` and
/// `for` loops, and stores `function` definitions.
pub mod scope;
/// Line input: splitting lines into statements and tracking braces.
///
/// Also holds the embedding entry points that execute a line, a file or a
/// list of lines and record the error on failure.
pub mod line;
/// Statement dispatch.
///
/// Runs the syntax check and then the handler for the statement's keyword,
/// or evaluates the statement as an expression.
pub mod statement;

pub mod core;
