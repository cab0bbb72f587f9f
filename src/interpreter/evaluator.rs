/// Operator reduction.
///
/// Collapses a resolved token sequence one precedence tier at a time: prefix
/// operators first, then the binary tiers from `**` down to `||`, the
/// ternary operator, assignment and finally comma clean-up.
pub mod reduce;

/// Variable access by name.
///
/// Names may carry subscripts, so `m[1][2]` reads, writes or deletes an
/// element of an element. Index expressions are evaluated on every access.
pub mod subscript;

/// Function calls.
///
/// Evaluates argument lists and dispatches to script-defined functions,
/// which run in a fresh child interpreter, or to native callbacks.
pub mod call;

/// Core evaluation: resolving groups, calls and names into values before
/// reduction, and reporting what could not be resolved.
pub mod core;
