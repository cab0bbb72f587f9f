/// Literal classification.
///
/// Decides the kind of a piece of text and normalises numeric and char
/// literals into their canonical form. Numeric shapes are recognised by a
/// small `logos` lexer that must consume the whole text in one token.
pub mod classify;
/// Element access for arrays, strings and chars.
///
/// Arrays are kept as flat text, so reading, replacing or deleting an element
/// splits the interior at its top-level commas every time.
pub mod element;
/// Operator implementations.
///
/// Implements the arithmetic, comparison, bitwise and logical operators over
/// every pair of kinds, following one coercion ladder: arrays first, then
/// strings, then numeric promotion from int to float to double.
pub mod ops;

pub mod core;
