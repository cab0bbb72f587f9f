/// The builtin function table.
///
/// Lists every native function registered into a fresh registry, generated by
/// the `builtin_functions!` macro.
pub mod builtin;
/// File builtins: `fopen`, `fwrite`, `fappend` and `fexist`.
pub mod file;
/// Math builtins over doubles.
pub mod math;
/// `rand`, drawing from the thread-local generator.
pub mod random;
/// String builtins: `find`, `rfind`, `substr` and `strspn`.
pub mod string;
/// `time` and `sleep`.
pub mod time;
/// Conversions and introspection: `int`, `string`, `typeof`, `length` and
/// friends.
pub mod types;

pub mod core;
