use crate::interpreter::{
    function::{file, math, random, string, time, types},
    value::core::Value,
};

/// Signature of a builtin.
type BuiltinFn = fn(&[Value]) -> Value;

/// Defines builtin functions by generating a lookup table and a name list.
///
/// The macro produces:
/// - `BuiltinDef` (name and function pointer),
/// - `BUILTIN_TABLE` (the table registered into every fresh registry),
/// - `BUILTIN_FUNCTIONS` (public list of builtin names).
macro_rules! builtin_functions {
    ($($name:literal => $func:expr),* $(,)?) => {
        pub(crate) struct BuiltinDef {
            pub(crate) name: &'static str,
            pub(crate) func: BuiltinFn,
        }
        pub(crate) static BUILTIN_TABLE: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, func: $func },
            )*
        ];
        pub const BUILTIN_FUNCTIONS: &[&str] = &[
            $($name,)*
        ];
    };
}

builtin_functions! {
    "abs"       => math::abs,
    "acos"      => math::acos,
    "acosh"     => math::acosh,
    "asin"      => math::asin,
    "asinh"     => math::asinh,
    "atan"      => math::atan,
    "atanh"     => math::atanh,
    "cbrt"      => math::cbrt,
    "ceil"      => |args| math::integral("ceil", args),
    "cos"       => math::cos,
    "cosh"      => math::cosh,
    "exp"       => math::exp,
    "exp2"      => math::exp2,
    "floor"     => |args| math::integral("floor", args),
    "hypot"     => math::hypot,
    "ldexp"     => math::ldexp,
    "log"       => math::ln,
    "log10"     => math::log10,
    "round"     => |args| math::integral("round", args),
    "sin"       => math::sin,
    "sinh"      => math::sinh,
    "sqrt"      => math::sqrt,
    "tan"       => math::tan,
    "tanh"      => math::tanh,
    "trunc"     => |args| math::integral("trunc", args),
    "bool"      => types::to_bool,
    "int"       => types::to_int,
    "float"     => types::to_float,
    "double"    => types::to_double,
    "char"      => types::to_char,
    "string"    => types::to_string,
    "to_string" => types::to_string,
    "typeof"    => types::type_of,
    "length"    => types::length,
    "find"      => |args| string::find(args, false),
    "rfind"     => |args| string::find(args, true),
    "substr"    => string::substr,
    "strspn"    => string::strspn,
    "fopen"     => file::fopen,
    "fwrite"    => |args| file::write(args, false),
    "fappend"   => |args| file::write(args, true),
    "fexist"    => file::fexist,
    "time"      => time::time,
    "sleep"     => time::sleep,
    "rand"      => random::rand,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique_and_callable() {
        let mut names = BUILTIN_FUNCTIONS.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILTIN_TABLE.len());

        for builtin in BUILTIN_TABLE {
            // No builtin may panic on missing arguments.
            let _ = (builtin.func)(&[]);
        }
    }
}
