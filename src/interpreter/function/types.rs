use crate::{
    interpreter::{
        grammar::Grammar,
        value::{
            classify::classify,
            core::{Kind, Value},
        },
    },
    util::num::usize_to_i64,
};

/// Reads a string argument as the literal it spells, when it spells one.
///
/// `int("42")` is `42`, whereas reading `"42"` as a number directly gives
/// its length.
fn literal(arg: &Value) -> Value {
    if arg.kind() == Kind::String {
        let content = arg.as_string();
        if classify(content.trim(), &Grammar::STANDARD).kind.is_numeric() {
            return Value::new(content.trim());
        }
    }
    arg.clone()
}

#[must_use]
pub fn to_bool(args: &[Value]) -> Value {
    Value::boolean(args.first().is_some_and(Value::as_bool))
}

/// Converts to an int.
///
/// # Example
/// ```
/// use cll::interpreter::{function::types::to_int, value::core::Value};
///
/// assert_eq!(to_int(&[Value::new("3.9")]).text(), "3");
/// assert_eq!(to_int(&[Value::new("\"42\"")]).text(), "42");
/// assert_eq!(to_int(&[Value::new("\"abc\"")]).text(), "3");
/// ```
#[must_use]
pub fn to_int(args: &[Value]) -> Value {
    Value::int(args.first().map_or(0, |arg| literal(arg).as_int()))
}

#[must_use]
pub fn to_float(args: &[Value]) -> Value {
    Value::float(args.first().map_or(0.0, |arg| literal(arg).as_float()))
}

#[must_use]
pub fn to_double(args: &[Value]) -> Value {
    Value::double(args.first().map_or(0.0, |arg| literal(arg).as_double()))
}

#[must_use]
pub fn to_char(args: &[Value]) -> Value {
    Value::character(args.first().map_or('\0', Value::as_char))
}

/// Converts to a string holding the argument's text.
#[must_use]
pub fn to_string(args: &[Value]) -> Value {
    Value::string(&args.first().map(Value::as_string).unwrap_or_default())
}

/// Returns the kind name of the argument, such as `"INT"`.
#[must_use]
pub fn type_of(args: &[Value]) -> Value {
    Value::string(args.first().map_or(Kind::Undefined, Value::kind).name())
}

/// Counts array elements or string chars.
#[must_use]
pub fn length(args: &[Value]) -> Value {
    Value::int(args.first().map_or(0, |arg| usize_to_i64(arg.size())))
}
