use crate::{interpreter::value::core::Value, util::num::f64_to_i64};

/// Applies a unary `f64` method to the first argument.
///
/// The generated functions read their argument as a double and return a
/// double. Without an argument they return `0.0`.
///
/// # Example
/// ```
/// use cll::interpreter::{function::math::sqrt, value::core::Value};
///
/// assert_eq!(sqrt(&[Value::new("16")]).text(), "4.0");
/// assert_eq!(sqrt(&[]).text(), "0.0");
/// ```
macro_rules! double_builtin {
    ($fname:ident, $method:ident) => {
        #[must_use]
        pub fn $fname(args: &[Value]) -> Value {
            Value::double(args.first().map_or(0.0, |x| x.as_double().$method()))
        }
    };
}

double_builtin!(abs, abs);
double_builtin!(acos, acos);
double_builtin!(acosh, acosh);
double_builtin!(asin, asin);
double_builtin!(asinh, asinh);
double_builtin!(atan, atan);
double_builtin!(atanh, atanh);
double_builtin!(cbrt, cbrt);
double_builtin!(cos, cos);
double_builtin!(cosh, cosh);
double_builtin!(exp, exp);
double_builtin!(exp2, exp2);
double_builtin!(ln, ln);
double_builtin!(log10, log10);
double_builtin!(sin, sin);
double_builtin!(sinh, sinh);
double_builtin!(sqrt, sqrt);
double_builtin!(tan, tan);
double_builtin!(tanh, tanh);

/// Rounds the first argument and returns an int.
///
/// # Parameters
/// - `mode`: One of `"ceil"`, `"floor"`, `"round"` or `"trunc"`.
/// - `args`: The call arguments.
///
/// # Example
/// ```
/// use cll::interpreter::{function::math::integral, value::core::Value};
///
/// assert_eq!(integral("floor", &[Value::new("-2.5")]).text(), "-3");
/// assert_eq!(integral("round", &[Value::new("2.5")]).text(), "3");
/// ```
#[must_use]
pub fn integral(mode: &str, args: &[Value]) -> Value {
    let x = args.first().map_or(0.0, Value::as_double);
    let rounded = match mode {
        "ceil" => x.ceil(),
        "floor" => x.floor(),
        "round" => x.round(),
        _ => x.trunc(),
    };
    Value::int(f64_to_i64(rounded))
}

/// `hypot(x, y)`: the length of the hypotenuse.
#[must_use]
pub fn hypot(args: &[Value]) -> Value {
    match args {
        [x, y, ..] => Value::double(x.as_double().hypot(y.as_double())),
        [x] => Value::double(x.as_double().abs()),
        [] => Value::double(0.0),
    }
}

/// `ldexp(x, e)`: `x` times two to the power `e`.
#[must_use]
pub fn ldexp(args: &[Value]) -> Value {
    match args {
        [x, e, ..] => Value::double(x.as_double() * e.as_double().exp2()),
        [x] => Value::double(x.as_double()),
        [] => Value::double(0.0),
    }
}
