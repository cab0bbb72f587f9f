use rand::Rng;

use crate::interpreter::value::core::Value;

/// `rand()`, `rand(high)` or `rand(low, high)`: a uniform double in
/// `[low, high)`, with `low` defaulting to `0` and `high` to `1`.
///
/// An empty or non-finite range returns `low`.
///
/// # Example
/// ```
/// use cll::interpreter::{function::random::rand, value::core::Value};
///
/// let x = rand(&[Value::new("5"), Value::new("6")]).as_double();
/// assert!((5.0..6.0).contains(&x));
///
/// assert_eq!(rand(&[Value::new("2"), Value::new("2")]).as_double(), 2.0);
/// ```
#[must_use]
pub fn rand(args: &[Value]) -> Value {
    let (low, high) = match args {
        [] => (0.0, 1.0),
        [high] => (0.0, high.as_double()),
        [low, high, ..] => (low.as_double(), high.as_double()),
    };

    if !(low.is_finite() && high.is_finite() && low < high) {
        return Value::double(low);
    }

    Value::double(rand::thread_rng().gen_range(low..high))
}
