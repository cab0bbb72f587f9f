use std::{
    cmp::Ordering,
    ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub},
};

use crate::{
    interpreter::value::core::{Kind, Value},
    util::num::{f64_to_f32, i64_to_f64, i64_to_index},
};

/// Two numeric operands brought to a common representation.
///
/// Double beats float, and float beats int and char.
enum Promoted {
    Ints(i64, i64),
    Floats(f32, f32),
    Doubles(f64, f64),
}

impl Promoted {
    fn of(lhs: &Value, rhs: &Value) -> Self {
        match (lhs.kind(), rhs.kind()) {
            (Kind::Double, _) | (_, Kind::Double) => Self::Doubles(lhs.as_double(), rhs.as_double()),
            (Kind::Float, _) | (_, Kind::Float) => Self::Floats(lhs.as_float(), rhs.as_float()),
            _ => Self::Ints(lhs.as_int(), rhs.as_int()),
        }
    }

    /// Applies an arithmetic operator. Int results that overflow are
    /// recomputed as doubles.
    fn arithmetic(self,
                  int: fn(i64, i64) -> Option<i64>,
                  float: fn(f32, f32) -> f32,
                  double: fn(f64, f64) -> f64)
                  -> Value {
        match self {
            Self::Ints(a, b) => int(a, b).map_or_else(|| Value::double(double(i64_to_f64(a), i64_to_f64(b))),
                                                      Value::int),
            Self::Floats(a, b) => Value::float(float(a, b)),
            Self::Doubles(a, b) => Value::double(double(a, b)),
        }
    }

    fn compare(&self) -> Option<Ordering> {
        match *self {
            Self::Ints(a, b) => Some(a.cmp(&b)),
            Self::Floats(a, b) => a.partial_cmp(&b),
            Self::Doubles(a, b) => a.partial_cmp(&b),
        }
    }
}

const fn is_text(value: &Value) -> bool {
    matches!(value.kind(), Kind::String | Kind::Array)
}

fn infinity() -> Value {
    Value::double(f64::INFINITY)
}

fn items_of(value: &Value) -> Vec<Value> {
    if value.kind() == Kind::Array {
        value.elements()
    } else if value.is_empty() {
        Vec::new()
    } else {
        vec![value.clone()]
    }
}

fn repeat(value: &Value, times: i64) -> Value {
    let times = i64_to_index(times).unwrap_or(0);

    if value.kind() == Kind::Array {
        let items = value.elements();
        let repeated: Vec<Value> = items.iter().cycle().take(items.len() * times).cloned().collect();
        Value::array(&repeated)
    } else {
        Value::string(&value.as_string().repeat(times))
    }
}

/// Applies an integer-only operator. A non-numeric left operand gives `0` and
/// a non-numeric right operand gives `inf`.
fn integral(lhs: &Value, rhs: &Value, op: impl Fn(i64, i64) -> Option<i64>) -> Value {
    if !lhs.kind().is_numeric() {
        Value::int(0)
    } else if !rhs.kind().is_numeric() {
        infinity()
    } else {
        op(lhs.as_int(), rhs.as_int()).map_or_else(infinity, Value::int)
    }
}

fn shift(amount: i64) -> Option<u32> {
    u32::try_from(amount).ok().filter(|&n| n < 64)
}

impl Add for &Value {
    type Output = Value;

    /// Concatenates arrays and strings, adds numbers.
    ///
    /// An array on either side absorbs the other operand as elements. A
    /// string on either side concatenates the text of both operands.
    fn add(self, rhs: Self) -> Value {
        if self.kind() == Kind::Array || rhs.kind() == Kind::Array {
            let mut items = items_of(self);
            items.extend(items_of(rhs));
            Value::array(&items)
        } else if self.kind() == Kind::String || rhs.kind() == Kind::String {
            Value::string(&(self.as_string() + &rhs.as_string()))
        } else {
            Promoted::of(self, rhs).arithmetic(i64::checked_add, |a, b| a + b, |a, b| a + b)
        }
    }
}

impl Sub for &Value {
    type Output = Value;

    fn sub(self, rhs: Self) -> Value {
        if is_text(self) || is_text(rhs) {
            return self.clone();
        }
        Promoted::of(self, rhs).arithmetic(i64::checked_sub, |a, b| a - b, |a, b| a - b)
    }
}

impl Mul for &Value {
    type Output = Value;

    /// Repeats arrays and strings, multiplies numbers.
    fn mul(self, rhs: Self) -> Value {
        if is_text(self) {
            repeat(self, rhs.as_int())
        } else if is_text(rhs) {
            repeat(rhs, self.as_int())
        } else {
            Promoted::of(self, rhs).arithmetic(i64::checked_mul, |a, b| a * b, |a, b| a * b)
        }
    }
}

impl Div for &Value {
    type Output = Value;

    /// Divides numbers. Two ints divide as floats, and a zero divisor gives
    /// `inf`.
    fn div(self, rhs: Self) -> Value {
        if is_text(self) || is_text(rhs) {
            return self.clone();
        }
        if rhs.as_double() == 0.0 {
            return infinity();
        }

        match Promoted::of(self, rhs) {
            Promoted::Ints(a, b) => Value::float(f64_to_f32(i64_to_f64(a) / i64_to_f64(b))),
            Promoted::Floats(a, b) => Value::float(a / b),
            Promoted::Doubles(a, b) => Value::double(a / b),
        }
    }
}

impl Rem for &Value {
    type Output = Value;

    /// Integer remainder of both operands read as ints. A zero divisor gives
    /// `inf`.
    fn rem(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| if b == 0 { None } else { Some(a.checked_rem(b).unwrap_or(0)) })
    }
}

impl BitAnd for &Value {
    type Output = Value;

    fn bitand(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| Some(a & b))
    }
}

impl BitOr for &Value {
    type Output = Value;

    fn bitor(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| Some(a | b))
    }
}

impl BitXor for &Value {
    type Output = Value;

    fn bitxor(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| Some(a ^ b))
    }
}

impl Shl for &Value {
    type Output = Value;

    /// Shifts left. Shifts outside `0..64` give `0`.
    fn shl(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| Some(shift(b).map_or(0, |n| a << n)))
    }
}

impl Shr for &Value {
    type Output = Value;

    /// Arithmetic shift right. Shifts outside `0..64` give `0`.
    fn shr(self, rhs: Self) -> Value {
        integral(self, rhs, |a, b| Some(shift(b).map_or(0, |n| a >> n)))
    }
}

impl Neg for &Value {
    type Output = Value;

    fn neg(self) -> Value {
        &Value::int(0) - self
    }
}

impl Not for &Value {
    type Output = Value;

    /// Logical negation.
    fn not(self) -> Value {
        Value::boolean(!self.as_bool())
    }
}

impl Value {
    /// Raises `self` to the power `rhs`.
    ///
    /// Two ints with a non-negative exponent stay an int unless the result
    /// overflows.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::new("3").pow(&Value::new("2")).text(), "9");
    /// assert_eq!(Value::new("2").pow(&Value::new("-1")).text(), "0.5");
    /// assert_eq!(Value::new("4.0").pow(&Value::new("0.5")).text(), "2.0");
    /// ```
    #[must_use]
    pub fn pow(&self, rhs: &Self) -> Self {
        if is_text(self) || is_text(rhs) {
            return self.clone();
        }

        match Promoted::of(self, rhs) {
            Promoted::Ints(a, b) => u32::try_from(b).ok()
                                                    .and_then(|b| a.checked_pow(b))
                                                    .map_or_else(|| Self::double(i64_to_f64(a).powf(i64_to_f64(b))),
                                                                 Self::int),
            Promoted::Floats(a, b) => Self::float(a.powf(b)),
            Promoted::Doubles(a, b) => Self::double(a.powf(b)),
        }
    }

    /// Bitwise complement of the value read as an int.
    #[must_use]
    pub fn bit_not(&self) -> Self {
        Self::int(!self.as_int())
    }

    /// Loose equality.
    ///
    /// - Two strings or two arrays are equal when their text is.
    /// - A string and a char compare their text content.
    /// - Identical text is always equal.
    /// - Everything else compares numerically after promotion, so a string
    ///   or array compares its length with a number.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// assert!(Value::new("1").equals(&Value::new("1.0")));
    /// assert!(Value::new("\"abc\"").equals(&Value::new("3")));
    /// assert!(!Value::new("\"abc\"").equals(&Value::new("\"abd\"")));
    /// ```
    #[must_use]
    pub fn equals(&self, rhs: &Self) -> bool {
        match (self.kind(), rhs.kind()) {
            (Kind::String, Kind::String) | (Kind::Array, Kind::Array) => self.text() == rhs.text(),
            (Kind::String, Kind::Char) | (Kind::Char, Kind::String) => self.as_string() == rhs.as_string(),
            _ if self.text() == rhs.text() => true,
            _ => Promoted::of(self, rhs).compare() == Some(Ordering::Equal),
        }
    }

    /// Equality that also requires both kinds to match.
    #[must_use]
    pub fn strict_equals(&self, rhs: &Self) -> bool {
        self.kind() == rhs.kind() && self.equals(rhs)
    }

    /// Orders two values. Strings and arrays compare as text, everything else
    /// numerically; `NaN` is unordered.
    #[must_use]
    pub fn compare(&self, rhs: &Self) -> Option<Ordering> {
        if is_text(self) || is_text(rhs) {
            Some(self.as_string().cmp(&rhs.as_string()))
        } else {
            Promoted::of(self, rhs).compare()
        }
    }

    /// Applies a binary operator given by its symbol.
    ///
    /// Returns `None` for symbols that are not binary operators.
    ///
    /// # Example
    /// ```
    /// use cll::interpreter::value::core::Value;
    ///
    /// let two = Value::new("2");
    /// let three = Value::new("3");
    ///
    /// assert_eq!(two.apply("**", &three).map(|v| v.to_string()), Some("8".to_owned()));
    /// assert_eq!(two.apply("<=", &three).map(|v| v.to_string()), Some("1".to_owned()));
    /// assert_eq!(two.apply("?", &three), None);
    /// ```
    #[must_use]
    pub fn apply(&self, op: &str, rhs: &Self) -> Option<Self> {
        let ordered = |wanted: &[Ordering]| Self::boolean(self.compare(rhs).is_some_and(|o| wanted.contains(&o)));

        let result = match op {
            "**" => self.pow(rhs),
            "*" => self * rhs,
            "/" => self / rhs,
            "%" => self % rhs,
            "+" => self + rhs,
            "-" => self - rhs,
            "<<" => self << rhs,
            ">>" => self >> rhs,
            "<" => ordered(&[Ordering::Less]),
            ">" => ordered(&[Ordering::Greater]),
            "<=" => Self::boolean(self.equals(rhs) || self.compare(rhs) == Some(Ordering::Less)),
            ">=" => Self::boolean(self.equals(rhs) || self.compare(rhs) == Some(Ordering::Greater)),
            "==" => Self::boolean(self.equals(rhs)),
            "!=" => Self::boolean(!self.equals(rhs)),
            "===" => Self::boolean(self.strict_equals(rhs)),
            "!==" => Self::boolean(!self.strict_equals(rhs)),
            "&" => self & rhs,
            "^" => self ^ rhs,
            "|" => self | rhs,
            "&&" => Self::boolean(self.as_bool() && rhs.as_bool()),
            "||" => Self::boolean(self.as_bool() || rhs.as_bool()),
            _ => return None,
        };

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> Value {
        Value::new(text)
    }

    #[test]
    fn promotion_ladder() {
        assert_eq!((&v("3") + &v("4.5f")).text(), "7.5f");
        assert_eq!((&v("3") + &v("4.5")).text(), "7.5");
        assert_eq!((&v("2.5f") * &v("2.0")).kind(), Kind::Double);
        assert_eq!((&v("'a'") + &v("1")).text(), "98");
        assert_eq!((&v("7") / &v("2")).text(), "3.5f");
    }

    #[test]
    fn zero_divisors_give_inf() {
        assert_eq!((&v("1") / &v("0")).text(), "inf");
        assert_eq!((&v("1.5") / &v("0.0")).text(), "inf");
        assert_eq!((&v("7") % &v("0")).text(), "inf");
    }

    #[test]
    fn int_overflow_becomes_double() {
        let max = Value::int(i64::MAX);
        assert_eq!((&max + &v("1")).kind(), Kind::Double);
        assert_eq!(v("2").pow(&v("64")).kind(), Kind::Double);
    }

    #[test]
    fn strings_and_arrays() {
        assert_eq!((&v("\"ab\"") + &v("\"cd\"")).text(), "\"abcd\"");
        assert_eq!((&v("\"n=\"") + &v("4")).text(), "\"n=4\"");
        assert_eq!((&v("\"ab\"") * &v("3")).text(), "\"ababab\"");
        assert_eq!((&v("\"ab\"") * &v("0")).text(), "\"\"");
        assert_eq!((&v("\"ab\"") - &v("1")).text(), "\"ab\"");
        assert_eq!((&v("[1,2]") + &v("3")).text(), "[1,2,3]");
        assert_eq!((&v("0") + &v("[1]")).text(), "[0,1]");
        assert_eq!((&v("[1,2]") + &v("[3]")).text(), "[1,2,3]");
        assert_eq!((&v("[1]") * &v("3")).text(), "[1,1,1]");
        assert_eq!((&v("\"x\"") % &v("2")).text(), "0");
    }

    #[test]
    fn comparisons() {
        assert!(v("\"abc\"").apply("<", &v("\"abd\"")).is_some_and(|r| r.as_bool()));
        assert!(v("2.0").apply(">=", &v("2")).is_some_and(|r| r.as_bool()));
        assert!(v("1").apply("===", &v("1.0")).is_some_and(|r| !r.as_bool()));
        assert!(v("nan").apply("<", &v("1")).is_some_and(|r| !r.as_bool()));
    }

    #[test]
    fn prefix_operators() {
        assert_eq!((-&v("5")).text(), "-5");
        assert_eq!((-&v("2.5f")).text(), "-2.5f");
        assert_eq!((!&v("0")).text(), "1");
        assert_eq!((!&v("\"\"")).text(), "1");
        assert_eq!(v("0").bit_not().text(), "-1");
    }
}
