use crate::{
    interpreter::value::core::Value,
    util::num::{i64_to_index, usize_to_i64},
};

/// `find(s, needle)` and `rfind(s, needle)`.
///
/// Returns the char index of the first (or last) occurrence, or `-1`.
///
/// # Example
/// ```
/// use cll::interpreter::{function::string::find, value::core::Value};
///
/// let args = [Value::new("\"banana\""), Value::new("\"an\"")];
///
/// assert_eq!(find(&args, false).text(), "1");
/// assert_eq!(find(&args, true).text(), "3");
/// assert_eq!(find(&[Value::new("\"abc\""), Value::new("'z'")], false).text(), "-1");
/// ```
#[must_use]
pub fn find(args: &[Value], reverse: bool) -> Value {
    let [haystack, needle, ..] = args else {
        return Value::int(-1);
    };
    let haystack = haystack.as_string();
    let needle = needle.as_string();

    let found = if reverse { haystack.rfind(&needle) } else { haystack.find(&needle) };

    Value::int(found.map_or(-1, |byte| usize_to_i64(haystack[..byte].chars().count())))
}

/// `substr(s, start[, len])`. Out-of-range parts are clipped.
///
/// # Example
/// ```
/// use cll::interpreter::{function::string::substr, value::core::Value};
///
/// let s = Value::new("\"hello\"");
///
/// assert_eq!(substr(&[s.clone(), Value::new("1"), Value::new("3")]).text(), "\"ell\"");
/// assert_eq!(substr(&[s.clone(), Value::new("3")]).text(), "\"lo\"");
/// assert_eq!(substr(&[s, Value::new("9")]).text(), "\"\"");
/// ```
#[must_use]
pub fn substr(args: &[Value]) -> Value {
    let Some(text) = args.first().map(Value::as_string) else {
        return Value::string("");
    };
    let start = args.get(1).and_then(|v| i64_to_index(v.as_int())).unwrap_or(0);
    let len = args.get(2).map_or(Some(usize::MAX), |v| i64_to_index(v.as_int())).unwrap_or(0);

    Value::string(&text.chars().skip(start).take(len).collect::<String>())
}

/// `strspn(s, accept)`: the length of the leading run of `s` made only of
/// chars found in `accept`.
#[must_use]
pub fn strspn(args: &[Value]) -> Value {
    let [text, accept, ..] = args else {
        return Value::int(0);
    };
    let accept = accept.as_string();
    let run = text.as_string().chars().take_while(|c| accept.contains(*c)).count();

    Value::int(usize_to_i64(run))
}
