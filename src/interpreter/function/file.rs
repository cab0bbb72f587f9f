use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::Path,
};

use crate::interpreter::value::core::Value;

fn path_of(args: &[Value]) -> Option<String> {
    args.first().map(Value::as_string).filter(|path| !path.is_empty())
}

/// `fopen(path)`: the file's lines as an array of strings, or `[]` if the
/// file cannot be read.
#[must_use]
pub fn fopen(args: &[Value]) -> Value {
    let Some(content) = path_of(args).and_then(|path| fs::read_to_string(path).ok()) else {
        return Value::array(&[]);
    };

    let lines: Vec<Value> = content.lines().map(Value::string).collect();
    Value::array(&lines)
}

/// `fwrite(path, text)` and `fappend(path, text)`. Returns `1` on success.
#[must_use]
pub fn write(args: &[Value], append: bool) -> Value {
    let (Some(path), Some(text)) = (path_of(args), args.get(1)) else {
        return Value::boolean(false);
    };

    let written = OpenOptions::new().create(true)
                                    .write(true)
                                    .append(append)
                                    .truncate(!append)
                                    .open(&path)
                                    .and_then(|mut file| file.write_all(text.as_string().as_bytes()));

    if let Err(e) = &written {
        tracing::debug!(path = %path, error = %e, "file write failed");
    }
    Value::boolean(written.is_ok())
}

/// `fexist(path)`: `1` if the path exists.
#[must_use]
pub fn fexist(args: &[Value]) -> Value {
    Value::boolean(path_of(args).is_some_and(|path| Path::new(&path).exists()))
}
