use std::{
    sync::LazyLock,
    thread,
    time::{Duration, Instant},
};

use crate::interpreter::value::core::Value;

static START: LazyLock<Instant> = LazyLock::new(Instant::now);

/// Starts the clock read by `time`. Later calls have no effect.
pub fn start_clock() {
    LazyLock::force(&START);
}

/// `time([unit])`: time since the clock started.
///
/// Milliseconds by default; `"s"`, `"us"` and `"ns"` (or their long names)
/// select another unit.
#[must_use]
pub fn time(args: &[Value]) -> Value {
    let elapsed = START.elapsed();
    let unit = args.first().map(Value::as_string).unwrap_or_default();

    let count = match unit.as_str() {
        "s" | "seconds" => u128::from(elapsed.as_secs()),
        "us" | "microseconds" => elapsed.as_micros(),
        "ns" | "nanoseconds" => elapsed.as_nanos(),
        _ => elapsed.as_millis(),
    };

    Value::int(i64::try_from(count).unwrap_or(i64::MAX))
}

/// `sleep(ms)`: blocks the thread. Returns nothing.
#[must_use]
pub fn sleep(args: &[Value]) -> Value {
    if let Some(ms) = args.first().and_then(|v| u64::try_from(v.as_int()).ok()) {
        thread::sleep(Duration::from_millis(ms));
    }
    Value::empty()
}
