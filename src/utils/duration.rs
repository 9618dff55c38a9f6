//! Human-readable elapsed-time strings for log lines.

use std::time::Duration;

const NANOS_PER_USEC: u128 = 1_000;
const NANOS_PER_MSEC: u128 = 1_000 * NANOS_PER_USEC;
const NANOS_PER_SEC: u128 = 1_000 * NANOS_PER_MSEC;
const NANOS_PER_MIN: u128 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: u128 = 60 * NANOS_PER_MIN;
const NANOS_PER_DAY: u128 = 24 * NANOS_PER_HOUR;

const UNITS: [(u128, &str, &str); 7] = [
    (NANOS_PER_DAY, "day", "days"),
    (NANOS_PER_HOUR, "hour", "hours"),
    (NANOS_PER_MIN, "min", "mins"),
    (NANOS_PER_SEC, "sec", "secs"),
    (NANOS_PER_MSEC, "msec", "msecs"),
    (NANOS_PER_USEC, "usec", "usecs"),
    (1, "nsec", "nsecs"),
];

pub fn format_duration(d: Duration) -> String {
    format_nanos_u128(d.as_nanos())
}

/// Largest whole unit, followed by the next smaller unit when it is non-zero.
///
/// The second unit is rounded to the nearest whole value (nanoseconds are
/// truncated). `format_nanos(61_000_000_000) == "1 min, 1 sec"`.
pub fn format_nanos(nanos: u64) -> String {
    format_nanos_u128(nanos as u128)
}

fn format_nanos_u128(n: u128) -> String {
    if n == 0 {
        return "no measurable elapsed time".to_string();
    }
    let idx = UNITS
        .iter()
        .position(|(size, _, _)| n >= *size)
        .unwrap_or(UNITS.len() - 1);
    let (size, one, many) = UNITS[idx];
    let Some(&(next, next_one, next_many)) = UNITS.get(idx + 1) else {
        return unit(n, one, many);
    };

    // rounding happens in the smaller unit so a carry lands in the larger one
    let modulus = size / next;
    let in_next = if next == 1 { n } else { (n + next / 2) / next };
    let mut out = unit(in_next / modulus, one, many);
    let rest = in_next % modulus;
    if rest > 0 {
        out.push_str(", ");
        out.push_str(&unit(rest, next_one, next_many));
    }
    out
}

fn unit(count: u128, one: &str, many: &str) -> String {
    format!("{} {}", count, if count == 1 { one } else { many })
}
