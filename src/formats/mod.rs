//! String format validators
//!
//! Implements the named syntactic rules referenced by schemas:
//! - `date`: `YYYY-MM-DD` with real month/day ranges and leap years
//! - `time`: `HH:MM:SS[.fraction][Z|±HH[:MM]]`, leap second allowed
//! - `date-time`: a `date`, a single `T` or whitespace separator, and a
//!   `time` with a mandatory timezone suffix
//!
//! All validators are pure predicates: malformed input returns `false`,
//! never panics. The comparison helpers order values lexicographically on
//! their zero-padded components and return `None` when either side does
//! not parse.

use regex::Regex;
use std::cmp::Ordering;
use std::sync::OnceLock;

static DATE_RE: OnceLock<Regex> = OnceLock::new();
static TIME_RE: OnceLock<Regex> = OnceLock::new();

fn date_re() -> &'static Regex {
    DATE_RE.get_or_init(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern"))
}

fn time_re() -> &'static Regex {
    TIME_RE.get_or_init(|| {
        Regex::new(r"(?i)^(\d{2}):(\d{2}):(\d{2})(\.\d+)?(z|[+-]\d{2}(?::?\d{2})?)?$")
            .expect("time pattern")
    })
}

/// Days per month, 1-indexed. February handled separately for leap years.
const DAYS: [u32; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

fn is_leap_year(year: u32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Parses an all-digit capture. Out-of-range sentinel on the (unreachable)
/// parse failure keeps the callers panic-free.
fn num(digits: &str) -> u32 {
    digits.parse().unwrap_or(u32::MAX)
}

/// Validates a full-date string (`YYYY-MM-DD`).
pub fn date(value: &str) -> bool {
    let Some(caps) = date_re().captures(value) else {
        return false;
    };
    let year = num(&caps[1]);
    let month = num(&caps[2]);
    let day = num(&caps[3]);

    if !(1..=12).contains(&month) {
        return false;
    }
    let max_day = if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS[month as usize]
    };
    day >= 1 && day <= max_day
}

/// Validates a full-time string (`HH:MM:SS[.fraction][Z|±HH[:MM]]`).
///
/// Accepts the leap-second value `23:59:60`. When `require_timezone` is
/// set, a timezone suffix (`Z` or a numeric offset) must be present.
pub fn time(value: &str, require_timezone: bool) -> bool {
    let Some(caps) = time_re().captures(value) else {
        return false;
    };
    let hour = num(&caps[1]);
    let minute = num(&caps[2]);
    let second = num(&caps[3]);
    let has_timezone = caps.get(5).is_some();

    let in_range = (hour <= 23 && minute <= 59 && second <= 59)
        || (hour == 23 && minute == 59 && second == 60);
    in_range && (!require_timezone || has_timezone)
}

/// Validates a date-time string: a `date` and a `time` (timezone required)
/// joined by exactly one `T` or whitespace separator.
pub fn date_time(value: &str) -> bool {
    let parts: Vec<&str> = value
        .split(|c: char| c == 'T' || c == 't' || c.is_whitespace())
        .collect();
    parts.len() == 2 && date(parts[0]) && time(parts[1], true)
}

/// Orders two full-date strings. `None` when either side is not a valid
/// date shape; the zero-padded format makes plain string order correct.
pub fn compare_date(a: &str, b: &str) -> Option<Ordering> {
    if !date_re().is_match(a) || !date_re().is_match(b) {
        return None;
    }
    Some(a.cmp(b))
}

/// Orders two full-time strings on their `HHMMSS[.fraction]` components,
/// ignoring the timezone suffix. `None` when either side does not parse.
pub fn compare_time(a: &str, b: &str) -> Option<Ordering> {
    let ca = time_re().captures(a)?;
    let cb = time_re().captures(b)?;

    let key = |caps: &regex::Captures<'_>| {
        let fraction = caps.get(4).map_or("", |m| m.as_str());
        format!("{}{}{}{}", &caps[1], &caps[2], &caps[3], fraction)
    };
    Some(key(&ca).cmp(&key(&cb)))
}

/// Orders two date-time strings: by date part, then by time part.
/// `None` when either side is not a well-formed date-time.
pub fn compare_date_time(a: &str, b: &str) -> Option<Ordering> {
    let split = |value: &'_ str| -> Option<(String, String)> {
        let parts: Vec<&str> = value
            .split(|c: char| c == 'T' || c == 't' || c.is_whitespace())
            .collect();
        if parts.len() == 2 {
            Some((parts[0].to_string(), parts[1].to_string()))
        } else {
            None
        }
    };
    let (da, ta) = split(a)?;
    let (db, tb) = split(b)?;

    match compare_date(&da, &db)? {
        Ordering::Equal => compare_time(&ta, &tb),
        ord => Some(ord),
    }
}
