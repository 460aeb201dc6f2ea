//! Time-of-day arithmetic for shift windows.
//!
//! Shift details store an entry time and a duration in minutes; the exit
//! time is always derived. Durations may carry the exit past midnight, in
//! which case the exit wraps onto the next day's clock.

use chrono::{NaiveTime, Timelike};

/// Minutes in a day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Minutes elapsed since midnight, `0..=1439`. Seconds are ignored.
pub fn to_minutes(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Builds a time of day from a minute offset, wrapping past midnight.
pub fn from_minutes(minutes: u32) -> NaiveTime {
    let minutes = minutes % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(minutes / 60, minutes % 60, 0).unwrap_or_default()
}

/// Exit time of a window that starts at `entry` and lasts `duration_minutes`.
///
/// ```rust
/// use chrono::NaiveTime;
/// use shiftwise::libs::time_math::exit_time;
///
/// let entry = NaiveTime::from_hms_opt(22, 0, 0).unwrap();
/// assert_eq!(exit_time(entry, 480), NaiveTime::from_hms_opt(6, 0, 0).unwrap());
/// ```
pub fn exit_time(entry: NaiveTime, duration_minutes: u32) -> NaiveTime {
    from_minutes(to_minutes(entry) + duration_minutes)
}

/// Minutes from `entry` to `exit`, assuming an exit earlier than the entry
/// falls on the next day.
///
/// Identical times yield zero, which callers reject as an empty window.
pub fn duration_between(entry: NaiveTime, exit: NaiveTime) -> u32 {
    let entry = to_minutes(entry);
    let mut exit = to_minutes(exit);
    if exit < entry {
        exit += MINUTES_PER_DAY;
    }
    exit - entry
}

/// Parses an `HH:MM` (or `HH:MM:SS`) time of day.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    NaiveTime::parse_from_str(raw, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
        .ok()
}
