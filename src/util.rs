//! Small utility helpers: the clock abstraction and timestamp formatting.
//!
//! Every timestamp in `satchel` is milliseconds since the Unix epoch. Going through
//! [`Clock`] instead of reading the system time directly keeps debounce windows
//! and container timestamps deterministic in tests.

use std::cell::Cell;

use chrono::{TimeZone, Utc};

/// Source of "now" in epoch milliseconds.
pub trait Clock {
    /// Current time in milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Hand-driven clock for tests and replay tools.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<i64>,
}

impl ManualClock {
    /// Start the clock at `start` milliseconds.
    #[must_use]
    pub const fn new(start: i64) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    /// Move the clock forward by `millis`.
    pub fn advance(&self, millis: i64) {
        self.now.set(self.now.get() + millis);
    }

    /// Jump to an absolute time.
    pub fn set(&self, millis: i64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> i64 {
        self.now.get()
    }
}

/// What: Convert epoch milliseconds to a `YYYY-MM-DD HH:MM:SS` UTC string.
///
/// Inputs:
/// - `millis`: Timestamp, or a negative sentinel such as `-1`
///
/// Output:
/// - Formatted date, `"never"` for negative sentinels
#[must_use]
pub fn ms_to_date(millis: i64) -> String {
    if millis < 0 {
        return "never".to_string();
    }
    Utc.timestamp_millis_opt(millis)
        .single()
        .map_or_else(|| millis.to_string(), |dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances() {
        let clock = ManualClock::new(1_000);
        clock.advance(250);
        assert_eq!(clock.now_millis(), 1_250);
        clock.set(5);
        assert_eq!(clock.now_millis(), 5);
    }

    #[test]
    fn ms_to_date_formats_utc_and_sentinel() {
        assert_eq!(ms_to_date(0), "1970-01-01 00:00:00");
        assert_eq!(ms_to_date(1_700_000_000_000), "2023-11-14 22:13:20");
        assert_eq!(ms_to_date(-1), "never");
    }
}
