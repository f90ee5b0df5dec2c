//! Pay-rate constants for the salary calculator.

use chrono::{Duration, NaiveTime};

pub type Numeric = f64;

pub const MINIMUM_WAGE: Numeric = 29.12;
// Revisit once holiday calendars are supported.
pub const ISRAELI_JEWISH: i64 = 1;
pub const REGULAR_HOUR_BASIS: Numeric = 8.0;
pub const FIRST_OVERTIME_AMOUNT: Numeric = 2.0;
pub const FIRST_OVERTIME_PAY: Numeric = 1.25;
pub const SECOND_OVERTIME_PAY: Numeric = 1.50;
pub const NIGHT_HOUR_BASIS: Numeric = 7.0;
pub const NIGHT_START_HOUR: u32 = 22;
pub const NIGHT_END_HOUR: u32 = 6;
pub const NIGHT_MIN_LEN_HOURS: i64 = 2;
pub const WEEK_WORKING_HOURS: Numeric = 42.0;
pub const STANDARD_TRANSPORT: Numeric = 11.8;
pub const MAXIMUM_TRANSPORT: Numeric = 22.6;

pub const OFF_DAY_ADDITION: Numeric = 0.5;
/// Weekday index of Saturday, Monday being 0.
pub const SATURDAY: u32 = 5;
pub const HOURS_SECONDS_RATIO: i64 = 3600;

pub const HOUR_FORMAT: &str = "%H:%M:%S";
pub const ALT_HOUR_FORMAT: &str = "%H:%M";

fn on_the_hour(hour: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN)
}

/// 22:00
pub fn night_start() -> NaiveTime {
    on_the_hour(NIGHT_START_HOUR)
}

/// 06:00
pub fn night_end() -> NaiveTime {
    on_the_hour(NIGHT_END_HOUR)
}

/// Shortest shift span that counts as a night shift.
pub fn night_min_len() -> Duration {
    Duration::hours(NIGHT_MIN_LEN_HOURS)
}

/// Whether a wall-clock time falls in the night window, which wraps midnight.
pub fn is_night_time(time: NaiveTime) -> bool {
    time >= night_start() || time < night_end()
}

/// Parse `HH:MM:SS`, falling back to `HH:MM`.
pub fn parse_hour(text: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(text, HOUR_FORMAT)
        .or_else(|_| NaiveTime::parse_from_str(text, ALT_HOUR_FORMAT))
        .ok()
}
