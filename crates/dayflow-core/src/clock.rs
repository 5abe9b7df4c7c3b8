//! Wall-clock arithmetic on "HH:MM" strings.
//!
//! The whole day is local wall clock: times are minutes since midnight with
//! no timezone attached. Malformed time strings parse to 0 (midnight)
//! rather than erroring -- callers that need stricter validation do it at
//! the request boundary.

use chrono::{Datelike, NaiveDate};

/// Minutes in a full day.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse an "HH:MM" string into minutes since midnight.
///
/// Returns 0 for anything that is not a well-formed 24h time.
pub fn parse_hhmm(time: &str) -> u32 {
    let mut parts = time.split(':');
    let (Some(hours), Some(minutes), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };
    let (Ok(hours), Ok(minutes)) = (hours.parse::<u32>(), minutes.parse::<u32>()) else {
        return 0;
    };
    if hours >= 24 || minutes >= 60 {
        return 0;
    }
    hours * 60 + minutes
}

/// Format minutes since midnight as "HH:MM", wrapping past midnight.
pub fn format_hhmm(minutes: u32) -> String {
    let wrapped = minutes % MINUTES_PER_DAY;
    format!("{:02}:{:02}", wrapped / 60, wrapped % 60)
}

/// Add a signed offset to a time, wrapping around midnight in both
/// directions.
pub fn add_minutes(minutes: u32, delta: i32) -> u32 {
    let total = minutes as i64 + delta as i64;
    total.rem_euclid(MINUTES_PER_DAY as i64) as u32
}

/// Span in minutes from `start` to `end`, treating an end at or before the
/// start as wrapping into the next day. Used for overnight sleep windows.
pub fn span_minutes(start: u32, end: u32) -> u32 {
    if end > start {
        end - start
    } else {
        (MINUTES_PER_DAY - start) + end
    }
}

/// Day-of-week name for a local "YYYY-MM-DD" date key.
///
/// The date key is local wall clock, never UTC; "now" plays no part here.
pub fn day_of_week(date: &str) -> Option<String> {
    let parsed = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let name = match parsed.weekday().num_days_from_monday() {
        0 => "Monday",
        1 => "Tuesday",
        2 => "Wednesday",
        3 => "Thursday",
        4 => "Friday",
        5 => "Saturday",
        _ => "Sunday",
    };
    Some(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_times() {
        assert_eq!(parse_hhmm("00:00"), 0);
        assert_eq!(parse_hhmm("06:30"), 390);
        assert_eq!(parse_hhmm("23:59"), 1439);
    }

    #[test]
    fn malformed_times_parse_to_midnight() {
        assert_eq!(parse_hhmm(""), 0);
        assert_eq!(parse_hhmm("7am"), 0);
        assert_eq!(parse_hhmm("25:00"), 0);
        assert_eq!(parse_hhmm("12:60"), 0);
        assert_eq!(parse_hhmm("12:00:00"), 0);
        assert_eq!(parse_hhmm("-1:30"), 0);
    }

    #[test]
    fn formats_and_wraps() {
        assert_eq!(format_hhmm(390), "06:30");
        assert_eq!(format_hhmm(1440), "00:00");
        assert_eq!(format_hhmm(1500), "01:00");
    }

    #[test]
    fn add_minutes_wraps_both_ways() {
        assert_eq!(add_minutes(1430, 20), 10);
        assert_eq!(add_minutes(10, -20), 1430);
        assert_eq!(add_minutes(600, 45), 645);
    }

    #[test]
    fn span_handles_overnight() {
        // 22:00 -> 06:00 is an 8 hour sleep
        assert_eq!(span_minutes(1320, 360), 480);
        assert_eq!(span_minutes(360, 1320), 960);
        // equal start and end reads as a full day wrap
        assert_eq!(span_minutes(600, 600), MINUTES_PER_DAY);
    }

    #[test]
    fn weekday_from_date_key() {
        assert_eq!(day_of_week("2024-07-01").as_deref(), Some("Monday"));
        assert_eq!(day_of_week("2024-07-07").as_deref(), Some("Sunday"));
        assert_eq!(day_of_week("not-a-date"), None);
    }
}
