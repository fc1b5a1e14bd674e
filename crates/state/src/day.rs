//! UTC calendar-day arithmetic.
//!
//! Days are compared by their UTC year/month/day, never by elapsed time: 23:59 and 00:01 of the
//! following day are on different days.

use chrono::{DateTime, Days, NaiveDate, Utc};
use std::time::Duration;

/// Returns the UTC calendar date of `ts`.
pub fn utc_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.date_naive()
}

/// Returns true if both timestamps fall on the same UTC calendar day.
pub fn is_same_utc_day(a: DateTime<Utc>, b: DateTime<Utc>) -> bool {
    utc_date(a) == utc_date(b)
}

/// Returns true if `later` falls on the UTC calendar day directly after `earlier`.
pub fn is_previous_utc_day(earlier: DateTime<Utc>, later: DateTime<Utc>) -> bool {
    utc_date(earlier).checked_add_days(Days::new(1)) == Some(utc_date(later))
}

/// Returns the first instant of the UTC day after `now`.
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let tomorrow = utc_date(now).succ_opt().unwrap_or(NaiveDate::MAX);
    tomorrow.and_hms_opt(0, 0, 0).unwrap_or_default().and_utc()
}

/// Time left until the next UTC midnight.
pub fn until_reset(now: DateTime<Utc>) -> Duration {
    (next_utc_midnight(now) - now).to_std().unwrap_or_default()
}

#[cfg(test)]
pub(crate) fn at(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_day_is_calendar_based() {
        assert!(is_same_utc_day(at("2024-03-10T00:00:00Z"), at("2024-03-10T23:59:59Z")));
        assert!(!is_same_utc_day(at("2024-03-10T23:59:00Z"), at("2024-03-11T00:01:00Z")));
        // local offsets don't matter, only the UTC date
        assert!(is_same_utc_day(at("2024-03-10T23:30:00-02:00"), at("2024-03-11T03:00:00Z")));
    }

    #[test]
    fn previous_day() {
        assert!(is_previous_utc_day(at("2024-03-10T23:59:00Z"), at("2024-03-11T00:01:00Z")));
        assert!(is_previous_utc_day(at("2024-02-29T08:00:00Z"), at("2024-03-01T20:00:00Z")));
        assert!(is_previous_utc_day(at("2023-12-31T12:00:00Z"), at("2024-01-01T12:00:00Z")));
        assert!(!is_previous_utc_day(at("2024-03-10T01:00:00Z"), at("2024-03-10T02:00:00Z")));
        assert!(!is_previous_utc_day(at("2024-03-10T01:00:00Z"), at("2024-03-12T00:00:00Z")));
        assert!(!is_previous_utc_day(at("2024-03-11T01:00:00Z"), at("2024-03-10T02:00:00Z")));
    }

    #[test]
    fn reset_countdown() {
        let now = at("2024-03-10T22:30:15Z");
        assert_eq!(next_utc_midnight(now), at("2024-03-11T00:00:00Z"));
        assert_eq!(until_reset(now), Duration::from_secs(5385));
        assert_eq!(next_utc_midnight(at("2024-03-11T00:00:00Z")), at("2024-03-12T00:00:00Z"));
    }
}
