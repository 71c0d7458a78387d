//! Calendar-day helpers. Every function takes the local wall-clock time as an
//! argument so callers decide where "now" comes from.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Weekday};

pub fn today(now: NaiveDateTime) -> NaiveDate {
    now.date()
}

pub fn yesterday(now: NaiveDateTime) -> NaiveDate {
    now.date() - Duration::days(1)
}

pub fn is_friday(now: NaiveDateTime) -> bool {
    now.weekday() == Weekday::Fri
}

/// Time left until the next local midnight. Exactly at midnight this is a
/// full day.
pub fn until_midnight(now: NaiveDateTime) -> Duration {
    let next = (now.date() + Duration::days(1)).and_time(chrono::NaiveTime::MIN);
    next - now
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    #[test]
    fn today_ignores_time_of_day() {
        let morning = at(2026, 1, 5, 0, 0, 1);
        let night = at(2026, 1, 5, 23, 59, 59);
        assert_eq!(today(morning), today(night));
        assert_eq!(today(morning), NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
    }

    #[test]
    fn yesterday_crosses_month_and_year() {
        let now = at(2026, 1, 1, 9, 0, 0);
        assert_eq!(yesterday(now), NaiveDate::from_ymd_opt(2025, 12, 31).unwrap());
    }

    #[test]
    fn friday_detection() {
        // 2026-01-09 is a Friday
        assert!(is_friday(at(2026, 1, 9, 12, 0, 0)));
        assert!(!is_friday(at(2026, 1, 10, 12, 0, 0)));
        assert!(!is_friday(at(2026, 1, 5, 12, 0, 0)));
    }

    #[test]
    fn until_midnight_counts_down() {
        assert_eq!(until_midnight(at(2026, 1, 5, 23, 59, 30)), Duration::seconds(30));
        assert_eq!(until_midnight(at(2026, 1, 5, 12, 0, 0)), Duration::hours(12));
        assert_eq!(until_midnight(at(2026, 1, 5, 0, 0, 0)), Duration::days(1));
    }
}
