use chrono::NaiveDate;

use crate::storage::{DateRange, DateRangeError};

/// Number of days after today covered by the weekly newsletter.
pub const RELEASE_WINDOW_DAYS: u64 = 7;

/// Returns the release window `[today, today + days]`, both ends included.
pub fn upcoming_window(today: NaiveDate, days: u64) -> Result<DateRange, DateRangeError> {
    DateRange::forward(today, days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    #[test]
    fn test_window_boundaries() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let window = upcoming_window(today, RELEASE_WINDOW_DAYS).unwrap();

        let day = |offset: i64| {
            if offset >= 0 {
                today.checked_add_days(Days::new(offset as u64)).unwrap()
            } else {
                today.checked_sub_days(Days::new(offset.unsigned_abs())).unwrap()
            }
        };

        assert!(window.contains(day(0)));
        assert!(window.contains(day(7)));
        assert!(!window.contains(day(-1)));
        assert!(!window.contains(day(8)));
    }

    #[test]
    fn test_zero_day_window_is_today_only() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let window = upcoming_window(today, 0).unwrap();
        assert_eq!(window.start, window.end);
    }
}
