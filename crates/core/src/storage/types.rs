use chrono::{Days, NaiveDate};

use super::DateRangeError;

/// A date range with inclusive start and end dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a new date range, validating that start <= end.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::InvalidRange);
        }
        Ok(Self { start, end })
    }

    /// Creates the range `[start, start + days]`.
    pub fn forward(start: NaiveDate, days: u64) -> Result<Self, DateRangeError> {
        let end = start
            .checked_add_days(Days::new(days))
            .ok_or(DateRangeError::InvalidRange)?;
        Self::new(start, end)
    }

    /// Returns true if `date` lies within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_valid_range_construction() {
        let range = DateRange::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();

        assert_eq!(range.start, date(2024, 1, 1));
        assert_eq!(range.end, date(2024, 1, 31));
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let range = DateRange::new(date(2024, 6, 15), date(2024, 6, 15)).unwrap();
        assert!(range.contains(date(2024, 6, 15)));
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(date(2024, 1, 31), date(2024, 1, 1));
        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_forward_crosses_month_boundary() {
        let range = DateRange::forward(date(2024, 1, 28), 7).unwrap();
        assert_eq!(range.end, date(2024, 2, 4));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let range = DateRange::forward(date(2024, 3, 1), 7).unwrap();

        assert!(range.contains(date(2024, 3, 1)));
        assert!(range.contains(date(2024, 3, 8)));
        assert!(!range.contains(date(2024, 2, 29)));
        assert!(!range.contains(date(2024, 3, 9)));
    }
}
