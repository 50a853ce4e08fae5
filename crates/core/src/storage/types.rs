use chrono::NaiveDate;

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

    /// Creates a range covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// Creates a range from `start` through `start + days` inclusive.
    ///
    /// Used by the this-week listing (tomorrow + 6) and the digest
    /// (today + 7).
    pub fn spanning_days(start: NaiveDate, days: u32) -> Self {
        Self {
            start,
            end: start + chrono::Duration::days(i64::from(days)),
        }
    }

    /// Returns true if the date falls inside the range.
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
        let range = DateRange::new(date(2025, 1, 1), date(2025, 1, 31)).unwrap();
        assert_eq!(range.start, date(2025, 1, 1));
        assert_eq!(range.end, date(2025, 1, 31));
    }

    #[test]
    fn test_same_day_range_is_valid() {
        let range = DateRange::new(date(2025, 6, 15), date(2025, 6, 15)).unwrap();
        assert_eq!(range.start, range.end);
    }

    #[test]
    fn test_invalid_range_returns_error() {
        let result = DateRange::new(date(2025, 2, 1), date(2025, 1, 31));
        assert_eq!(result, Err(DateRangeError::InvalidRange));
    }

    #[test]
    fn test_single_day() {
        let range = DateRange::single_day(date(2025, 3, 14));
        assert_eq!(range.start, date(2025, 3, 14));
        assert_eq!(range.end, date(2025, 3, 14));
        assert!(range.contains(date(2025, 3, 14)));
        assert!(!range.contains(date(2025, 3, 15)));
    }

    #[test]
    fn test_spanning_days_crosses_month_boundary() {
        let range = DateRange::spanning_days(date(2025, 2, 26), 7);
        assert_eq!(range.end, date(2025, 3, 5));
        assert!(range.contains(date(2025, 3, 1)));
    }
}
