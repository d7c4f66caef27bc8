//! Domain model for a budgeting period (one calendar month).
use chrono::{Datelike, NaiveDate};
use std::fmt;

use super::budget::{MAX_BUDGET_YEAR, MIN_BUDGET_YEAR};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PeriodError {
    #[error("Month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
    #[error("Year {0} is outside the supported calendar range")]
    InvalidYear(i32),
    #[error("Year must be between 2000 and 2100, got {0}")]
    OutsideBudgetYears(i32),
}

/// Half-open date interval: `start` is included, `end` is excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }
}

/// A validated (month, year) pair.
///
/// The date bounds are computed once at construction so every later use is
/// infallible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    month: u32,
    year: i32,
    range: DateRange,
}

impl Period {
    pub fn new(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodError::InvalidMonth(month));
        }

        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or(PeriodError::InvalidYear(year))?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .ok_or(PeriodError::InvalidYear(year))?;

        Ok(Self {
            month,
            year,
            range: DateRange { start, end },
        })
    }

    /// A period budgets can exist for, with the year limited to the budget range
    pub fn for_budget(month: u32, year: i32) -> Result<Self, PeriodError> {
        if !(MIN_BUDGET_YEAR..=MAX_BUDGET_YEAR).contains(&year) {
            return Err(PeriodError::OutsideBudgetYears(year));
        }
        Self::new(month, year)
    }

    /// The period a given date falls into
    pub fn containing(date: NaiveDate) -> Result<Self, PeriodError> {
        Self::new(date.month(), date.year())
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn date_range(&self) -> DateRange {
        self.range
    }

    /// Zero-padded "MM/YYYY"
    pub fn label(&self) -> String {
        format!("{:02}/{}", self.month, self.year)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_range_mid_year() {
        let period = Period::new(1, 2026).unwrap();
        let range = period.date_range();
        assert_eq!(range.start, date(2026, 1, 1));
        assert_eq!(range.end, date(2026, 2, 1));
    }

    #[test]
    fn test_december_rolls_over_to_next_year() {
        let range = Period::new(12, 2025).unwrap().date_range();
        assert_eq!(range.start, date(2025, 12, 1));
        assert_eq!(range.end, date(2026, 1, 1));
    }

    #[test]
    fn test_range_is_half_open() {
        let range = Period::new(1, 2026).unwrap().date_range();
        assert!(range.contains(date(2026, 1, 1)));
        assert!(range.contains(date(2026, 1, 31)));
        assert!(!range.contains(date(2026, 2, 1)));
        assert!(!range.contains(date(2025, 12, 31)));
    }

    #[test]
    fn test_label_is_zero_padded() {
        assert_eq!(Period::new(1, 2026).unwrap().label(), "01/2026");
        assert_eq!(Period::new(11, 2026).unwrap().label(), "11/2026");
        assert_eq!(Period::new(3, 2026).unwrap().to_string(), "03/2026");
    }

    #[test]
    fn test_invalid_month_rejected() {
        assert_eq!(Period::new(0, 2026), Err(PeriodError::InvalidMonth(0)));
        assert_eq!(Period::new(13, 2026), Err(PeriodError::InvalidMonth(13)));
    }

    #[test]
    fn test_budget_period_limits_year() {
        assert!(Period::for_budget(1, 2000).is_ok());
        assert!(Period::for_budget(12, 2100).is_ok());
        assert_eq!(Period::for_budget(1, 1999), Err(PeriodError::OutsideBudgetYears(1999)));
        assert_eq!(Period::for_budget(1, 2101), Err(PeriodError::OutsideBudgetYears(2101)));
        assert_eq!(Period::for_budget(13, 2026), Err(PeriodError::InvalidMonth(13)));
        // plain periods still cover any representable year
        assert!(Period::new(1, 1999).is_ok());
    }

    #[test]
    fn test_containing_date() {
        let period = Period::containing(date(2026, 2, 28)).unwrap();
        assert_eq!(period.month(), 2);
        assert_eq!(period.year(), 2026);
    }
}
