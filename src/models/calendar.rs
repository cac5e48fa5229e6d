//! Planning calendar and week spans.
//!
//! The planning year is a sequence of weeks, each identified by its Monday.
//! Weeks are addressed by 0-based index; the first week is the first Monday
//! on or after January 1, and the last is the final Monday still inside the
//! year (52 weeks in most years, 53 in long ones).
//!
//! # Header Format
//! Week headers are rendered as `YYYY-MM-DDT00:00:00.000Z`. Override maps are
//! keyed by these exact strings, so the format is part of the wire contract.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::ops::Range;

use crate::error::ScheduleError;

/// Week slots in the load model.
pub const MODEL_WEEKS: usize = 53;

/// Weeks used to bound project start offsets.
pub const PLANNING_WEEKS: usize = 52;

/// A half-open run of weeks `[start, start + len)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSpan {
    /// First week index (inclusive).
    pub start: usize,
    /// Number of weeks.
    pub len: usize,
}

impl WeekSpan {
    /// Creates a span.
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    /// One past the last week (saturating).
    #[inline]
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.len)
    }

    /// Whether a week falls within this span.
    #[inline]
    pub fn contains(&self, week: usize) -> bool {
        week >= self.start && week < self.end()
    }

    /// Whether two spans share a week.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Week indices of this span below `bound`.
    pub fn clipped(&self, bound: usize) -> Range<usize> {
        self.start.min(bound)..self.end().min(bound)
    }
}

/// The weeks of one planning year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanningCalendar {
    /// Planning year.
    pub year: i32,
    /// Monday of each week, in order.
    pub mondays: Vec<NaiveDate>,
}

impl PlanningCalendar {
    /// Builds the calendar for a year.
    ///
    /// # Errors
    /// [`ScheduleError::InvalidYear`] if the year has no calendar representation.
    pub fn for_year(year: i32) -> Result<Self, ScheduleError> {
        let jan1 = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(ScheduleError::InvalidYear(year))?;
        let to_monday = (7 - jan1.weekday().num_days_from_monday() as i64) % 7;
        let first = jan1
            .checked_add_signed(Duration::days(to_monday))
            .ok_or(ScheduleError::InvalidYear(year))?;

        let mondays = (0..MODEL_WEEKS as i64)
            .map_while(|i| first.checked_add_signed(Duration::weeks(i)))
            .take_while(|d| d.year() == year)
            .collect();

        Ok(Self { year, mondays })
    }

    /// Number of weeks.
    #[inline]
    pub fn week_count(&self) -> usize {
        self.mondays.len()
    }

    /// Header strings for every week.
    pub fn headers(&self) -> Vec<String> {
        self.mondays.iter().map(|d| format_header(*d)).collect()
    }
}

/// Renders a Monday as a week header key.
pub fn format_header(date: NaiveDate) -> String {
    format!("{}T00:00:00.000Z", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_week_span() {
        let s = WeekSpan::new(10, 4);
        assert_eq!(s.end(), 14);
        assert!(s.contains(10));
        assert!(s.contains(13));
        assert!(!s.contains(14)); // exclusive end
        assert!(!s.contains(9));
    }

    #[test]
    fn test_week_span_overlap() {
        let a = WeekSpan::new(0, 4);
        assert!(a.overlaps(&WeekSpan::new(3, 2)));
        assert!(!a.overlaps(&WeekSpan::new(4, 2))); // touching
    }

    #[test]
    fn test_week_span_end_saturates() {
        let span = WeekSpan::new(usize::MAX - 1, 5);
        assert_eq!(span.end(), usize::MAX);
        assert!(span.clipped(MODEL_WEEKS).is_empty());
    }

    #[test]
    fn test_week_span_clipped() {
        assert_eq!(WeekSpan::new(50, 6).clipped(53), 50..53);
        assert_eq!(WeekSpan::new(60, 2).clipped(53), 53..53);
        assert_eq!(WeekSpan::new(0, 0).clipped(53), 0..0);
    }

    #[test]
    fn test_calendar_2026() {
        // Jan 1, 2026 is a Thursday.
        let cal = PlanningCalendar::for_year(2026).unwrap();
        assert_eq!(cal.week_count(), 52);
        assert_eq!(cal.mondays[0], NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        assert_eq!(cal.mondays[51], NaiveDate::from_ymd_opt(2026, 12, 28).unwrap());
        assert_eq!(cal.headers()[0], "2026-01-05T00:00:00.000Z");
    }

    #[test]
    fn test_calendar_long_year() {
        // Jan 1, 2024 is a Monday, and so is Dec 30.
        let cal = PlanningCalendar::for_year(2024).unwrap();
        assert_eq!(cal.week_count(), 53);
        assert_eq!(cal.mondays[0], NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(cal.mondays[52], NaiveDate::from_ymd_opt(2024, 12, 30).unwrap());
    }

    #[test]
    fn test_calendar_all_mondays() {
        let cal = PlanningCalendar::for_year(2025).unwrap();
        assert!(cal
            .mondays
            .iter()
            .all(|d| d.weekday() == chrono::Weekday::Mon && d.year() == 2025));
    }

    #[test]
    fn test_invalid_year() {
        assert!(matches!(
            PlanningCalendar::for_year(i32::MAX),
            Err(ScheduleError::InvalidYear(_))
        ));
    }
}
