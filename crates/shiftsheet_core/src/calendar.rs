//! Month-to-week splitting.
//!
//! Weeks are consecutive windows of at most seven days starting on day 1,
//! not ISO weeks: the last window of a month is usually shorter.

use chrono::NaiveDate;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

const WEEK_LENGTH: u32 = 7;

/// Invalid calendar input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    InvalidMonth { year: i32, month: u32 },
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidMonth { year, month } => {
                write!(f, "invalid month {month} for year {year}")
            }
        }
    }
}

impl Error for CalendarError {}

/// Inclusive date range of one week window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    /// Every date of the window, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.start
            .iter_days()
            .take_while(|date| *date <= self.end)
            .collect()
    }
}

/// Splits a month into windows `1-7`, `8-14`, … ending on its last day.
pub fn weeks_in_month(year: i32, month: u32) -> Result<Vec<WeekWindow>, CalendarError> {
    let last_day = last_day_of_month(year, month)?;
    let mut windows = Vec::new();
    let mut day = 1;
    while day <= last_day {
        let end_day = (day + WEEK_LENGTH - 1).min(last_day);
        windows.push(WeekWindow {
            start: date(year, month, day)?,
            end: date(year, month, end_day)?,
        });
        day += WEEK_LENGTH;
    }
    Ok(windows)
}

/// Number of days in the month.
pub fn last_day_of_month(year: i32, month: u32) -> Result<u32, CalendarError> {
    let first = date(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(CalendarError::InvalidMonth { year, month })?;
    Ok((next_first - first).num_days() as u32)
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(CalendarError::InvalidMonth { year, month })
}

#[cfg(test)]
mod tests {
    use super::{last_day_of_month, weeks_in_month, CalendarError};
    use chrono::NaiveDate;

    #[test]
    fn february_splits_into_four_full_weeks() {
        let weeks = weeks_in_month(2026, 2).unwrap();
        assert_eq!(weeks.len(), 4);
        assert_eq!(weeks[3].end, NaiveDate::from_ymd_opt(2026, 2, 28).unwrap());
    }

    #[test]
    fn last_window_is_shortened() {
        let weeks = weeks_in_month(2025, 3).unwrap();
        assert_eq!(weeks.len(), 5);
        let last = weeks[4];
        assert_eq!(last.start, NaiveDate::from_ymd_opt(2025, 3, 29).unwrap());
        assert_eq!(last.dates().len(), 3);
        assert_eq!(weeks[0].dates().len(), 7);
    }

    #[test]
    fn leap_years_and_december_are_handled() {
        assert_eq!(last_day_of_month(2024, 2).unwrap(), 29);
        assert_eq!(last_day_of_month(2025, 12).unwrap(), 31);
    }

    #[test]
    fn invalid_month_is_rejected() {
        assert_eq!(
            weeks_in_month(2025, 13).unwrap_err(),
            CalendarError::InvalidMonth {
                year: 2025,
                month: 13
            }
        );
    }
}
