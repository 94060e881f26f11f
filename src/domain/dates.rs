//! Calendar helpers for catch-record week-end dates.
//!
//! Computed windows (whole years, month ranges) are half-open so that the
//! first instant of the following period is never double-counted. Windows
//! built from user-supplied bounds are closed on both ends.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::query::QueryError;
use crate::domain::types::Month;

/// Calendar parts of a week-end date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Date interval used as a range filter on `week_end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateWindow {
    /// `[start, end)`
    HalfOpen { start: NaiveDate, end: NaiveDate },
    /// `[start, end]`
    Closed { start: NaiveDate, end: NaiveDate },
}

impl DateWindow {
    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        match *self {
            Self::HalfOpen { start, end } => start <= date && date < end,
            Self::Closed { start, end } => start <= date && date <= end,
        }
    }
}

/// Inclusive range of calendar months, independent of year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthSpan {
    start: Month,
    end: Month,
}

impl MonthSpan {
    /// Validates `start_month <= end_month`, both within 1-12.
    pub fn new(start_month: u32, end_month: u32) -> Result<Self, QueryError> {
        let start = Month::new(start_month).map_err(|e| QueryError::InvalidRange(e.to_string()))?;
        let end = Month::new(end_month).map_err(|e| QueryError::InvalidRange(e.to_string()))?;
        if start > end {
            return Err(QueryError::InvalidRange(format!(
                "start month {start} is after end month {end}"
            )));
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> Month {
        self.start
    }

    pub fn end(&self) -> Month {
        self.end
    }

    /// Whether `month` lies within the span, boundaries included.
    pub fn contains_month(&self, month: u32) -> bool {
        self.start.get() <= month && month <= self.end.get()
    }
}

/// Splits a date into its calendar components.
pub fn calendar_components(date: NaiveDate) -> CalendarComponents {
    CalendarComponents {
        year: date.year(),
        month: date.month(),
        day: date.day(),
    }
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, QueryError> {
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| QueryError::InvalidRange(format!("year {year} is out of range")))
}

/// `[Jan 1 of year, Jan 1 of year + 1)`.
pub fn year_bounds(year: i32) -> Result<DateWindow, QueryError> {
    let next = year
        .checked_add(1)
        .ok_or_else(|| QueryError::InvalidRange(format!("year {year} is out of range")))?;
    Ok(DateWindow::HalfOpen {
        start: first_of_month(year, 1)?,
        end: first_of_month(next, 1)?,
    })
}

/// `[first day of start_month, first day of the month after end_month)` in `year`.
pub fn month_range_bounds(
    start_month: u32,
    end_month: u32,
    year: i32,
) -> Result<DateWindow, QueryError> {
    let span = MonthSpan::new(start_month, end_month)?;
    Ok(DateWindow::HalfOpen {
        start: first_of_month(year, span.start().get())?,
        end: first_of_following_month(year, span.end())?,
    })
}

/// `[first day of start_year-start_month, first day of the month after end_year-end_month)`.
///
/// Unlike [`month_range_bounds`] the window may cross year boundaries.
pub fn month_window_bounds(
    start_year: i32,
    start_month: u32,
    end_year: i32,
    end_month: u32,
) -> Result<DateWindow, QueryError> {
    let first = Month::new(start_month).map_err(|e| QueryError::InvalidRange(e.to_string()))?;
    let last = Month::new(end_month).map_err(|e| QueryError::InvalidRange(e.to_string()))?;
    if (start_year, first.get()) > (end_year, last.get()) {
        return Err(QueryError::InvalidRange(format!(
            "start {start_year}-{start_month:02} is after end {end_year}-{end_month:02}"
        )));
    }
    Ok(DateWindow::HalfOpen {
        start: first_of_month(start_year, first.get())?,
        end: first_of_following_month(end_year, last)?,
    })
}

fn first_of_following_month(year: i32, month: Month) -> Result<NaiveDate, QueryError> {
    if month.get() == 12 {
        let next = year
            .checked_add(1)
            .ok_or_else(|| QueryError::InvalidRange(format!("year {year} is out of range")))?;
        first_of_month(next, 1)
    } else {
        first_of_month(year, month.get() + 1)
    }
}

/// `[start, end]` from user-supplied date strings.
pub fn explicit_bounds(start: &str, end: &str) -> Result<DateWindow, QueryError> {
    let start = parse_date(start)?;
    let end = parse_date(end)?;
    if start > end {
        return Err(QueryError::InvalidRange(format!(
            "start date {start} is after end date {end}"
        )));
    }
    Ok(DateWindow::Closed { start, end })
}

/// Parses a user-supplied date, accepting ISO as well as the legacy encodings.
pub fn parse_date(value: &str) -> Result<NaiveDate, QueryError> {
    parse_legacy_date(value)
}

/// Normalizes the week-end date encodings found in historical data.
///
/// Accepted forms:
/// - `YYYY-MM-DD`, optionally followed by a `T` time part
/// - `MM/DD/YYYY`
/// - `YYYY/MM/DD`
/// - `YY/MM/DD`, read as 20YY
pub fn parse_legacy_date(value: &str) -> Result<NaiveDate, QueryError> {
    let trimmed = value.trim();
    let invalid = || QueryError::InvalidDate(value.to_string());

    if trimmed.contains('-') {
        let date_part = trimmed.split('T').next().unwrap_or(trimmed);
        return NaiveDate::parse_from_str(date_part, "%Y-%m-%d").map_err(|_| invalid());
    }

    let parts: Vec<&str> = trimmed.split('/').collect();
    let &[first, second, third] = parts.as_slice() else {
        return Err(invalid());
    };
    if [first, second, third]
        .iter()
        .any(|part| part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()))
    {
        return Err(invalid());
    }

    let number = |part: &str| part.parse::<u32>().map_err(|_| invalid());

    let (year, month, day) = match (first.len(), second.len(), third.len()) {
        (1..=2, 1..=2, 4) => (number(third)? as i32, number(first)?, number(second)?),
        (4, 1..=2, 1..=2) => (number(first)? as i32, number(second)?, number(third)?),
        (2, 1..=2, 1..=2) => (2000 + number(first)? as i32, number(second)?, number(third)?),
        _ => return Err(invalid()),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn calendar_components_split_dates() {
        assert_eq!(
            calendar_components(date(2019, 3, 10)),
            CalendarComponents {
                year: 2019,
                month: 3,
                day: 10
            }
        );
    }

    #[test]
    fn year_bounds_are_half_open() {
        let window = year_bounds(2019).unwrap();
        assert_eq!(
            window,
            DateWindow::HalfOpen {
                start: date(2019, 1, 1),
                end: date(2020, 1, 1)
            }
        );
        assert!(window.contains(date(2019, 1, 1)));
        assert!(window.contains(date(2019, 12, 31)));
        assert!(!window.contains(date(2020, 1, 1)));
        assert!(!window.contains(date(2018, 12, 31)));
    }

    #[test]
    fn month_range_ends_on_first_of_following_month() {
        let window = month_range_bounds(1, 6, 2019).unwrap();
        assert_eq!(
            window,
            DateWindow::HalfOpen {
                start: date(2019, 1, 1),
                end: date(2019, 7, 1)
            }
        );
        assert!(window.contains(date(2019, 6, 30)));
        assert!(!window.contains(date(2019, 7, 1)));
    }

    #[test]
    fn december_range_rolls_into_next_year() {
        let window = month_range_bounds(11, 12, 2019).unwrap();
        assert!(window.contains(date(2019, 12, 31)));
        assert!(!window.contains(date(2020, 1, 1)));
    }

    #[test]
    fn leap_february_is_fully_covered() {
        let window = month_range_bounds(2, 2, 2020).unwrap();
        assert!(window.contains(date(2020, 2, 29)));
        assert!(!window.contains(date(2020, 3, 1)));
    }

    #[test]
    fn month_range_rejects_inverted_or_out_of_range_months() {
        assert!(matches!(
            month_range_bounds(7, 3, 2019),
            Err(QueryError::InvalidRange(_))
        ));
        assert!(matches!(
            month_range_bounds(0, 3, 2019),
            Err(QueryError::InvalidRange(_))
        ));
        assert!(matches!(
            month_range_bounds(1, 13, 2019),
            Err(QueryError::InvalidRange(_))
        ));
    }

    #[test]
    fn month_window_crosses_years() {
        let window = month_window_bounds(2019, 11, 2020, 2).unwrap();
        assert_eq!(
            window,
            DateWindow::HalfOpen {
                start: date(2019, 11, 1),
                end: date(2020, 3, 1),
            }
        );
        assert!(window.contains(date(2019, 12, 31)));
        assert!(window.contains(date(2020, 2, 29)));
        assert!(!window.contains(date(2020, 3, 1)));
    }

    #[test]
    fn month_window_ending_in_december_rolls_over() {
        let window = month_window_bounds(2019, 12, 2019, 12).unwrap();
        assert_eq!(
            window,
            DateWindow::HalfOpen {
                start: date(2019, 12, 1),
                end: date(2020, 1, 1),
            }
        );
    }

    #[test]
    fn month_window_rejects_inverted_or_invalid_bounds() {
        assert!(matches!(
            month_window_bounds(2020, 1, 2019, 12),
            Err(QueryError::InvalidRange(_))
        ));
        assert!(matches!(
            month_window_bounds(2019, 5, 2019, 4),
            Err(QueryError::InvalidRange(_))
        ));
        assert!(matches!(
            month_window_bounds(2019, 0, 2019, 4),
            Err(QueryError::InvalidRange(_))
        ));
        assert!(matches!(
            month_window_bounds(2019, 1, 2019, 13),
            Err(QueryError::InvalidRange(_))
        ));
    }

    #[test]
    fn explicit_bounds_are_closed() {
        let window = explicit_bounds("2019-03-10", "2019-03-10").unwrap();
        assert_eq!(
            window,
            DateWindow::Closed {
                start: date(2019, 3, 10),
                end: date(2019, 3, 10)
            }
        );
        assert!(window.contains(date(2019, 3, 10)));
        assert!(!window.contains(date(2019, 3, 11)));
    }

    #[test]
    fn explicit_bounds_reject_garbage_and_inverted_ranges() {
        assert_eq!(
            explicit_bounds("not a date", "2019-03-10").unwrap_err(),
            QueryError::InvalidDate("not a date".to_string())
        );
        assert_eq!(
            explicit_bounds("2019-02-30", "2019-03-10").unwrap_err(),
            QueryError::InvalidDate("2019-02-30".to_string())
        );
        assert!(matches!(
            explicit_bounds("2019-03-11", "2019-03-10"),
            Err(QueryError::InvalidRange(_))
        ));
    }

    #[test]
    fn legacy_formats_normalize_to_the_same_calendar_day() {
        let expected = CalendarComponents {
            year: 2019,
            month: 3,
            day: 10,
        };
        for raw in [
            "03/10/2019",
            "3/10/2019",
            "2019/03/10",
            "19/03/10",
            "2019-03-10",
            "2019-03-10T00:00:00.000Z",
            " 03/10/2019 ",
        ] {
            let parsed = parse_legacy_date(raw).unwrap();
            assert_eq!(calendar_components(parsed), expected, "input {raw}");
        }
    }

    #[test]
    fn legacy_round_trip_matches_manual_parse() {
        for raw in ["12/31/2015", "01/01/2016", "07/22/2019", "02/29/2020"] {
            let manual: Vec<u32> = raw.split('/').map(|p| p.parse().unwrap()).collect();
            let parsed = calendar_components(parse_legacy_date(raw).unwrap());
            assert_eq!(
                (parsed.month, parsed.day, parsed.year),
                (manual[0], manual[1], manual[2] as i32)
            );
        }
    }

    #[test]
    fn legacy_parse_rejects_ambiguous_or_impossible_values() {
        for raw in ["", "2019", "03/10", "1/2/3", "02/30/2019", "ab/cd/efgh", "03/10/201"] {
            assert!(
                matches!(parse_legacy_date(raw), Err(QueryError::InvalidDate(_))),
                "input {raw}"
            );
        }
    }

    #[test]
    fn month_span_includes_boundaries() {
        let span = MonthSpan::new(3, 5).unwrap();
        assert!(span.contains_month(3));
        assert!(span.contains_month(5));
        assert!(!span.contains_month(2));
        assert!(!span.contains_month(6));
    }
}
