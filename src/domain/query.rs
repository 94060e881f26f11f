//! Translation of a time-window request into a filter, sort and page spec.

use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::dates::{
    DateWindow, MonthSpan, calendar_components, explicit_bounds, month_range_bounds,
    month_window_bounds, year_bounds,
};

/// Default number of records per page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Client-side errors raised while building a catch-record query.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Month/year bounds are malformed.
    #[error("invalid range: {0}")]
    InvalidRange(String),
    /// A date string could not be parsed.
    #[error("invalid date: {0}")]
    InvalidDate(String),
    /// A parameter required by the selected mode is absent.
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),
}

/// How the time window of a query is expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    /// Every record, oldest first.
    All,
    ByYear(i32),
    /// Without `year` the months match in every year.
    ByMonthRange {
        start_month: u32,
        end_month: u32,
        year: Option<i32>,
    },
    /// Whole months from `start_year-start_month` through `end_year-end_month`.
    ByMonthWindow {
        start_year: i32,
        start_month: u32,
        end_year: i32,
        end_month: u32,
    },
    ByExplicitRange {
        start: String,
        end: String,
    },
}

/// Zero-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    page_size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// `page_size` must be at least one.
    pub fn new(page: u32, page_size: u32) -> Result<Self, QueryError> {
        if page_size == 0 {
            return Err(QueryError::InvalidRange(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self { page, page_size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Number of records preceding the page.
    pub fn skip(&self) -> u64 {
        u64::from(self.page) * u64::from(self.page_size)
    }

    /// Maximum number of records on the page.
    pub fn limit(&self) -> u64 {
        u64::from(self.page_size)
    }

    /// Cuts this page out of an already ordered list.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let skip = usize::try_from(self.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(self.limit()).unwrap_or(usize::MAX);
        items.into_iter().skip(skip).take(limit).collect()
    }
}

/// Filter on `week_end_date`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFilter {
    /// No restriction; evaluated by the store.
    Unbounded,
    /// Range on the stored date; evaluated by the store.
    Window(DateWindow),
    /// Month component within the span in any year; evaluated in memory.
    MonthsInAnyYear(MonthSpan),
}

impl DateFilter {
    pub fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::Unbounded => true,
            Self::Window(window) => window.contains(date),
            Self::MonthsInAnyYear(span) => span.contains_month(calendar_components(date).month),
        }
    }
}

/// Result ordering. Catch records are only ever listed oldest week first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    #[default]
    WeekEndDateAsc,
}

/// Fully resolved query specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordQuery {
    pub filter: DateFilter,
    pub sort: SortOrder,
    /// `None` returns every match.
    pub page: Option<PageRequest>,
}

impl RecordQuery {
    /// Builds the query for `mode`, validating its bounds.
    pub fn build(mode: &QueryMode, page: PageRequest) -> Result<Self, QueryError> {
        let filter = match mode {
            QueryMode::All => DateFilter::Unbounded,
            QueryMode::ByYear(year) => DateFilter::Window(year_bounds(*year)?),
            QueryMode::ByMonthRange {
                start_month,
                end_month,
                year: Some(year),
            } => DateFilter::Window(month_range_bounds(*start_month, *end_month, *year)?),
            QueryMode::ByMonthRange {
                start_month,
                end_month,
                year: None,
            } => DateFilter::MonthsInAnyYear(MonthSpan::new(*start_month, *end_month)?),
            QueryMode::ByMonthWindow {
                start_year,
                start_month,
                end_year,
                end_month,
            } => DateFilter::Window(month_window_bounds(
                *start_year,
                *start_month,
                *end_year,
                *end_month,
            )?),
            QueryMode::ByExplicitRange { start, end } => {
                DateFilter::Window(explicit_bounds(start, end)?)
            }
        };

        Ok(Self {
            filter,
            sort: SortOrder::WeekEndDateAsc,
            page: Some(page),
        })
    }

    /// Unpaginated any-year month query feeding the season chart.
    pub fn for_chart(start_month: u32, end_month: u32) -> Result<Self, QueryError> {
        Ok(Self {
            filter: DateFilter::MonthsInAnyYear(MonthSpan::new(start_month, end_month)?),
            sort: SortOrder::WeekEndDateAsc,
            page: None,
        })
    }

    /// Whether the store can evaluate filter and pagination itself.
    pub fn is_pushdown(&self) -> bool {
        matches!(self.filter, DateFilter::Window(_) | DateFilter::Unbounded)
    }
}
