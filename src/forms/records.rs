//! Query-string forms accepted by the record and chart endpoints.

use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::query::{DEFAULT_PAGE_SIZE, PageRequest, QueryError, QueryMode};

/// Largest page the API will serve in one response.
pub const MAX_PAGE_SIZE: u32 = 500;

#[derive(Debug, Error)]
pub enum RecordsQueryFormError {
    #[error("missing required parameter: {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("invalid parameters: {0}")]
    Validation(String),
}

impl From<ValidationErrors> for RecordsQueryFormError {
    fn from(val: ValidationErrors) -> Self {
        RecordsQueryFormError::Validation(val.to_string())
    }
}

/// Parameters of one record query after form parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordsQuery {
    pub mode: QueryMode,
    /// Name as supplied; names no vessel can carry simply match nothing.
    pub vessel: Option<String>,
    pub page: PageRequest,
}

/// Blank vessel parameters mean "all vessels".
fn vessel_filter(raw: Option<String>) -> Option<String> {
    raw.filter(|name| !name.trim().is_empty())
}

fn page_request(page: Option<u32>, page_size: Option<u32>) -> Result<PageRequest, QueryError> {
    PageRequest::new(
        page.unwrap_or_default(),
        page_size.unwrap_or(DEFAULT_PAGE_SIZE),
    )
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct YearRecordsForm {
    pub year: Option<i32>,
    pub vessel: Option<String>,
    pub page: Option<u32>,
    #[validate(range(max = MAX_PAGE_SIZE))]
    pub page_size: Option<u32>,
}

impl YearRecordsForm {
    pub fn parse(self) -> Result<RecordsQuery, RecordsQueryFormError> {
        self.validate()?;
        let year = self.year.ok_or(RecordsQueryFormError::Missing("year"))?;
        Ok(RecordsQuery {
            mode: QueryMode::ByYear(year),
            vessel: vessel_filter(self.vessel),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonthRecordsForm {
    pub start_month: Option<u32>,
    pub end_month: Option<u32>,
    pub year: Option<i32>,
    pub vessel: Option<String>,
    pub page: Option<u32>,
    #[validate(range(max = MAX_PAGE_SIZE))]
    pub page_size: Option<u32>,
}

impl MonthRecordsForm {
    pub fn parse(self) -> Result<RecordsQuery, RecordsQueryFormError> {
        self.validate()?;
        let start_month = self
            .start_month
            .ok_or(RecordsQueryFormError::Missing("startMonth"))?;
        let end_month = self
            .end_month
            .ok_or(RecordsQueryFormError::Missing("endMonth"))?;
        Ok(RecordsQuery {
            mode: QueryMode::ByMonthRange {
                start_month,
                end_month,
                year: self.year,
            },
            vessel: vessel_filter(self.vessel),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RangeRecordsForm {
    #[validate(length(min = 1))]
    pub start_date: Option<String>,
    #[validate(length(min = 1))]
    pub end_date: Option<String>,
    pub vessel: Option<String>,
    pub page: Option<u32>,
    #[validate(range(max = MAX_PAGE_SIZE))]
    pub page_size: Option<u32>,
}

impl RangeRecordsForm {
    pub fn parse(self) -> Result<RecordsQuery, RecordsQueryFormError> {
        self.validate()?;
        let start = self
            .start_date
            .ok_or(RecordsQueryFormError::Missing("startDate"))?;
        let end = self
            .end_date
            .ok_or(RecordsQueryFormError::Missing("endDate"))?;
        Ok(RecordsQuery {
            mode: QueryMode::ByExplicitRange { start, end },
            vessel: vessel_filter(self.vessel),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MonthWindowRecordsForm {
    pub start_year: Option<i32>,
    pub start_month: Option<u32>,
    pub end_year: Option<i32>,
    pub end_month: Option<u32>,
    pub vessel: Option<String>,
    pub page: Option<u32>,
    #[validate(range(max = MAX_PAGE_SIZE))]
    pub page_size: Option<u32>,
}

impl MonthWindowRecordsForm {
    pub fn parse(self) -> Result<RecordsQuery, RecordsQueryFormError> {
        self.validate()?;
        let start_year = self
            .start_year
            .ok_or(RecordsQueryFormError::Missing("startYear"))?;
        let start_month = self
            .start_month
            .ok_or(RecordsQueryFormError::Missing("startMonth"))?;
        let end_year = self
            .end_year
            .ok_or(RecordsQueryFormError::Missing("endYear"))?;
        let end_month = self
            .end_month
            .ok_or(RecordsQueryFormError::Missing("endMonth"))?;
        Ok(RecordsQuery {
            mode: QueryMode::ByMonthWindow {
                start_year,
                start_month,
                end_year,
                end_month,
            },
            vessel: vessel_filter(self.vessel),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

/// Unfiltered listing, optionally narrowed to one vessel.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AllRecordsForm {
    pub vessel: Option<String>,
    pub page: Option<u32>,
    #[validate(range(max = MAX_PAGE_SIZE))]
    pub page_size: Option<u32>,
}

impl AllRecordsForm {
    pub fn parse(self) -> Result<RecordsQuery, RecordsQueryFormError> {
        self.validate()?;
        Ok(RecordsQuery {
            mode: QueryMode::All,
            vessel: vessel_filter(self.vessel),
            page: page_request(self.page, self.page_size)?,
        })
    }
}

/// Parameters of the season chart after form parsing.
#[derive(Debug, Clone, PartialEq)]
pub struct SeasonChartQuery {
    pub start_month: u32,
    pub end_month: u32,
    pub vessel: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SeasonChartForm {
    pub start_month: Option<u32>,
    pub end_month: Option<u32>,
    pub vessel: Option<String>,
}

impl SeasonChartForm {
    pub fn parse(self) -> Result<SeasonChartQuery, RecordsQueryFormError> {
        self.validate()?;
        let start_month = self
            .start_month
            .ok_or(RecordsQueryFormError::Missing("startMonth"))?;
        let end_month = self
            .end_month
            .ok_or(RecordsQueryFormError::Missing("endMonth"))?;
        let vessel = vessel_filter(self.vessel).ok_or(RecordsQueryFormError::Missing("vessel"))?;
        Ok(SeasonChartQuery {
            start_month,
            end_month,
            vessel,
        })
    }
}
