//! Reshapes catch records into one time series per species and year.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::domain::dates::MonthSpan;
use crate::domain::types::Species;
use crate::dto::records::CatchRecordDto;
use crate::repository::{CatchRecordReader, VesselReader};
use crate::services::ServiceResult;
use crate::services::records::RecordQueryService;

/// One point of a season chart line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPoint {
    pub week_end_date: NaiveDate,
    pub value: f64,
}

/// `species -> year -> points`, points in ascending date order.
pub type SeasonSeries = BTreeMap<Species, BTreeMap<i32, Vec<ChartPoint>>>;

/// Groups `records` by species and year, keeping those whose month is in `months`.
///
/// `records` must already be sorted by week-end date; the order is preserved
/// within each series.
pub fn build_season_series(records: &[CatchRecordDto], months: MonthSpan) -> SeasonSeries {
    let mut series = SeasonSeries::new();
    for species in Species::ALL {
        let by_year = series.entry(species).or_default();
        for record in records
            .iter()
            .filter(|r| months.contains_month(r.week_end_date.month()))
        {
            by_year
                .entry(record.week_end_date.year())
                .or_default()
                .push(ChartPoint {
                    week_end_date: record.week_end_date,
                    value: record.bycatch.amount(species).get(),
                });
        }
    }
    series
}

/// Records of one vessel for a month span across all years, with their series.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonChart {
    pub records: Vec<CatchRecordDto>,
    pub series: SeasonSeries,
}

/// Loads the season chart of `vessel` for months `start_month..=end_month`.
pub fn season_chart<R>(
    repo: &R,
    start_month: u32,
    end_month: u32,
    vessel: &str,
) -> ServiceResult<SeasonChart>
where
    R: VesselReader + CatchRecordReader,
{
    let months = MonthSpan::new(start_month, end_month)?;
    let records =
        RecordQueryService::new(repo).query_all_for_chart(start_month, end_month, vessel)?;
    let series = build_season_series(&records, months);
    Ok(SeasonChart { records, series })
}
