use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::catch_record::{Bycatch, CatchRecord};
use crate::domain::vessel::Vessel;

/// Vessel fields joined into every returned catch record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselRefDto {
    pub id: i32,
    pub name: String,
}

/// A catch record with its vessel joined in, shaped for the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatchRecordDto {
    pub id: i32,
    pub week_end_date: NaiveDate,
    pub vessel: VesselRefDto,
    pub area: Option<String>,
    pub gear: Option<String>,
    pub target: Option<String>,
    #[serde(flatten)]
    pub bycatch: Bycatch,
    pub sampled_hauls: i32,
}

impl CatchRecordDto {
    /// Joins `record` with the vessel it references.
    pub fn joined(record: CatchRecord, vessel: &Vessel) -> Self {
        Self {
            id: record.id.get(),
            week_end_date: record.week_end_date,
            vessel: VesselRefDto {
                id: vessel.id.get(),
                name: vessel.name.as_str().to_string(),
            },
            area: record.area.map(String::from),
            gear: record.gear.map(String::from),
            target: record.target.map(String::from),
            bycatch: record.bycatch,
            sampled_hauls: record.sampled_hauls.get(),
        }
    }
}
