use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::catch_record::{
    Bycatch, CatchRecord as DomainCatchRecord, NewCatchRecord as DomainNewCatchRecord,
};
use crate::domain::types::{
    BycatchAmount, FisheryArea, GearType, HaulCount, TargetSpecies, TypeConstraintError,
};

/// Diesel model representing a row in the `catch_records` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::catch_records)]
pub struct CatchRecord {
    pub id: i32,
    pub week_end_date: NaiveDate,
    pub vessel_id: i32,
    pub area: Option<String>,
    pub gear: Option<String>,
    pub target: Option<String>,
    pub halibut: f64,
    pub herring: f64,
    pub red_king_crab: f64,
    pub other_king_crab: f64,
    pub bairdi_tanner: f64,
    pub other_tanner: f64,
    pub chinook: f64,
    pub non_chinook: f64,
    pub sampled_hauls: i32,
}

/// Insertable form of [`CatchRecord`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::catch_records)]
#[diesel(treat_none_as_default_value = false)]
pub struct NewCatchRecord<'a> {
    pub week_end_date: NaiveDate,
    pub vessel_id: i32,
    pub area: Option<&'a str>,
    pub gear: Option<&'a str>,
    pub target: Option<&'a str>,
    pub halibut: f64,
    pub herring: f64,
    pub red_king_crab: f64,
    pub other_king_crab: f64,
    pub bairdi_tanner: f64,
    pub other_tanner: f64,
    pub chinook: f64,
    pub non_chinook: f64,
    pub sampled_hauls: i32,
}

fn optional<T>(
    value: Option<String>,
    build: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    match value {
        Some(value) if !value.trim().is_empty() => build(value).map(Some),
        _ => Ok(None),
    }
}

impl TryFrom<CatchRecord> for DomainCatchRecord {
    type Error = TypeConstraintError;

    fn try_from(record: CatchRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            week_end_date: record.week_end_date,
            vessel_id: record.vessel_id.try_into()?,
            area: optional(record.area, FisheryArea::new)?,
            gear: optional(record.gear, GearType::new)?,
            target: optional(record.target, TargetSpecies::new)?,
            bycatch: Bycatch {
                halibut: BycatchAmount::new(record.halibut)?,
                herring: BycatchAmount::new(record.herring)?,
                red_king_crab: BycatchAmount::new(record.red_king_crab)?,
                other_king_crab: BycatchAmount::new(record.other_king_crab)?,
                bairdi_tanner: BycatchAmount::new(record.bairdi_tanner)?,
                other_tanner: BycatchAmount::new(record.other_tanner)?,
                chinook: BycatchAmount::new(record.chinook)?,
                non_chinook: BycatchAmount::new(record.non_chinook)?,
            },
            sampled_hauls: HaulCount::new(record.sampled_hauls)?,
        })
    }
}

impl<'a> From<&'a DomainNewCatchRecord> for NewCatchRecord<'a> {
    fn from(record: &'a DomainNewCatchRecord) -> Self {
        Self {
            week_end_date: record.week_end_date,
            vessel_id: record.vessel_id.get(),
            area: record.area.as_ref().map(|v| v.as_str()),
            gear: record.gear.as_ref().map(|v| v.as_str()),
            target: record.target.as_ref().map(|v| v.as_str()),
            halibut: record.bycatch.halibut.get(),
            herring: record.bycatch.herring.get(),
            red_king_crab: record.bycatch.red_king_crab.get(),
            other_king_crab: record.bycatch.other_king_crab.get(),
            bairdi_tanner: record.bycatch.bairdi_tanner.get(),
            other_tanner: record.bycatch.other_tanner.get(),
            chinook: record.bycatch.chinook.get(),
            non_chinook: record.bycatch.non_chinook.get(),
            sampled_hauls: record.sampled_hauls.get(),
        }
    }
}
