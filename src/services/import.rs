//! Bulk import of observer CSV exports.
//!
//! Every row upserts its vessel by code and becomes one catch record. Week-end
//! dates are normalized to calendar dates here so that nothing downstream ever
//! sees a legacy string encoding. A file is written in one batch: vessel
//! upserts and record inserts commit together or not at all.

use std::collections::HashMap;
use std::io::Read;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::catch_record::{Bycatch, NewCatchRecord};
use crate::domain::dates::parse_legacy_date;
use crate::domain::types::{
    BycatchAmount, FisheryArea, GearType, HaulCount, Species, TargetSpecies, TypeConstraintError,
    VesselCode, VesselId, VesselName,
};
use crate::domain::vessel::NewVessel;
use crate::repository::CatchImportWriter;

/// One row of the observer export, as found in the file.
#[derive(Debug, Deserialize)]
struct RawCatchRow {
    #[serde(rename = "VESSEL ID")]
    vessel_code: String,
    #[serde(rename = "NAME")]
    vessel_name: String,
    #[serde(rename = "WEEK END DATE")]
    week_end_date: String,
    #[serde(rename = "AREA", default)]
    area: Option<String>,
    #[serde(rename = "GEAR", default)]
    gear: Option<String>,
    #[serde(rename = "TARGET", default)]
    target: Option<String>,
    #[serde(rename = "HALIBUT", default)]
    halibut: Option<String>,
    #[serde(rename = "HERRING", default)]
    herring: Option<String>,
    #[serde(rename = "RED KING CRAB", default)]
    red_king_crab: Option<String>,
    #[serde(rename = "OTHER KING CRAB", default)]
    other_king_crab: Option<String>,
    #[serde(rename = "BAIRDI TANNER", default)]
    bairdi_tanner: Option<String>,
    #[serde(rename = "OTHER TANNER", default)]
    other_tanner: Option<String>,
    #[serde(rename = "CHINOOK", default)]
    chinook: Option<String>,
    #[serde(rename = "NON-CHINOOK", default)]
    non_chinook: Option<String>,
    #[serde(rename = "SAMPLED HAULS", default)]
    sampled_hauls: Option<String>,
}

impl RawCatchRow {
    fn amount(&self, species: Species) -> Option<&str> {
        let raw = match species {
            Species::Halibut => &self.halibut,
            Species::Herring => &self.herring,
            Species::RedKingCrab => &self.red_king_crab,
            Species::OtherKingCrab => &self.other_king_crab,
            Species::BairdiTanner => &self.bairdi_tanner,
            Species::OtherTanner => &self.other_tanner,
            Species::Chinook => &self.chinook,
            Species::NonChinook => &self.non_chinook,
        };
        raw.as_deref()
    }
}

/// Row-level import error kept for the report.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImportRowError {
    pub row_number: usize,
    pub vessel_code: Option<String>,
    pub message: String,
}

/// Aggregated import outcome.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct ImportReport {
    pub total_rows: usize,
    pub imported: usize,
    pub skipped: usize,
    pub errors: Vec<ImportRowError>,
}

impl ImportReport {
    fn push_error(&mut self, row_number: usize, vessel_code: Option<String>, message: String) {
        self.skipped += 1;
        self.errors.push(ImportRowError {
            row_number,
            vessel_code,
            message,
        });
    }
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("failed to read CSV headers: {0}")]
    Headers(#[from] csv::Error),
    #[error("record store unavailable: {0}")]
    Store(String),
}

fn optional_text<T>(
    raw: Option<String>,
    build: impl FnOnce(String) -> Result<T, TypeConstraintError>,
) -> Result<Option<T>, TypeConstraintError> {
    match raw {
        Some(value) if !value.trim().is_empty() => build(value).map(Some),
        _ => Ok(None),
    }
}

/// Blank, unparsable or non-finite quantities count as zero; negative ones
/// are rejected.
fn coerce_amount(raw: Option<&str>) -> Result<BycatchAmount, TypeConstraintError> {
    match raw
        .map(str::trim)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
    {
        Some(value) => BycatchAmount::new(value),
        None => Ok(BycatchAmount::default()),
    }
}

fn coerce_hauls(raw: Option<&str>) -> Result<HaulCount, TypeConstraintError> {
    let raw = raw.map(str::trim).unwrap_or_default();
    let value = raw
        .parse::<i32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i32)
        });
    match value {
        Some(value) => HaulCount::new(value),
        None => Ok(HaulCount::default()),
    }
}

struct ParsedRow {
    vessel: NewVessel,
    week_end_date: NaiveDate,
    area: Option<FisheryArea>,
    gear: Option<GearType>,
    target: Option<TargetSpecies>,
    bycatch: Bycatch,
    sampled_hauls: HaulCount,
}

impl ParsedRow {
    fn into_record(self, vessel_id: VesselId) -> NewCatchRecord {
        NewCatchRecord {
            week_end_date: self.week_end_date,
            vessel_id,
            area: self.area,
            gear: self.gear,
            target: self.target,
            bycatch: self.bycatch,
            sampled_hauls: self.sampled_hauls,
        }
    }
}

fn parse_row(row: RawCatchRow) -> Result<ParsedRow, String> {
    let week_end_date = parse_legacy_date(&row.week_end_date).map_err(|e| e.to_string())?;

    let mut bycatch = Bycatch::default();
    for species in Species::ALL {
        let amount = coerce_amount(row.amount(species)).map_err(|e| format!("{species}: {e}"))?;
        bycatch.set_amount(species, amount);
    }
    let sampled_hauls = coerce_hauls(row.sampled_hauls.as_deref()).map_err(|e| e.to_string())?;

    let vessel = NewVessel {
        code: VesselCode::new(row.vessel_code).map_err(|e| e.to_string())?,
        name: VesselName::new(row.vessel_name).map_err(|e| e.to_string())?,
    };

    Ok(ParsedRow {
        vessel,
        week_end_date,
        area: optional_text(row.area, FisheryArea::new).map_err(|e| e.to_string())?,
        gear: optional_text(row.gear, GearType::new).map_err(|e| e.to_string())?,
        target: optional_text(row.target, TargetSpecies::new).map_err(|e| e.to_string())?,
        bycatch,
        sampled_hauls,
    })
}

/// Imports one CSV export into the store.
///
/// Malformed rows are skipped and reported. A store failure aborts the import
/// without writing any vessel or record of the file. When a code appears with
/// several names the last one wins.
pub fn import_catch_records<R, S>(source: S, repo: &R) -> Result<ImportReport, ImportError>
where
    R: CatchImportWriter,
    S: Read,
{
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .from_reader(source);
    reader.headers()?;

    let mut report = ImportReport::default();
    let mut vessels: Vec<NewVessel> = Vec::new();
    let mut vessel_slots: HashMap<VesselCode, usize> = HashMap::new();
    let mut rows: Vec<(usize, ParsedRow)> = Vec::new();

    for (index, row) in reader.deserialize::<RawCatchRow>().enumerate() {
        // Header is line 1.
        let row_number = index + 2;
        report.total_rows += 1;

        let row = match row {
            Ok(row) => row,
            Err(e) => {
                report.push_error(row_number, None, e.to_string());
                continue;
            }
        };
        let raw_code = row.vessel_code.trim().to_string();

        let parsed = match parse_row(row) {
            Ok(parsed) => parsed,
            Err(message) => {
                log::warn!("Skipping row {row_number}: {message}");
                report.push_error(row_number, Some(raw_code), message);
                continue;
            }
        };

        let slot = match vessel_slots.get(&parsed.vessel.code) {
            Some(&slot) => {
                vessels[slot].name = parsed.vessel.name.clone();
                slot
            }
            None => {
                vessels.push(parsed.vessel.clone());
                vessel_slots.insert(parsed.vessel.code.clone(), vessels.len() - 1);
                vessels.len() - 1
            }
        };
        rows.push((slot, parsed));
    }

    report.imported = repo
        .import_batch(&vessels, |stored| {
            rows.into_iter()
                .map(|(slot, parsed)| {
                    let vessel_id = stored[slot].id;
                    parsed.into_record(vessel_id)
                })
                .collect()
        })
        .map_err(|e| {
            log::error!(
                "Failed to store {} vessels and their catch records: {e}",
                vessels.len()
            );
            ImportError::Store(e.to_string())
        })?;

    log::info!(
        "Imported {} of {} rows ({} skipped)",
        report.imported,
        report.total_rows,
        report.skipped
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::vessel::Vessel;
    use crate::repository::test::TestRepository;

    const HEADER: &str = "VESSEL ID,NAME,WEEK END DATE,AREA,GEAR,TARGET,HALIBUT,HERRING,RED KING CRAB,OTHER KING CRAB,BAIRDI TANNER,OTHER TANNER,CHINOOK,NON-CHINOOK,SAMPLED HAULS";

    fn csv(rows: &[&str]) -> String {
        let mut text = HEADER.to_string();
        for row in rows {
            text.push('\n');
            text.push_str(row);
        }
        text
    }

    #[test]
    fn imports_rows_and_upserts_vessels() {
        let repo = TestRepository::default();
        let data = csv(&[
            "A123,SEA BREEZE,03/10/2019,517,PTR,P,1.5,0,0,0,2,0,14,3,4",
            "A123,SEA BREEZE,07/22/2019,517,PTR,P,,,,,,,,,",
            "B456,NORTHERN STAR,2020/03/05,509,NPT,C,0,0,0,0,0,0,0,0,1",
        ]);

        let report = import_catch_records(data.as_bytes(), &repo).unwrap();

        assert_eq!(report.total_rows, 3);
        assert_eq!(report.imported, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(repo.vessels().len(), 2);

        let records = repo.records();
        assert_eq!(
            records[0].week_end_date,
            NaiveDate::from_ymd_opt(2019, 3, 10).unwrap()
        );
        assert_eq!(records[0].bycatch.chinook, 14.0);
        assert_eq!(records[0].sampled_hauls, 4);
        assert_eq!(records[1].bycatch, Bycatch::default());
        assert_eq!(
            records[2].week_end_date,
            NaiveDate::from_ymd_opt(2020, 3, 5).unwrap()
        );
        assert_eq!(records[0].vessel_id, records[1].vessel_id);
        assert_ne!(records[0].vessel_id, records[2].vessel_id);
    }

    #[test]
    fn renamed_vessel_keeps_its_identity() {
        let repo = TestRepository::default();
        let data = csv(&[
            "A123,SEA BREEZE,03/10/2019,,,,0,0,0,0,0,0,0,0,0",
            "A123,SEA BREEZE II,03/17/2019,,,,0,0,0,0,0,0,0,0,0",
        ]);

        import_catch_records(data.as_bytes(), &repo).unwrap();

        let vessels = repo.vessels();
        assert_eq!(vessels.len(), 1);
        assert_eq!(vessels[0].name, "SEA BREEZE II");
        assert!(repo.records().iter().all(|r| r.vessel_id == vessels[0].id));
    }

    #[test]
    fn bad_rows_are_reported_and_skipped() {
        let repo = TestRepository::default();
        let data = csv(&[
            "A123,SEA BREEZE,13/45/2019,,,,0,0,0,0,0,0,0,0,0",
            "A123,SEA BREEZE,03/10/2019,,,,-1,0,0,0,0,0,0,0,0",
            "TOOLONG,SEA BREEZE,03/10/2019,,,,0,0,0,0,0,0,0,0,0",
            "A123,SEA BREEZE,03/17/2019,,,,0,0,0,0,0,0,0,0,0",
        ]);

        let report = import_catch_records(data.as_bytes(), &repo).unwrap();

        assert_eq!(report.total_rows, 4);
        assert_eq!(report.imported, 1);
        assert_eq!(report.skipped, 3);
        let rows: Vec<usize> = report.errors.iter().map(|e| e.row_number).collect();
        assert_eq!(rows, vec![2, 3, 4]);
        assert_eq!(report.errors[0].vessel_code.as_deref(), Some("A123"));
    }

    #[test]
    fn non_finite_quantities_count_as_zero() {
        let repo = TestRepository::default();
        let data = csv(&[
            "A123,SEA BREEZE,03/10/2019,,,,NaN,inf,-inf,infinity,0,0,5,0,NaN",
            "A123,SEA BREEZE,03/17/2019,,,,0,0,0,0,0,0,0,0,inf",
        ]);

        let report = import_catch_records(data.as_bytes(), &repo).unwrap();

        assert_eq!(report.imported, 2);
        assert_eq!(report.skipped, 0);
        let records = repo.records();
        assert_eq!(records[0].bycatch.halibut, 0.0);
        assert_eq!(records[0].bycatch.herring, 0.0);
        assert_eq!(records[0].bycatch.red_king_crab, 0.0);
        assert_eq!(records[0].bycatch.other_king_crab, 0.0);
        assert_eq!(records[0].bycatch.chinook, 5.0);
        assert_eq!(records[0].sampled_hauls, 0);
        assert_eq!(records[1].sampled_hauls, 0);
    }

    #[test]
    fn failed_record_insert_writes_no_vessels() {
        let existing = Vessel {
            id: VesselId::new(1).unwrap(),
            code: VesselCode::new("A123").unwrap(),
            name: VesselName::new("SEA BREEZE").unwrap(),
        };
        let repo = TestRepository::rejecting_record_inserts(vec![existing.clone()]);
        let data = csv(&[
            "A123,SEA BREEZE II,03/10/2019,,,,0,0,0,0,0,0,0,0,0",
            "B456,NORTHERN STAR,03/17/2019,,,,0,0,0,0,0,0,0,0,0",
        ]);

        let err = import_catch_records(data.as_bytes(), &repo).unwrap_err();

        assert!(matches!(err, ImportError::Store(_)));
        assert_eq!(repo.vessels(), vec![existing]);
        assert!(repo.records().is_empty());
    }

    #[test]
    fn store_failure_aborts_the_import() {
        let repo = TestRepository::unavailable();
        let data = csv(&["A123,SEA BREEZE,03/10/2019,,,,0,0,0,0,0,0,0,0,0"]);

        let err = import_catch_records(data.as_bytes(), &repo).unwrap_err();

        assert!(matches!(err, ImportError::Store(_)));
    }
}
