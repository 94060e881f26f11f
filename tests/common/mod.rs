//! Helpers for integration tests.

use bycatch_viewer::db::{DbPool, establish_connection_pool};
use bycatch_viewer::domain::catch_record::{Bycatch, NewCatchRecord};
use bycatch_viewer::domain::types::{
    BycatchAmount, FisheryArea, HaulCount, VesselCode, VesselId, VesselName,
};
use bycatch_viewer::domain::vessel::{NewVessel, Vessel};
use bycatch_viewer::repository::{CatchRecordWriter, DieselRepository, VesselWriter};
use chrono::NaiveDate;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::NamedTempFile;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    _tempfile: NamedTempFile,
    pool: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let tempfile = NamedTempFile::new().expect("Failed to create temp file");
        let pool = establish_connection_pool(tempfile.path().to_str().unwrap(), 4)
            .expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            _tempfile: tempfile,
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid ISO date")
}

pub fn add_vessel(repo: &DieselRepository, code: &str, name: &str) -> Vessel {
    repo.upsert_vessel(&NewVessel {
        code: VesselCode::new(code).expect("valid vessel code"),
        name: VesselName::new(name).expect("valid vessel name"),
    })
    .expect("should upsert vessel")
}

pub fn new_record(vessel_id: VesselId, week_end_date: &str, chinook: f64) -> NewCatchRecord {
    NewCatchRecord {
        week_end_date: date(week_end_date),
        vessel_id,
        area: Some(FisheryArea::new("517").expect("valid area")),
        gear: None,
        target: None,
        bycatch: Bycatch {
            chinook: BycatchAmount::new(chinook).expect("valid amount"),
            ..Bycatch::default()
        },
        sampled_hauls: HaulCount::new(1).expect("valid haul count"),
    }
}

/// Two vessels with records spread over 2019 and 2020.
pub fn seed(repo: &DieselRepository) -> (Vessel, Vessel) {
    let sea_breeze = add_vessel(repo, "A123", "SEA BREEZE");
    let northern_star = add_vessel(repo, "B456", "NORTHERN STAR");
    repo.create_catch_records(&[
        new_record(sea_breeze.id, "2019-03-10", 4.0),
        new_record(sea_breeze.id, "2019-07-22", 9.0),
        new_record(sea_breeze.id, "2019-12-31", 1.0),
        new_record(sea_breeze.id, "2020-01-01", 2.0),
        new_record(sea_breeze.id, "2020-03-05", 7.0),
        new_record(northern_star.id, "2019-03-17", 3.0),
    ])
    .expect("should create catch records");
    (sea_breeze, northern_star)
}
