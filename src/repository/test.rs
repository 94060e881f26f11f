use std::cell::{Cell, RefCell};

use crate::domain::catch_record::{CatchRecord, NewCatchRecord};
use crate::domain::query::SortOrder;
use crate::domain::types::{CatchRecordId, VesselId, VesselName};
use crate::domain::vessel::{NewVessel, Vessel};
use crate::repository::{
    CatchImportWriter, CatchRecordListQuery, CatchRecordReader, CatchRecordWriter,
    RepositoryError, RepositoryResult, VesselReader, VesselWriter,
};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    vessels: RefCell<Vec<Vessel>>,
    records: RefCell<Vec<CatchRecord>>,
    unavailable: bool,
    reject_record_inserts: bool,
    record_queries: Cell<usize>,
}

impl TestRepository {
    pub fn new(vessels: Vec<Vessel>, records: Vec<CatchRecord>) -> Self {
        Self {
            vessels: RefCell::new(vessels),
            records: RefCell::new(records),
            ..Self::default()
        }
    }

    /// A repository whose every call fails as if the database were down.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// A repository that serves reads and vessel upserts but fails every
    /// catch-record insert.
    pub fn rejecting_record_inserts(vessels: Vec<Vessel>) -> Self {
        Self {
            reject_record_inserts: true,
            ..Self::new(vessels, vec![])
        }
    }

    pub fn vessels(&self) -> Vec<Vessel> {
        self.vessels.borrow().clone()
    }

    pub fn records(&self) -> Vec<CatchRecord> {
        self.records.borrow().clone()
    }

    /// Number of `list_catch_records` calls served so far.
    pub fn record_queries(&self) -> usize {
        self.record_queries.get()
    }

    fn check_available(&self) -> RepositoryResult<()> {
        if self.unavailable {
            Err(RepositoryError::Database(
                diesel::result::Error::BrokenTransactionManager,
            ))
        } else {
            Ok(())
        }
    }

    fn check_record_inserts(&self) -> RepositoryResult<()> {
        self.check_available()?;
        if self.reject_record_inserts {
            Err(RepositoryError::Database(diesel::result::Error::RollbackTransaction))
        } else {
            Ok(())
        }
    }
}

fn upsert_into(vessels: &mut Vec<Vessel>, vessel: &NewVessel) -> RepositoryResult<Vessel> {
    if let Some(existing) = vessels.iter_mut().find(|v| v.code == vessel.code) {
        existing.name = vessel.name.clone();
        return Ok(existing.clone());
    }
    let next_id = vessels.iter().map(|v| v.id.get()).max().unwrap_or(0) + 1;
    let created = Vessel {
        id: VesselId::new(next_id)?,
        code: vessel.code.clone(),
        name: vessel.name.clone(),
    };
    vessels.push(created.clone());
    Ok(created)
}

fn insert_into(
    stored: &mut Vec<CatchRecord>,
    records: &[NewCatchRecord],
) -> RepositoryResult<usize> {
    let mut next_id = stored.iter().map(|r| r.id.get()).max().unwrap_or(0);
    for record in records {
        next_id += 1;
        stored.push(CatchRecord {
            id: CatchRecordId::new(next_id)?,
            week_end_date: record.week_end_date,
            vessel_id: record.vessel_id,
            area: record.area.clone(),
            gear: record.gear.clone(),
            target: record.target.clone(),
            bycatch: record.bycatch,
            sampled_hauls: record.sampled_hauls,
        });
    }
    Ok(records.len())
}

impl VesselReader for TestRepository {
    fn list_vessels(&self) -> RepositoryResult<Vec<Vessel>> {
        self.check_available()?;
        let mut items = self.vessels();
        items.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    fn get_vessel_by_id(&self, id: VesselId) -> RepositoryResult<Option<Vessel>> {
        self.check_available()?;
        Ok(self.vessels.borrow().iter().find(|v| v.id == id).cloned())
    }

    fn get_vessel_by_name(&self, name: &VesselName) -> RepositoryResult<Option<Vessel>> {
        self.check_available()?;
        Ok(self
            .vessels
            .borrow()
            .iter()
            .find(|v| &v.name == name)
            .cloned())
    }

    fn get_vessels_by_ids(&self, ids: &[VesselId]) -> RepositoryResult<Vec<Vessel>> {
        self.check_available()?;
        Ok(self
            .vessels
            .borrow()
            .iter()
            .filter(|v| ids.contains(&v.id))
            .cloned()
            .collect())
    }
}

impl VesselWriter for TestRepository {
    fn upsert_vessel(&self, vessel: &NewVessel) -> RepositoryResult<Vessel> {
        self.check_available()?;
        upsert_into(&mut self.vessels.borrow_mut(), vessel)
    }
}

impl CatchRecordReader for TestRepository {
    fn list_catch_records(
        &self,
        query: CatchRecordListQuery,
    ) -> RepositoryResult<Vec<CatchRecord>> {
        self.check_available()?;
        self.record_queries.set(self.record_queries.get() + 1);

        let mut items = self.records();
        if let Some(vessel_id) = query.vessel_id {
            items.retain(|r| r.vessel_id == vessel_id);
        }
        if let Some(window) = query.window {
            items.retain(|r| window.contains(r.week_end_date));
        }
        match query.sort {
            SortOrder::WeekEndDateAsc => items.sort_by(|a, b| {
                a.week_end_date
                    .cmp(&b.week_end_date)
                    .then(a.id.cmp(&b.id))
            }),
        }
        Ok(match query.pagination {
            Some(page) => page.slice(items),
            None => items,
        })
    }
}

impl CatchRecordWriter for TestRepository {
    fn create_catch_records(&self, records: &[NewCatchRecord]) -> RepositoryResult<usize> {
        self.check_record_inserts()?;
        insert_into(&mut self.records.borrow_mut(), records)
    }
}

impl CatchImportWriter for TestRepository {
    fn import_batch<F>(&self, vessels: &[NewVessel], build: F) -> RepositoryResult<usize>
    where
        F: FnOnce(&[Vessel]) -> Vec<NewCatchRecord>,
    {
        self.check_available()?;
        let mut staged_vessels = self.vessels();
        let mut stored = Vec::with_capacity(vessels.len());
        for vessel in vessels {
            stored.push(upsert_into(&mut staged_vessels, vessel)?);
        }

        let records = build(&stored);
        self.check_record_inserts()?;
        let mut staged_records = self.records();
        let inserted = insert_into(&mut staged_records, &records)?;

        *self.vessels.borrow_mut() = staged_vessels;
        *self.records.borrow_mut() = staged_records;
        Ok(inserted)
    }
}
