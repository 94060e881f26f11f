use crate::db::{DbConnection, DbPool};
use crate::domain::catch_record::{CatchRecord, NewCatchRecord};
use crate::domain::dates::DateWindow;
use crate::domain::query::{PageRequest, SortOrder};
use crate::domain::types::{VesselId, VesselName};
use crate::domain::vessel::{NewVessel, Vessel};

pub mod catch_record;
pub mod errors;
pub mod import;
#[cfg(test)]
pub mod test;
pub mod vessel;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Query parameters used when listing catch records.
///
/// Every filter set here is evaluated by the store; results always come back
/// in [`SortOrder::WeekEndDateAsc`] order with ties broken by id.
#[derive(Debug, Clone, Default)]
pub struct CatchRecordListQuery {
    /// Restrict to a single vessel.
    pub vessel_id: Option<VesselId>,
    /// Range on `week_end_date`.
    pub window: Option<DateWindow>,
    /// Result ordering.
    pub sort: SortOrder,
    /// Offset/limit applied after filtering and sorting.
    pub pagination: Option<PageRequest>,
}

impl CatchRecordListQuery {
    pub fn vessel(mut self, vessel_id: VesselId) -> Self {
        self.vessel_id = Some(vessel_id);
        self
    }
    pub fn window(mut self, window: DateWindow) -> Self {
        self.window = Some(window);
        self
    }
    pub fn paginate(mut self, page: PageRequest) -> Self {
        self.pagination = Some(page);
        self
    }
}

/// Read-only operations for vessel entities.
pub trait VesselReader {
    /// List every vessel ordered by name.
    fn list_vessels(&self) -> RepositoryResult<Vec<Vessel>>;
    /// Find a vessel by id.
    fn get_vessel_by_id(&self, id: VesselId) -> RepositoryResult<Option<Vessel>>;
    /// Find a vessel by exact name.
    fn get_vessel_by_name(&self, name: &VesselName) -> RepositoryResult<Option<Vessel>>;
    /// Resolve a batch of vessel references in one round trip.
    fn get_vessels_by_ids(&self, ids: &[VesselId]) -> RepositoryResult<Vec<Vessel>>;
}

/// Write operations for vessel entities.
pub trait VesselWriter {
    /// Create the vessel or update its name when the code already exists.
    fn upsert_vessel(&self, vessel: &NewVessel) -> RepositoryResult<Vessel>;
}

/// Read-only operations for catch records.
pub trait CatchRecordReader {
    /// List catch records matching the supplied query parameters.
    fn list_catch_records(&self, query: CatchRecordListQuery)
    -> RepositoryResult<Vec<CatchRecord>>;
}

/// Write operations for catch records.
pub trait CatchRecordWriter {
    /// Persist new catch records.
    fn create_catch_records(&self, records: &[NewCatchRecord]) -> RepositoryResult<usize>;
}

/// Bulk load of vessels together with the catch records that reference them.
pub trait CatchImportWriter {
    /// Upserts `vessels` in order, then inserts the records `build` derives
    /// from the stored vessels (same order as `vessels`). Either both steps
    /// are written or neither is.
    fn import_batch<F>(&self, vessels: &[NewVessel], build: F) -> RepositoryResult<usize>
    where
        F: FnOnce(&[Vessel]) -> Vec<NewCatchRecord>;
}
