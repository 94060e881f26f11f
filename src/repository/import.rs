use diesel::prelude::*;

use crate::domain::catch_record::NewCatchRecord;
use crate::domain::vessel::{NewVessel, Vessel};
use crate::repository::catch_record::insert_catch_records_on;
use crate::repository::vessel::upsert_vessel_on;
use crate::repository::{CatchImportWriter, DieselRepository, RepositoryResult};

impl CatchImportWriter for DieselRepository {
    fn import_batch<F>(&self, vessels: &[NewVessel], build: F) -> RepositoryResult<usize>
    where
        F: FnOnce(&[Vessel]) -> Vec<NewCatchRecord>,
    {
        let mut conn = self.conn()?;

        conn.transaction(|conn| {
            let mut stored = Vec::with_capacity(vessels.len());
            for vessel in vessels {
                stored.push(upsert_vessel_on(conn, vessel)?);
            }
            insert_catch_records_on(conn, &build(&stored))
        })
    }
}
