use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::types::{VesselId, VesselName};
use crate::domain::vessel::{NewVessel, Vessel};
use crate::models::vessel::{NewVessel as DbNewVessel, Vessel as DbVessel};
use crate::repository::{DieselRepository, RepositoryResult, VesselReader, VesselWriter};

impl VesselReader for DieselRepository {
    fn list_vessels(&self) -> RepositoryResult<Vec<Vessel>> {
        use crate::schema::vessels;

        let mut conn = self.conn()?;

        let items = vessels::table
            .order((vessels::name.asc(), vessels::id.asc()))
            .load::<DbVessel>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Vessel>, _>>()?;

        Ok(items)
    }

    fn get_vessel_by_id(&self, id: VesselId) -> RepositoryResult<Option<Vessel>> {
        use crate::schema::vessels;

        let mut conn = self.conn()?;

        let vessel = vessels::table
            .find(id.get())
            .first::<DbVessel>(&mut conn)
            .optional()?;

        let vessel = vessel.map(TryInto::try_into).transpose()?;
        Ok(vessel)
    }

    fn get_vessel_by_name(&self, name: &VesselName) -> RepositoryResult<Option<Vessel>> {
        use crate::schema::vessels;

        let mut conn = self.conn()?;

        let vessel = vessels::table
            .filter(vessels::name.eq(name.as_str()))
            .order(vessels::id.asc())
            .first::<DbVessel>(&mut conn)
            .optional()?;

        let vessel = vessel.map(TryInto::try_into).transpose()?;
        Ok(vessel)
    }

    fn get_vessels_by_ids(&self, ids: &[VesselId]) -> RepositoryResult<Vec<Vessel>> {
        use crate::schema::vessels;

        if ids.is_empty() {
            return Ok(vec![]);
        }

        let mut conn = self.conn()?;
        let raw_ids: Vec<i32> = ids.iter().map(|id| id.get()).collect();

        let items = vessels::table
            .filter(vessels::id.eq_any(raw_ids))
            .load::<DbVessel>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Vessel>, _>>()?;

        Ok(items)
    }
}

pub(crate) fn upsert_vessel_on(
    conn: &mut SqliteConnection,
    vessel: &NewVessel,
) -> RepositoryResult<Vessel> {
    use crate::schema::vessels;

    let db_vessel: DbNewVessel = vessel.into();

    let stored = diesel::insert_into(vessels::table)
        .values(&db_vessel)
        .on_conflict(vessels::code)
        .do_update()
        .set(vessels::name.eq(db_vessel.name))
        .returning(DbVessel::as_returning())
        .get_result::<DbVessel>(conn)?;

    Ok(stored.try_into()?)
}

impl VesselWriter for DieselRepository {
    fn upsert_vessel(&self, vessel: &NewVessel) -> RepositoryResult<Vessel> {
        let mut conn = self.conn()?;
        upsert_vessel_on(&mut conn, vessel)
    }
}
