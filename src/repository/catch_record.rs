use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::catch_record::{CatchRecord, NewCatchRecord};
use crate::domain::dates::DateWindow;
use crate::domain::query::SortOrder;
use crate::models::catch_record::{
    CatchRecord as DbCatchRecord, NewCatchRecord as DbNewCatchRecord,
};
use crate::repository::{
    CatchRecordListQuery, CatchRecordReader, CatchRecordWriter, DieselRepository,
    RepositoryResult,
};

impl CatchRecordReader for DieselRepository {
    fn list_catch_records(
        &self,
        query: CatchRecordListQuery,
    ) -> RepositoryResult<Vec<CatchRecord>> {
        use crate::schema::catch_records;

        let mut conn = self.conn()?;

        let mut items = catch_records::table.into_boxed::<diesel::sqlite::Sqlite>();

        if let Some(vessel_id) = query.vessel_id {
            items = items.filter(catch_records::vessel_id.eq(vessel_id.get()));
        }

        match query.window {
            Some(DateWindow::HalfOpen { start, end }) => {
                items = items
                    .filter(catch_records::week_end_date.ge(start))
                    .filter(catch_records::week_end_date.lt(end));
            }
            Some(DateWindow::Closed { start, end }) => {
                items = items
                    .filter(catch_records::week_end_date.ge(start))
                    .filter(catch_records::week_end_date.le(end));
            }
            None => {}
        }

        items = match query.sort {
            SortOrder::WeekEndDateAsc => {
                items.order((catch_records::week_end_date.asc(), catch_records::id.asc()))
            }
        };

        if let Some(page) = &query.pagination {
            let offset = i64::try_from(page.skip()).unwrap_or(i64::MAX);
            let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .load::<DbCatchRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<CatchRecord>, _>>()?;

        Ok(items)
    }
}

pub(crate) fn insert_catch_records_on(
    conn: &mut SqliteConnection,
    records: &[NewCatchRecord],
) -> RepositoryResult<usize> {
    use crate::schema::catch_records;

    if records.is_empty() {
        return Ok(0);
    }

    let db_records: Vec<DbNewCatchRecord> = records.iter().map(Into::into).collect();

    let affected = diesel::insert_into(catch_records::table)
        .values(&db_records)
        .execute(conn)?;

    Ok(affected)
}

impl CatchRecordWriter for DieselRepository {
    fn create_catch_records(&self, records: &[NewCatchRecord]) -> RepositoryResult<usize> {
        if records.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        conn.transaction(|conn| insert_catch_records_on(conn, records))
    }
}
