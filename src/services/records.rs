//! Catch-record queries shared by every transport adapter.

use std::collections::HashMap;

use crate::domain::catch_record::CatchRecord;
use crate::domain::query::{DateFilter, PageRequest, QueryMode, RecordQuery};
use crate::domain::types::{VesselId, VesselName};
use crate::domain::vessel::Vessel;
use crate::dto::records::CatchRecordDto;
use crate::repository::{CatchRecordListQuery, CatchRecordReader, VesselReader};

use super::{ServiceError, ServiceResult};

/// Fetches pages of catch records for a time window and optional vessel.
///
/// The repository is injected at construction; the service keeps no state of
/// its own, so one instance may serve any number of calls.
pub struct RecordQueryService<'a, R> {
    repo: &'a R,
}

impl<'a, R> RecordQueryService<'a, R>
where
    R: VesselReader + CatchRecordReader,
{
    pub fn new(repo: &'a R) -> Self {
        Self { repo }
    }

    /// Returns one page of records matching `mode`, oldest week first.
    ///
    /// An unknown `vessel_name` yields an empty page rather than an error,
    /// including names no stored vessel could carry.
    pub fn query_records(
        &self,
        mode: &QueryMode,
        vessel_name: Option<&str>,
        page: PageRequest,
    ) -> ServiceResult<Vec<CatchRecordDto>> {
        let query = RecordQuery::build(mode, page)?;

        let vessel = match vessel_name {
            Some(name) => match self.resolve_vessel(name)? {
                Some(vessel) => Some(vessel),
                None => return Ok(vec![]),
            },
            None => None,
        };

        let records = self.fetch(&query, vessel.as_ref())?;
        self.join(records, vessel)
    }

    /// Returns every record of `vessel_name` whose month lies in
    /// `[start_month, end_month]` in any year, oldest week first.
    pub fn query_all_for_chart(
        &self,
        start_month: u32,
        end_month: u32,
        vessel_name: &str,
    ) -> ServiceResult<Vec<CatchRecordDto>> {
        let query = RecordQuery::for_chart(start_month, end_month)?;

        let Some(vessel) = self.resolve_vessel(vessel_name)? else {
            return Ok(vec![]);
        };

        let records = self.fetch(&query, Some(&vessel))?;
        self.join(records, Some(vessel))
    }

    fn resolve_vessel(&self, name: &str) -> ServiceResult<Option<Vessel>> {
        let name = match VesselName::new(name) {
            Ok(name) => name,
            Err(e) => {
                log::info!("No vessel named '{name}': {e}");
                return Ok(None);
            }
        };
        match self.repo.get_vessel_by_name(&name) {
            Ok(vessel) => {
                if vessel.is_none() {
                    log::info!("No vessel named '{name}'");
                }
                Ok(vessel)
            }
            Err(e) => {
                log::error!("Failed to look up vessel '{name}': {e}");
                Err(ServiceError::StoreUnavailable)
            }
        }
    }

    fn fetch(&self, query: &RecordQuery, vessel: Option<&Vessel>) -> ServiceResult<Vec<CatchRecord>> {
        let mut list_query = CatchRecordListQuery {
            sort: query.sort,
            ..CatchRecordListQuery::default()
        };
        if let Some(vessel) = vessel {
            list_query = list_query.vessel(vessel.id);
        }

        match query.filter {
            DateFilter::Unbounded | DateFilter::Window(_) => {
                if let DateFilter::Window(window) = query.filter {
                    log::debug!("Listing catch records in {window:?} with store-side pagination");
                    list_query = list_query.window(window);
                }
                if let Some(page) = query.page {
                    list_query = list_query.paginate(page);
                }
                self.load(list_query)
            }
            DateFilter::MonthsInAnyYear(span) => {
                if vessel.is_none() {
                    log::warn!("Month filter {span:?} without a vessel scans every catch record");
                }
                let matching: Vec<CatchRecord> = self
                    .load(list_query)?
                    .into_iter()
                    .filter(|record| query.filter.matches(record.week_end_date))
                    .collect();
                log::debug!("{} catch records match {span:?}", matching.len());
                Ok(match query.page {
                    Some(page) => page.slice(matching),
                    None => matching,
                })
            }
        }
    }

    fn load(&self, query: CatchRecordListQuery) -> ServiceResult<Vec<CatchRecord>> {
        self.repo.list_catch_records(query).map_err(|e| {
            log::error!("Failed to list catch records: {e}");
            ServiceError::StoreUnavailable
        })
    }

    fn join(
        &self,
        records: Vec<CatchRecord>,
        vessel: Option<Vessel>,
    ) -> ServiceResult<Vec<CatchRecordDto>> {
        let vessels: HashMap<VesselId, Vessel> = match vessel {
            Some(vessel) => HashMap::from([(vessel.id, vessel)]),
            None => {
                let mut ids: Vec<VesselId> = records.iter().map(|r| r.vessel_id).collect();
                ids.sort();
                ids.dedup();
                self.repo
                    .get_vessels_by_ids(&ids)
                    .map_err(|e| {
                        log::error!("Failed to load vessels for catch records: {e}");
                        ServiceError::StoreUnavailable
                    })?
                    .into_iter()
                    .map(|v| (v.id, v))
                    .collect()
            }
        };

        records
            .into_iter()
            .map(|record| match vessels.get(&record.vessel_id) {
                Some(vessel) => Ok(CatchRecordDto::joined(record, vessel)),
                None => {
                    log::error!(
                        "Catch record {} references missing vessel {}",
                        record.id,
                        record.vessel_id
                    );
                    Err(ServiceError::Internal)
                }
            })
            .collect()
    }
}
