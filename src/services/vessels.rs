use crate::domain::types::VesselId;
use crate::dto::vessels::VesselDto;
use crate::repository::VesselReader;

use super::{ServiceError, ServiceResult};

/// Lists every vessel for the dashboard's selector, ordered by name.
pub fn list_vessels<R>(repo: &R) -> ServiceResult<Vec<VesselDto>>
where
    R: VesselReader,
{
    match repo.list_vessels() {
        Ok(vessels) => Ok(vessels.into_iter().map(VesselDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list vessels: {e}");
            Err(ServiceError::StoreUnavailable)
        }
    }
}

/// Looks up one vessel; ids that cannot exist are reported as not found.
pub fn get_vessel<R>(repo: &R, id: i32) -> ServiceResult<VesselDto>
where
    R: VesselReader,
{
    let not_found = || ServiceError::NotFound(format!("vessel {id}"));
    let Ok(vessel_id) = VesselId::new(id) else {
        return Err(not_found());
    };
    match repo.get_vessel_by_id(vessel_id) {
        Ok(Some(vessel)) => Ok(vessel.into()),
        Ok(None) => Err(not_found()),
        Err(e) => {
            log::error!("Failed to load vessel {id}: {e}");
            Err(ServiceError::StoreUnavailable)
        }
    }
}
