use serde::Serialize;

use crate::domain::vessel::Vessel;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VesselDto {
    pub id: i32,
    pub name: String,
}

impl From<Vessel> for VesselDto {
    fn from(value: Vessel) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into_inner(),
        }
    }
}
