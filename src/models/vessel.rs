use diesel::prelude::*;

use crate::domain::types::{TypeConstraintError, VesselCode, VesselName};
use crate::domain::vessel::{NewVessel as DomainNewVessel, Vessel as DomainVessel};

/// Diesel model representing the `vessels` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::vessels)]
pub struct Vessel {
    pub id: i32,
    pub code: String,
    pub name: String,
}

/// Insertable/patchable form of [`Vessel`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::vessels)]
pub struct NewVessel<'a> {
    pub code: &'a str,
    pub name: &'a str,
}

impl TryFrom<Vessel> for DomainVessel {
    type Error = TypeConstraintError;

    fn try_from(vessel: Vessel) -> Result<Self, Self::Error> {
        Ok(Self {
            id: vessel.id.try_into()?,
            code: VesselCode::new(vessel.code)?,
            name: VesselName::new(vessel.name)?,
        })
    }
}

impl<'a> From<&'a DomainNewVessel> for NewVessel<'a> {
    fn from(vessel: &'a DomainNewVessel) -> Self {
        Self {
            code: vessel.code.as_str(),
            name: vessel.name.as_str(),
        }
    }
}
