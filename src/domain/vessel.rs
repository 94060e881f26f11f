use serde::{Deserialize, Serialize};

use crate::domain::types::{VesselCode, VesselId, VesselName};

/// A fishing vessel as identified in the observer exports.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vessel {
    pub id: VesselId,
    pub code: VesselCode,
    pub name: VesselName,
}

/// Data required to upsert a [`Vessel`] by its external code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewVessel {
    pub code: VesselCode,
    pub name: VesselName,
}
