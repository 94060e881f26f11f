use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    BycatchAmount, CatchRecordId, FisheryArea, GearType, HaulCount, Species, TargetSpecies,
    VesselId,
};

/// Bycatch quantities reported for a single vessel-week.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bycatch {
    pub halibut: BycatchAmount,
    pub herring: BycatchAmount,
    pub red_king_crab: BycatchAmount,
    pub other_king_crab: BycatchAmount,
    pub bairdi_tanner: BycatchAmount,
    pub other_tanner: BycatchAmount,
    pub chinook: BycatchAmount,
    pub non_chinook: BycatchAmount,
}

impl Bycatch {
    /// Quantity reported for `species`.
    pub fn amount(&self, species: Species) -> BycatchAmount {
        match species {
            Species::Halibut => self.halibut,
            Species::Herring => self.herring,
            Species::RedKingCrab => self.red_king_crab,
            Species::OtherKingCrab => self.other_king_crab,
            Species::BairdiTanner => self.bairdi_tanner,
            Species::OtherTanner => self.other_tanner,
            Species::Chinook => self.chinook,
            Species::NonChinook => self.non_chinook,
        }
    }

    /// Sets the quantity for `species`.
    pub fn set_amount(&mut self, species: Species, amount: BycatchAmount) {
        let slot = match species {
            Species::Halibut => &mut self.halibut,
            Species::Herring => &mut self.herring,
            Species::RedKingCrab => &mut self.red_king_crab,
            Species::OtherKingCrab => &mut self.other_king_crab,
            Species::BairdiTanner => &mut self.bairdi_tanner,
            Species::OtherTanner => &mut self.other_tanner,
            Species::Chinook => &mut self.chinook,
            Species::NonChinook => &mut self.non_chinook,
        };
        *slot = amount;
    }
}

/// One vessel's reported bycatch for a reporting week.
///
/// `week_end_date` is always the canonical calendar date; legacy string
/// encodings are normalized before a record is constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatchRecord {
    pub id: CatchRecordId,
    pub week_end_date: NaiveDate,
    pub vessel_id: VesselId,
    pub area: Option<FisheryArea>,
    pub gear: Option<GearType>,
    pub target: Option<TargetSpecies>,
    pub bycatch: Bycatch,
    pub sampled_hauls: HaulCount,
}

/// Information required to insert a new [`CatchRecord`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewCatchRecord {
    pub week_end_date: NaiveDate,
    pub vessel_id: VesselId,
    pub area: Option<FisheryArea>,
    pub gear: Option<GearType>,
    pub target: Option<TargetSpecies>,
    pub bycatch: Bycatch,
    pub sampled_hauls: HaulCount,
}
