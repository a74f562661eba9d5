use serde::{Deserialize, Serialize};

use crate::category::BuildingType;
use crate::rates::{MatchQuality, RateSchedule};
use crate::territory::Territory;

/// The category a rate row was actually found under, in dataset vocabulary.
///
/// May differ from the requested category, e.g. after an apartment fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchedCategory {
    pub room_count: String,
    pub construction_period: String,
    pub furnished: String,
    /// Only reported by territories that distinguish houses from apartments.
    pub building_type: Option<BuildingType>,
}

/// Territory-independent lookup result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentControlMatch {
    pub territory: Territory,
    /// Paris quartier or Est Ensemble municipality.
    pub zone_name: String,
    pub schedule: RateSchedule,
    pub reference_year: String,
    pub category: MatchedCategory,
    pub quality: MatchQuality,
}
