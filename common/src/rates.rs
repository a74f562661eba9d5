use serde::{Deserialize, Serialize};

/// Per-square-metre monthly rates for one (zone, category) pair.
///
/// The source data is expected to satisfy `minored <= reference <= majored`, but
/// nothing enforces it. See [`RateSchedule::is_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateSchedule {
    pub reference_rate: f64,
    pub majored_rate: f64,
    pub minored_rate: f64,
}

impl RateSchedule {
    pub fn new(reference_rate: f64, majored_rate: f64, minored_rate: f64) -> Self {
        Self {
            reference_rate,
            majored_rate,
            minored_rate,
        }
    }

    /// Data-quality check; a `false` here is worth logging, not rejecting.
    pub fn is_ordered(&self) -> bool {
        self.minored_rate <= self.reference_rate && self.reference_rate <= self.majored_rate
    }
}

/// How the returned zone and rate row were found.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchQuality {
    /// The point fell inside the zone polygon and the exact category row exists.
    Exact,
    /// No polygon contained the point; the zone with the closest centroid was used.
    NearestCentroid { distance_km: f64 },
    /// No house row exists for the zone, the apartment row was used instead.
    ApartmentFallback,
}

impl MatchQuality {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, MatchQuality::Exact)
    }
}
