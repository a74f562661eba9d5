//! # Zone Resolvers
//!
//! One resolver per territory. Each turns a point and a regulation category into
//! the rate schedule of the zone containing the point, or `None` when the dataset
//! has nothing for that address.
//!
//! * [`paris::ParisResolver`]: live filtered query, polygon containment, nearest
//!   centroid fallback.
//! * [`est_ensemble::EstEnsembleResolver`]: two static snapshots cached in an
//!   [`est_ensemble::EstEnsembleDataset`], polygon containment, apartment fallback.

use encadre_common::rates::RateSchedule;
use tracing::warn;

pub mod est_ensemble;
pub mod paris;

pub use est_ensemble::{EstEnsembleDataset, EstEnsembleMatch, EstEnsembleResolver};
pub use paris::{ParisMatch, ParisResolver};

/// Logs schedules whose rates are out of order. They are still returned.
fn check_schedule(zone: &str, schedule: &RateSchedule) {
    if !schedule.is_ordered() {
        warn!(
            "Rates for {zone} are out of order (min {}, ref {}, max {})",
            schedule.minored_rate, schedule.reference_rate, schedule.majored_rate
        );
    }
}
