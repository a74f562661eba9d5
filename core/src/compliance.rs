//! # Compliance Calculator
//!
//! Converts per-square-metre rates into monthly amounts and compares the declared
//! rent against the majored ceiling. No rounding happens here; presentation
//! rounds for display. Area and rent are validated at the input boundary.

use encadre_common::lookup::RentControlMatch;
use encadre_common::rates::RateSchedule;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplianceResult {
    pub area_m2: f64,
    pub declared_rent: f64,
    pub reference_amount: f64,
    pub majored_amount: f64,
    pub minored_amount: f64,
    /// `declared_rent <= majored_amount`; the ceiling itself is compliant.
    pub is_compliant: bool,
    /// `declared_rent - majored_amount`, zero or negative when compliant.
    pub deviation_amount: f64,
}

pub fn compute(schedule: &RateSchedule, area_m2: f64, declared_rent: f64) -> ComplianceResult {
    let majored_amount = schedule.majored_rate * area_m2;

    ComplianceResult {
        area_m2,
        declared_rent,
        reference_amount: schedule.reference_rate * area_m2,
        majored_amount,
        minored_amount: schedule.minored_rate * area_m2,
        is_compliant: declared_rent <= majored_amount,
        deviation_amount: declared_rent - majored_amount,
    }
}

/// A lookup result together with its verdict, as handed to presentation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub lookup: RentControlMatch,
    pub compliance: ComplianceResult,
}

pub fn assess(lookup: RentControlMatch, area_m2: f64, declared_rent: f64) -> Assessment {
    let compliance = compute(&lookup.schedule, area_m2, declared_rent);
    Assessment { lookup, compliance }
}
