use colored::*;
use encadre_common::category::RegulationCategory;
use encadre_common::lookup::MatchedCategory;
use encadre_common::rates::MatchQuality;

use crate::terminal::colors;

pub fn euros(amount: f64) -> String {
    format!("{amount:.2} €")
}

pub fn rate(per_m2: f64) -> String {
    format!("{per_m2:.2} €/m²")
}

pub fn deviation(amount: f64) -> ColoredString {
    let text = format!("{amount:+.2} €");
    if amount > 0.0 {
        text.color(colors::NON_COMPLIANT).bold()
    } else {
        text.color(colors::COMPLIANT)
    }
}

pub fn quality(quality: &MatchQuality) -> ColoredString {
    match quality {
        MatchQuality::Exact => "exact".color(colors::COMPLIANT),
        MatchQuality::NearestCentroid { distance_km } => {
            format!("nearest zone ({distance_km:.2} km away)").yellow()
        }
        MatchQuality::ApartmentFallback => "apartment rates (no house row)".yellow(),
    }
}

/// The category as the dataset named it.
pub fn matched_category(category: &MatchedCategory) -> String {
    let mut parts = vec![
        format!("{} p.", category.room_count),
        category.construction_period.clone(),
        category.furnished.clone(),
    ];
    if let Some(building) = category.building_type {
        parts.push(building.code().to_string());
    }
    parts.join(" · ")
}

/// The category as it was submitted, in form codes.
pub fn submitted_category(category: &RegulationCategory) -> String {
    let furnished = if category.is_furnished { "meuble" } else { "non-meuble" };
    format!(
        "{} p. · {} · {} · {}",
        category.room_count.code(),
        category.construction_period.code(),
        furnished,
        category.building_type.code()
    )
}
