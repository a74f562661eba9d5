//! # Territory Classification
//!
//! Maps French postcodes and INSEE codes to the territories whose rent-control
//! datasets are supported.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Est Ensemble municipalities by postcode.
const EST_ENSEMBLE_POSTCODES: [(&str, &str); 9] = [
    ("93170", "Bagnolet"),
    ("93000", "Bobigny"),
    ("93140", "Bondy"),
    ("93310", "Le Pré-Saint-Gervais"),
    ("93260", "Les Lilas"),
    ("93100", "Montreuil"),
    ("93130", "Noisy-le-Sec"),
    ("93500", "Pantin"),
    ("93230", "Romainville"),
];

/// Est Ensemble municipalities by INSEE commune code.
const EST_ENSEMBLE_INSEE: [(&str, &str); 9] = [
    ("93006", "Bagnolet"),
    ("93008", "Bobigny"),
    ("93010", "Bondy"),
    ("93061", "Le Pré-Saint-Gervais"),
    ("93045", "Les Lilas"),
    ("93048", "Montreuil"),
    ("93053", "Noisy-le-Sec"),
    ("93055", "Pantin"),
    ("93063", "Romainville"),
];

const PARIS_PREFIX: &str = "75";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Territory {
    Paris,
    EstEnsemble,
}

impl Territory {
    /// Classifies a postcode. `None` means the territory is not covered.
    pub fn from_postcode(postcode: &str) -> Option<Self> {
        let postcode = postcode.trim();
        if postcode.starts_with(PARIS_PREFIX) {
            return Some(Territory::Paris);
        }
        if EST_ENSEMBLE_POSTCODES.iter().any(|(code, _)| *code == postcode) {
            return Some(Territory::EstEnsemble);
        }
        None
    }

    /// Classifies an INSEE commune code.
    pub fn from_insee(insee_code: &str) -> Option<Self> {
        let insee_code = insee_code.trim();
        if insee_code.starts_with(PARIS_PREFIX) {
            return Some(Territory::Paris);
        }
        if EST_ENSEMBLE_INSEE.iter().any(|(code, _)| *code == insee_code) {
            return Some(Territory::EstEnsemble);
        }
        None
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        match self {
            Territory::Paris => "Paris",
            Territory::EstEnsemble => "Est Ensemble",
        }
    }

    /// Machine slug, as serialized.
    pub fn slug(self) -> &'static str {
        match self {
            Territory::Paris => "paris",
            Territory::EstEnsemble => "est-ensemble",
        }
    }
}

impl fmt::Display for Territory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

pub fn is_supported_postcode(postcode: &str) -> bool {
    Territory::from_postcode(postcode).is_some()
}

/// Name of the Est Ensemble municipality served by `postcode`.
pub fn est_ensemble_city(postcode: &str) -> Option<&'static str> {
    let postcode = postcode.trim();
    EST_ENSEMBLE_POSTCODES
        .iter()
        .find(|(code, _)| *code == postcode)
        .map(|(_, city)| *city)
}

pub fn est_ensemble_postcodes() -> impl Iterator<Item = &'static str> {
    EST_ENSEMBLE_POSTCODES.iter().map(|(code, _)| *code)
}

/// The Paris prefix followed by every Est Ensemble postcode.
pub fn supported_postcode_prefixes() -> Vec<&'static str> {
    std::iter::once(PARIS_PREFIX)
        .chain(est_ensemble_postcodes())
        .collect()
}
