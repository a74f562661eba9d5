use serde::Deserialize;

use crate::geo::AxisOrder;

pub const PARIS_RECORDS_URL: &str =
    "https://opendata.paris.fr/api/explore/v2.1/catalog/datasets/logement-encadrement-des-loyers/records";
pub const EST_ENSEMBLE_RENT_TABLE_URL: &str =
    "https://static.data.gouv.fr/resources/encadrement-des-loyers-de-est-ensemble/20230601-202658/encadrements-est-ensemble-2023.json";
pub const EST_ENSEMBLE_ZONES_URL: &str =
    "https://static.data.gouv.fr/resources/encadrement-des-loyers-de-est-ensemble/20220608-121232/quartier-est-ensemble-geodata.json";
pub const APUR_BUILDINGS_URL: &str =
    "https://carto2.apur.org/apur/rest/services/OPENDATA/EMPRISE_BATIE_PARIS/MapServer/0/query";

/// Lookup configuration shared by the resolvers and the host application.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paris: ParisConfig,
    pub est_ensemble: EstEnsembleConfig,
    pub apur: ApurConfig,
    /// Applies to every dataset request.
    pub http_timeout_secs: u64,
    /// Skips the construction-period hint lookup.
    pub no_hint: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paris: ParisConfig::default(),
            est_ensemble: EstEnsembleConfig::default(),
            apur: ApurConfig::default(),
            http_timeout_secs: 30,
            no_hint: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParisConfig {
    pub records_url: String,
    /// Value of the `annee` filter.
    pub reference_year: String,
    /// One record per quartier is expected; Paris has 80.
    pub record_limit: u32,
    /// Axis order of the `geo_shape` rings.
    pub axis_order: AxisOrder,
}

impl Default for ParisConfig {
    fn default() -> Self {
        Self {
            records_url: PARIS_RECORDS_URL.to_string(),
            reference_year: "2025".to_string(),
            record_limit: 100,
            axis_order: AxisOrder::Auto,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EstEnsembleConfig {
    pub rent_table_url: String,
    pub zones_url: String,
    /// Year of the published rent-table snapshot.
    pub reference_year: String,
}

impl Default for EstEnsembleConfig {
    fn default() -> Self {
        Self {
            rent_table_url: EST_ENSEMBLE_RENT_TABLE_URL.to_string(),
            zones_url: EST_ENSEMBLE_ZONES_URL.to_string(),
            reference_year: "2023".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApurConfig {
    pub query_url: String,
    /// Half-width, in degrees, of the envelope queried around the address (~20 m).
    pub envelope_buffer_deg: f64,
}

impl Default for ApurConfig {
    fn default() -> Self {
        Self {
            query_url: APUR_BUILDINGS_URL.to_string(),
            envelope_buffer_deg: 0.0002,
        }
    }
}
