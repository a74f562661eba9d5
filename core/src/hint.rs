//! # Construction-Period Hint
//!
//! Suggests the construction period of the building at an address, to pre-fill
//! the form. Independent from the rent lookup: it may run before, after or
//! alongside it, and a missing hint is never an error.

use std::sync::Arc;

use async_trait::async_trait;
use encadre_common::category::ConstructionPeriod;
use encadre_common::config::ApurConfig;
use encadre_common::geo::GeoPoint;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info, warn};
use url::Url;

use crate::transport::{self, DatasetTransport};

/// A suggested construction period and the registry value it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildingHint {
    pub period: ConstructionPeriod,
    pub registry_code: u8,
    pub registry_label: &'static str,
}

#[async_trait]
pub trait ConstructionPeriodHint: Send + Sync {
    async fn construction_period(&self, point: &GeoPoint) -> Option<BuildingHint>;
}

/// APUR `c_perconst` codes with their period label and rent-control band.
const APUR_PERIODS: [(u8, &str, ConstructionPeriod); 13] = [
    (1, "Avant 1800", ConstructionPeriod::Before1946),
    (2, "1801-1850", ConstructionPeriod::Before1946),
    (3, "1851-1914", ConstructionPeriod::Before1946),
    (4, "1915-1939", ConstructionPeriod::Before1946),
    (5, "1915-1939", ConstructionPeriod::Before1946),
    (6, "1940-1967", ConstructionPeriod::From1946To1970),
    (7, "1968-1975", ConstructionPeriod::From1971To1990),
    (8, "1976-1981", ConstructionPeriod::From1971To1990),
    (9, "1982-1989", ConstructionPeriod::From1971To1990),
    (10, "1990-1999", ConstructionPeriod::After1990),
    (11, "2000-2009", ConstructionPeriod::After1990),
    (12, "2010-2014", ConstructionPeriod::After1990),
    (13, "Après 2015", ConstructionPeriod::After1990),
];

pub fn hint_for_apur_code(code: u8) -> Option<BuildingHint> {
    APUR_PERIODS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(code, label, period)| BuildingHint {
            period: *period,
            registry_code: *code,
            registry_label: label,
        })
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    features: Vec<BuildingFeature>,
}

#[derive(Debug, Deserialize)]
struct BuildingFeature {
    #[serde(default)]
    attributes: BuildingAttributes,
}

#[derive(Debug, Default, Deserialize)]
struct BuildingAttributes {
    c_perconst: Option<f64>,
}

/// Queries the APUR building-footprint layer (Paris only).
pub struct ApurHintProvider {
    transport: Arc<dyn DatasetTransport>,
    query_url: Url,
    envelope_buffer_deg: f64,
}

impl ApurHintProvider {
    pub fn new(
        transport: Arc<dyn DatasetTransport>,
        config: &ApurConfig,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            transport,
            query_url: Url::parse(&config.query_url)?,
            envelope_buffer_deg: config.envelope_buffer_deg,
        })
    }

    fn query_url(&self, point: &GeoPoint) -> Url {
        let b = self.envelope_buffer_deg;
        let envelope = json!({
            "xmin": point.longitude - b,
            "ymin": point.latitude - b,
            "xmax": point.longitude + b,
            "ymax": point.latitude + b,
            "spatialReference": { "wkid": 4326 }
        });

        let mut url = self.query_url.clone();
        url.query_pairs_mut()
            .append_pair("geometry", &envelope.to_string())
            .append_pair("geometryType", "esriGeometryEnvelope")
            .append_pair("spatialRel", "esriSpatialRelIntersects")
            .append_pair("outFields", "c_perconst")
            .append_pair("returnGeometry", "false")
            .append_pair("f", "json");
        url
    }
}

#[async_trait]
impl ConstructionPeriodHint for ApurHintProvider {
    async fn construction_period(&self, point: &GeoPoint) -> Option<BuildingHint> {
        let url = self.query_url(point);
        let fetched = transport::get_json::<QueryResponse>(self.transport.as_ref(), &url).await;
        let response = match fetched {
            Ok(response) => response,
            Err(e) => {
                warn!("Building registry lookup failed: {e}");
                return None;
            }
        };

        let Some(code) = response
            .features
            .first()
            .and_then(|feature| feature.attributes.c_perconst)
        else {
            debug!("No building found around {point}");
            return None;
        };

        let hint = (code.fract() == 0.0 && (0.0..=255.0).contains(&code))
            .then(|| hint_for_apur_code(code as u8))
            .flatten();
        match &hint {
            Some(h) => info!(
                "Building at {point} dates from {} ({})",
                h.registry_label,
                h.period.code()
            ),
            None => debug!("Unknown APUR period code {code}"),
        }
        hint
    }
}
