//! Est Ensemble resolver, backed by two dated data.gouv.fr snapshots: the zone
//! boundaries (GeoJSON) and the rent table (JSON rows).
//!
//! Both snapshots are fetched once and kept in an [`EstEnsembleDataset`] owned by
//! the host. There is no distance fallback here: a point outside every zone has
//! no data.

use std::sync::Arc;

use encadre_common::category::{BuildingType, RegulationCategory};
use encadre_common::config::EstEnsembleConfig;
use encadre_common::error::LookupError;
use encadre_common::geo::{AxisOrder, GeoPoint, Geometry, ZonePolygon, ZoneShape};
use encadre_common::rates::{MatchQuality, RateSchedule};
use encadre_common::utils::decimal;
use serde::{Deserialize, Deserializer};
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};
use url::Url;

use crate::transport::{self, DatasetTransport};
use crate::vocabulary::est_ensemble::{self as vocab, PieceCount};

/// Municipality of each zone id used by both snapshots.
const ZONE_NAMES: [(u32, &str); 9] = [
    (307, "Bagnolet"),
    (308, "Bobigny"),
    (309, "Bondy"),
    (310, "Le Pré-Saint-Gervais"),
    (311, "Les Lilas"),
    (312, "Montreuil"),
    (313, "Noisy-le-Sec"),
    (314, "Pantin"),
    (315, "Romainville"),
];

/// Human-readable name for a zone id, `"Zone <id>"` when unknown.
pub fn zone_name(zone: u32) -> String {
    ZONE_NAMES
        .iter()
        .find(|(id, _)| *id == zone)
        .map(|(_, name)| name.to_string())
        .unwrap_or_else(|| format!("Zone {zone}"))
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    #[serde(default)]
    properties: Option<ZoneProperties>,
    geometry: Option<Geometry>,
}

#[derive(Debug, Deserialize)]
struct ZoneProperties {
    #[serde(default, alias = "Zone", deserialize_with = "deserialize_zone_id")]
    zone: Option<u32>,
}

fn deserialize_zone_id<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = decimal::deserialize_text(deserializer)?;
    Ok(raw.trim().parse().ok())
}

#[derive(Debug, Deserialize)]
struct RawRentRow {
    zone: u32,
    nombre_de_piece: PieceCount,
    annee_de_construction: String,
    meuble: bool,
    maison: bool,
    #[serde(default, deserialize_with = "decimal::deserialize_lenient")]
    prix_med: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize_lenient")]
    prix_max: Option<f64>,
    #[serde(default, deserialize_with = "decimal::deserialize_lenient")]
    prix_min: Option<f64>,
}

/// One parsed row of the rent table.
#[derive(Debug, Clone, PartialEq)]
pub struct RentRow {
    pub zone: u32,
    pub piece: PieceCount,
    pub annee_de_construction: String,
    pub meuble: bool,
    pub maison: bool,
    pub schedule: RateSchedule,
}

impl RawRentRow {
    fn parse(self) -> Option<RentRow> {
        let schedule = RateSchedule::new(self.prix_med?, self.prix_max?, self.prix_min?);
        Some(RentRow {
            zone: self.zone,
            piece: self.nombre_de_piece,
            annee_de_construction: self.annee_de_construction,
            meuble: self.meuble,
            maison: self.maison,
            schedule,
        })
    }
}

/// In-memory copy of both snapshots.
#[derive(Debug)]
pub struct Snapshot {
    zones: Vec<(u32, ZonePolygon)>,
    rows: Vec<RentRow>,
}

impl Snapshot {
    fn zone_at(&self, point: &GeoPoint) -> Option<u32> {
        self.zones
            .iter()
            .find(|(_, polygon)| polygon.contains(point))
            .map(|(zone, _)| *zone)
    }

    fn find_row(
        &self,
        zone: u32,
        piece: &PieceCount,
        annee: &str,
        meuble: bool,
        maison: bool,
    ) -> Option<&RentRow> {
        self.rows.iter().find(|row| {
            row.zone == zone
                && row.piece == *piece
                && row.annee_de_construction == annee
                && row.meuble == meuble
                && row.maison == maison
        })
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Process-lifetime cache of the Est Ensemble snapshots.
///
/// Populated on the first lookup and read-only afterwards. Concurrent first
/// lookups share one fetch; a failed fetch leaves the cache empty so the next
/// lookup tries again. There is no invalidation: the snapshots are dated.
#[derive(Debug, Default)]
pub struct EstEnsembleDataset {
    snapshot: OnceCell<Snapshot>,
}

impl EstEnsembleDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loaded(&self) -> bool {
        self.snapshot.initialized()
    }

    async fn get_or_load(
        &self,
        transport: &dyn DatasetTransport,
        rent_table_url: &Url,
        zones_url: &Url,
    ) -> Result<&Snapshot, LookupError> {
        self.snapshot
            .get_or_try_init(|| load_snapshot(transport, rent_table_url, zones_url))
            .await
    }
}

async fn load_snapshot(
    transport: &dyn DatasetTransport,
    rent_table_url: &Url,
    zones_url: &Url,
) -> Result<Snapshot, LookupError> {
    info!("Loading Est Ensemble snapshots");
    let (raw_rows, collection) = tokio::try_join!(
        transport::get_json::<Vec<RawRentRow>>(transport, rent_table_url),
        transport::get_json::<FeatureCollection>(transport, zones_url),
    )?;

    let total_rows = raw_rows.len();
    let rows: Vec<RentRow> = raw_rows.into_iter().filter_map(RawRentRow::parse).collect();
    if rows.len() < total_rows {
        warn!(
            "Dropped {} Est Ensemble rows with unreadable prices",
            total_rows - rows.len()
        );
    }

    let zones: Vec<(u32, ZonePolygon)> = collection
        .features
        .into_iter()
        .filter_map(|feature| {
            let zone = feature.properties?.zone?;
            let shape = ZoneShape::from_geometry(feature.geometry.as_ref()?)?;
            let polygon = ZonePolygon::new(zone_name(zone), shape, AxisOrder::LonLat, None, None);
            Some((zone, polygon))
        })
        .collect();

    info!(
        "Est Ensemble snapshots loaded: {} rent rows, {} zones",
        rows.len(),
        zones.len()
    );
    Ok(Snapshot { zones, rows })
}

/// An Est Ensemble zone and its rates, echoing the row that actually matched.
#[derive(Debug, Clone, PartialEq)]
pub struct EstEnsembleMatch {
    pub zone: u32,
    pub zone_name: String,
    pub schedule: RateSchedule,
    pub reference_year: String,
    pub piece: PieceCount,
    pub annee_de_construction: String,
    pub meuble: bool,
    pub maison: bool,
    pub quality: MatchQuality,
}

pub struct EstEnsembleResolver {
    transport: Arc<dyn DatasetTransport>,
    rent_table_url: Url,
    zones_url: Url,
    reference_year: String,
}

impl EstEnsembleResolver {
    pub fn new(
        transport: Arc<dyn DatasetTransport>,
        config: &EstEnsembleConfig,
    ) -> Result<Self, url::ParseError> {
        Ok(Self {
            transport,
            rent_table_url: Url::parse(&config.rent_table_url)?,
            zones_url: Url::parse(&config.zones_url)?,
            reference_year: config.reference_year.clone(),
        })
    }

    /// Finds the zone containing `point` and its rates for `category`.
    ///
    /// A house query with no house row is retried as an apartment; the result is
    /// then flagged [`MatchQuality::ApartmentFallback`] and reports `maison: false`.
    pub async fn resolve(
        &self,
        dataset: &EstEnsembleDataset,
        point: &GeoPoint,
        category: &RegulationCategory,
    ) -> Result<Option<EstEnsembleMatch>, LookupError> {
        let snapshot = dataset
            .get_or_load(self.transport.as_ref(), &self.rent_table_url, &self.zones_url)
            .await?;

        let Some(zone) = snapshot.zone_at(point) else {
            warn!("No Est Ensemble zone contains {point}");
            return Ok(None);
        };
        let name = zone_name(zone);
        info!("Point {point} is inside zone {zone} ({name})");

        let piece = vocab::piece(category.room_count);
        let annee = vocab::annee_de_construction(category.construction_period);
        let meuble = category.is_furnished;
        let maison = category.building_type == BuildingType::House;
        debug!(
            "Est Ensemble search: zone={zone} piece={piece} annee={annee} meuble={meuble} maison={maison}"
        );

        let (row, quality) = match snapshot.find_row(zone, &piece, annee, meuble, maison) {
            Some(row) => (row, MatchQuality::Exact),
            None if maison => {
                let Some(row) = snapshot.find_row(zone, &piece, annee, meuble, false) else {
                    warn!("No Est Ensemble row for this category, even as an apartment");
                    return Ok(None);
                };
                warn!("No house row for zone {zone}, using the apartment row instead");
                (row, MatchQuality::ApartmentFallback)
            }
            None => {
                warn!("No Est Ensemble row for this category");
                return Ok(None);
            }
        };

        super::check_schedule(&name, &row.schedule);

        Ok(Some(EstEnsembleMatch {
            zone,
            zone_name: name,
            schedule: row.schedule,
            reference_year: self.reference_year.clone(),
            piece: row.piece.clone(),
            annee_de_construction: row.annee_de_construction.clone(),
            meuble: row.meuble,
            maison: row.maison,
            quality,
        }))
    }
}
