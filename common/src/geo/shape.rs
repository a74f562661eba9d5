use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::GeoPoint;
use crate::utils::geometry::{self, Position};

/// GeoJSON geometry exactly as the datasets serve it.
///
/// Positions are kept as loose vectors because some snapshots carry a third
/// (altitude) component.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon {
        coordinates: Vec<Vec<Vec<f64>>>,
    },
    MultiPolygon {
        coordinates: Vec<Vec<Vec<Vec<f64>>>>,
    },
    #[serde(other)]
    Unsupported,
}

/// The exterior ring(s) of a zone, still in the dataset's own axis order.
#[derive(Debug, Clone, PartialEq)]
pub enum ZoneShape {
    Polygon(Vec<Position>),
    MultiPolygon(Vec<Vec<Position>>),
}

impl ZoneShape {
    /// Keeps the exterior ring of each polygon; holes are dropped.
    ///
    /// Returns `None` for unsupported geometry types or shapes without a usable ring.
    pub fn from_geometry(geometry: &Geometry) -> Option<Self> {
        match geometry {
            Geometry::Polygon { coordinates } => {
                let ring = to_ring(coordinates.first()?);
                (!ring.is_empty()).then_some(ZoneShape::Polygon(ring))
            }
            Geometry::MultiPolygon { coordinates } => {
                let rings: Vec<Vec<Position>> = coordinates
                    .iter()
                    .filter_map(|polygon| polygon.first())
                    .map(|ring| to_ring(ring))
                    .filter(|ring| !ring.is_empty())
                    .collect();
                (!rings.is_empty()).then_some(ZoneShape::MultiPolygon(rings))
            }
            Geometry::Unsupported => None,
        }
    }

    pub fn into_rings(self) -> Vec<Vec<Position>> {
        match self {
            ZoneShape::Polygon(ring) => vec![ring],
            ZoneShape::MultiPolygon(rings) => rings,
        }
    }
}

fn to_ring(raw: &[Vec<f64>]) -> Vec<Position> {
    raw.iter()
        .filter(|pos| pos.len() >= 2)
        .map(|pos| [pos[0], pos[1]])
        .collect()
}

/// Axis order of the vertices stored in a dataset.
///
/// GeoJSON mandates `[lon, lat]`, but sample polygons from the Paris dataset have
/// been seen stored as `[lat, lon]`. `Auto` decides per ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AxisOrder {
    #[default]
    Auto,
    LonLat,
    LatLon,
}

impl AxisOrder {
    /// Picks a concrete order for `ring`.
    ///
    /// `Auto` compares the ring's mean vertex with `reference` read both ways and
    /// keeps the closer reading. Without a reference, GeoJSON order is assumed.
    pub fn resolve(self, ring: &[Position], reference: Option<&GeoPoint>) -> AxisOrder {
        match self {
            AxisOrder::LonLat | AxisOrder::LatLon => self,
            AxisOrder::Auto => {
                let Some(reference) = reference else {
                    return AxisOrder::LonLat;
                };
                if ring.is_empty() {
                    return AxisOrder::LonLat;
                }
                let n = ring.len() as f64;
                let mean_a = ring.iter().map(|p| p[0]).sum::<f64>() / n;
                let mean_b = ring.iter().map(|p| p[1]).sum::<f64>() / n;

                let as_lon_lat =
                    (mean_a - reference.longitude).abs() + (mean_b - reference.latitude).abs();
                let as_lat_lon =
                    (mean_a - reference.latitude).abs() + (mean_b - reference.longitude).abs();

                if as_lat_lon < as_lon_lat {
                    AxisOrder::LatLon
                } else {
                    AxisOrder::LonLat
                }
            }
        }
    }
}

impl FromStr for AxisOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(AxisOrder::Auto),
            "lon-lat" | "lonlat" => Ok(AxisOrder::LonLat),
            "lat-lon" | "latlon" => Ok(AxisOrder::LatLon),
            _ => Err(format!("invalid axis order: {s} (expected auto, lon-lat or lat-lon)")),
        }
    }
}

/// A named regulatory zone with its rings normalised to `[lon, lat]`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZonePolygon {
    pub name: String,
    rings: Vec<Vec<Position>>,
    pub centroid: Option<GeoPoint>,
}

impl ZonePolygon {
    /// Normalises every ring of `shape` to `[lon, lat]`.
    ///
    /// With [`AxisOrder::Auto`] the ring order is detected against `centroid`
    /// first, then against `fallback_reference`.
    pub fn new(
        name: impl Into<String>,
        shape: ZoneShape,
        order: AxisOrder,
        centroid: Option<GeoPoint>,
        fallback_reference: Option<&GeoPoint>,
    ) -> Self {
        let reference = centroid.as_ref().or(fallback_reference);
        let rings = shape
            .into_rings()
            .into_iter()
            .map(|ring| match order.resolve(&ring, reference) {
                AxisOrder::LatLon => ring.into_iter().map(|[a, b]| [b, a]).collect(),
                _ => ring,
            })
            .collect();

        Self {
            name: name.into(),
            rings,
            centroid,
        }
    }

    /// Exterior rings in `[lon, lat]` order.
    pub fn rings(&self) -> &[Vec<Position>] {
        &self.rings
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        let target = point.lon_lat();
        self.rings
            .iter()
            .any(|ring| geometry::point_in_polygon(target, ring))
    }
}
