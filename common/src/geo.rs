//! # Geographic Model
//!
//! * [`point::GeoPoint`]: a WGS84 location produced by geocoding.
//! * [`shape::Geometry`]: the raw GeoJSON geometry served by the datasets.
//! * [`shape::ZoneShape`]: the tagged Polygon / MultiPolygon variant.
//! * [`shape::ZonePolygon`]: a named zone normalised to canonical `[lon, lat]` rings.

pub mod point;
pub mod shape;

pub use point::GeoPoint;
pub use shape::{AxisOrder, Geometry, ZonePolygon, ZoneShape};
