//! # Geometry Engine
//!
//! Pure numeric primitives used to place a point inside a regulatory zone.
//!
//! Rings are plain slices of `[axis_a, axis_b]` pairs. The primitives do not care
//! which axis is longitude: the caller passes the point in the same order the ring
//! was built with. Boundary points are not guaranteed to count as inside.

/// A single vertex, in whatever axis order the owning ring uses.
pub type Position = [f64; 2];

/// Mean Earth radius used for great-circle distances.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Ray-casting containment test.
///
/// For each edge `(vi, vj)` a crossing is counted when the point's second
/// coordinate lies between the edge's second coordinates and the point's first
/// coordinate is left of the edge at that height. An odd number of crossings
/// means the point is inside.
///
/// Rings with fewer than three vertices never contain anything. A closing vertex
/// equal to the first one is allowed and changes nothing.
pub fn point_in_polygon(point: Position, ring: &[Position]) -> bool {
    if ring.len() < 3 {
        return false;
    }

    let [x, y] = point;
    let mut inside = false;
    let mut j = ring.len() - 1;

    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];

        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Great-circle distance in kilometres between two WGS84 points (haversine formula).
///
/// Only meant to rank candidates; never use it as a containment test.
pub fn haversine_distance_km(lat_a: f64, lon_a: f64, lat_b: f64, lon_b: f64) -> f64 {
    let d_lat = (lat_b - lat_a).to_radians();
    let d_lon = (lon_b - lon_a).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat_a.to_radians().cos() * lat_b.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
