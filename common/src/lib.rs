//! # Encadre Common
//!
//! Shared model for the rent-control lookup.
//!
//! * **[`geo`]**: points, zone polygons and the GeoJSON shapes they are ingested from.
//! * **[`category`]**: the regulation category a lease is looked up under.
//! * **[`rates`]**: per-area rate schedules and how well a zone matched.
//! * **[`territory`]**: postcode and INSEE classification of the covered territories.
//! * **[`lookup`]**: the unified lookup result handed to presentation.
//! * **[`error`]**: the error taxonomy shared by every resolver.
//! * **[`config`]**: dataset endpoints and lookup options.
//! * **[`utils`]**: geometry primitives and decimal parsing.

pub mod category;
pub mod config;
pub mod error;
pub mod geo;
pub mod lookup;
pub mod rates;
pub mod territory;
pub mod utils;
