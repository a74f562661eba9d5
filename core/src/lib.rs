//! # Encadre Core
//!
//! Decides whether a declared rent complies with the rent-control ceiling of the
//! zone an address falls in.
//!
//! Control flow:
//! 1. [`service::RentControlService`] classifies the postcode and picks a resolver.
//! 2. The [`resolver`] for that territory fetches its dataset through a
//!    [`transport::DatasetTransport`], translates the category with
//!    [`vocabulary`], and locates the containing zone.
//! 3. [`compliance::compute`] turns the per-area rates into a verdict.
//!
//! [`hint`] is an independent lookup that suggests a construction period for the
//! address; it never gates the main lookup.

pub mod compliance;
pub mod hint;
pub mod resolver;
pub mod service;
pub mod transport;
pub mod vocabulary;
