//! Popgrid - population-density grid lookup and ranking.
//!
//! This library provides shared types and modules for the query binary.

pub mod dataset;
pub mod lookup;
pub mod models;

pub use lookup::{top_k, DensityIndex, RankedLocation};
pub use models::{DensityCell, Facility, GeoPoint};
