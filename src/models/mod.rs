//! Core data models for the population grid.

pub mod cell;
pub mod facility;

use serde::{Deserialize, Serialize};

pub use cell::DensityCell;
pub use facility::Facility;

/// Geographic point (lat/lon)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}
