//! Facility markers, passed through to the presentation layer unchanged.

use serde::{Deserialize, Serialize};

use super::GeoPoint;

/// A named point of interest. The core never interprets facilities beyond
/// parsing; what to do with them is the caller's business.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Source order: [lon, lat].
    pub coords: [f64; 2],
}

impl Facility {
    /// Marker position in (lat, lon) terms.
    pub fn position(&self) -> GeoPoint {
        GeoPoint {
            lat: self.coords[1],
            lon: self.coords[0],
        }
    }
}
