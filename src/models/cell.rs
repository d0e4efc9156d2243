//! Population grid cells and their boundary rings.

use geo::BoundingRect;
use geo_types::{Coord, LineString, Rect};

use super::GeoPoint;

/// One cell of the population grid: a boundary ring plus a density reading.
///
/// All spatial reasoning about a cell goes through its bounding rectangle.
/// Containment and the representative center are bounds-based, never exact
/// polygon math; this is a deliberate precision trade-off carried over from
/// the source data pipeline.
#[derive(Debug, Clone)]
pub struct DensityCell {
    /// Outer boundary ring in source (lon, lat) order: x = lon, y = lat.
    ring: LineString<f64>,
    /// Population density (persons per km2). `None` when the source feature
    /// carries no density property, which is distinct from a measured zero.
    pub density: Option<f64>,
    /// Position of the source feature in the dataset. Overlap resolution
    /// picks the highest index, so later features shadow earlier ones.
    pub dataset_index: usize,
    bounds: Rect<f64>,
}

impl DensityCell {
    /// Validate a ring and build a cell from it.
    ///
    /// Returns `None` for degenerate rings (fewer than 3 distinct finite
    /// points); such features are excluded from every query rather than
    /// reported as errors.
    pub fn new(ring: Vec<Coord<f64>>, density: Option<f64>, dataset_index: usize) -> Option<Self> {
        let ring: Vec<Coord<f64>> = ring
            .into_iter()
            .filter(|c| c.x.is_finite() && c.y.is_finite())
            .collect();

        let mut distinct: Vec<Coord<f64>> = Vec::new();
        for c in &ring {
            if !distinct.contains(c) {
                distinct.push(*c);
            }
        }
        if distinct.len() < 3 {
            return None;
        }

        let ring = LineString::new(ring);
        let bounds = ring.bounding_rect()?;

        Some(Self {
            ring,
            density,
            dataset_index,
            bounds,
        })
    }

    /// Bounding rectangle of the ring, in (lon, lat) coordinates.
    pub fn bounds(&self) -> Rect<f64> {
        self.bounds
    }

    /// The boundary ring as loaded, (lon, lat) order.
    pub fn ring(&self) -> &LineString<f64> {
        &self.ring
    }

    /// Whether the cell's bounds contain the point. Edges are inclusive.
    pub fn contains(&self, point: GeoPoint) -> bool {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        point.lon >= min.x && point.lon <= max.x && point.lat >= min.y && point.lat <= max.y
    }

    /// Representative location of the cell: the midpoint of its bounding
    /// rectangle, not the true polygon centroid.
    pub fn bounds_center(&self) -> GeoPoint {
        let c = self.bounds.center();
        GeoPoint { lat: c.y, lon: c.x }
    }
}
