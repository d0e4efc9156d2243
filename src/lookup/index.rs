//! Spatial index for point-score lookups over the grid.

use rstar::{RTree, RTreeObject, AABB};
use tracing::{debug, info};

use crate::models::{DensityCell, GeoPoint};

/// Wrapper for R-tree indexing of grid cells
#[derive(Clone)]
struct IndexedCell {
    cell: DensityCell,
    envelope: AABB<[f64; 2]>,
}

impl RTreeObject for IndexedCell {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope
    }
}

impl IndexedCell {
    fn new(cell: DensityCell) -> Self {
        let bounds = cell.bounds();
        let envelope = AABB::from_corners(
            [bounds.min().x, bounds.min().y],
            [bounds.max().x, bounds.max().y],
        );
        Self { cell, envelope }
    }
}

/// R-tree of grid cells keyed on ring bounding boxes.
///
/// Containment is decided by the bounding box alone, matching the bounds
/// semantics of [`DensityCell`]. The envelope test is the whole test; no
/// exact polygon check runs behind it.
pub struct DensityIndex {
    tree: RTree<IndexedCell>,
}

impl DensityIndex {
    /// Build the index from validated cells.
    pub fn build(cells: Vec<DensityCell>) -> Self {
        info!("building spatial index for {} cells", cells.len());
        let indexed: Vec<IndexedCell> = cells.into_iter().map(IndexedCell::new).collect();
        let tree = RTree::bulk_load(indexed);
        Self { tree }
    }

    /// Density at `point`, or 0.0 when no cell's bounds contain it.
    ///
    /// When several cells contain the point (overlapping grids, or shared
    /// edges) the cell latest in dataset order wins; that is the documented
    /// overlap policy, not an accident of iteration order. A matching cell
    /// with no density reading scores 0.0.
    pub fn score_at(&self, point: GeoPoint) -> f64 {
        let query = AABB::from_point([point.lon, point.lat]);

        // Envelope intersection finds the candidates; the cell's own bounds
        // test settles edge cases on shared borders.
        let winner = self
            .tree
            .locate_in_envelope_intersecting(&query)
            .filter(|ic| ic.cell.contains(point))
            .max_by_key(|ic| ic.cell.dataset_index);

        match winner {
            Some(ic) => {
                debug!(
                    "point ({}, {}) falls in cell {}",
                    point.lat, point.lon, ic.cell.dataset_index
                );
                ic.cell.density.unwrap_or(0.0)
            }
            None => 0.0,
        }
    }

    /// Number of indexed cells.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }

    /// Iterate over all indexed cells, in no particular order.
    pub fn cells(&self) -> impl Iterator<Item = &DensityCell> {
        self.tree.iter().map(|ic| &ic.cell)
    }
}
