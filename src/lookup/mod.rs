//! Point scoring and top-K ranking over the population grid.
//!
//! Builds a spatial index over cell bounding boxes and answers two queries:
//! the density at a clicked point, and the K densest cells reduced to
//! representative points.

mod index;
mod rank;

pub use index::DensityIndex;
pub use rank::{top_k, RankedLocation};
