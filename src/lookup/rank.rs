//! Top-K ranking of grid cells by density.

use serde::Serialize;

use crate::models::{DensityCell, GeoPoint};

/// One entry of a top-K ranking: a representative point and its density.
///
/// Ephemeral by design; recomputed from the grid on every call and owned by
/// whoever asked.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RankedLocation {
    pub point: GeoPoint,
    pub density: f64,
}

/// The `k` densest cells, each reduced to the center of its bounding box.
///
/// Cells with a missing or zero density do not rank: absent data cannot be
/// ordered, and a zero reading never makes a "best" list. Ties on density
/// break toward the earlier dataset position, so the ranking is deterministic
/// for any input order. Returns fewer than `k` entries when fewer cells
/// qualify, and an empty vec for `k == 0`.
pub fn top_k<'a, I>(cells: I, k: usize) -> Vec<RankedLocation>
where
    I: IntoIterator<Item = &'a DensityCell>,
{
    let mut ranked: Vec<(f64, &DensityCell)> = cells
        .into_iter()
        .filter_map(|cell| cell.density.map(|d| (d, cell)))
        .filter(|(density, _)| *density > 0.0)
        .collect();

    ranked.sort_by(|a, b| {
        b.0.total_cmp(&a.0)
            .then_with(|| a.1.dataset_index.cmp(&b.1.dataset_index))
    });
    ranked.truncate(k);

    ranked
        .into_iter()
        .map(|(density, cell)| RankedLocation {
            point: cell.bounds_center(),
            density,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::Coord;

    fn cell_at(origin: f64, density: Option<f64>, idx: usize) -> DensityCell {
        let ring = vec![
            Coord { x: origin, y: origin },
            Coord {
                x: origin,
                y: origin + 1.0,
            },
            Coord {
                x: origin + 1.0,
                y: origin + 1.0,
            },
            Coord {
                x: origin + 1.0,
                y: origin,
            },
        ];
        DensityCell::new(ring, density, idx).unwrap()
    }

    #[test]
    fn test_top_three_by_density() {
        let cells = vec![
            cell_at(0.0, Some(10.0), 0),
            cell_at(10.0, Some(50.0), 1),
            cell_at(20.0, Some(5.0), 2),
            cell_at(30.0, Some(90.0), 3),
            cell_at(40.0, Some(0.0), 4),
        ];
        let ranked = top_k(&cells, 3);
        let densities: Vec<f64> = ranked.iter().map(|r| r.density).collect();
        assert_eq!(densities, vec![90.0, 50.0, 10.0]);
    }

    #[test]
    fn test_centers_come_from_bounding_boxes() {
        let cells = vec![cell_at(10.0, Some(50.0), 0)];
        let ranked = top_k(&cells, 1);
        assert_eq!(ranked[0].point, GeoPoint::new(10.5, 10.5));
    }

    #[test]
    fn test_k_larger_than_qualifying_cells() {
        let cells = vec![
            cell_at(0.0, Some(10.0), 0),
            cell_at(10.0, None, 1),
            cell_at(20.0, Some(0.0), 2),
        ];
        let ranked = top_k(&cells, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].density, 10.0);
    }

    #[test]
    fn test_k_zero_returns_empty() {
        let cells = vec![cell_at(0.0, Some(10.0), 0)];
        assert!(top_k(&cells, 0).is_empty());
    }

    #[test]
    fn test_ties_break_on_dataset_order() {
        let cells = vec![
            cell_at(10.0, Some(50.0), 3),
            cell_at(0.0, Some(50.0), 1),
        ];
        let ranked = top_k(&cells, 2);
        assert_eq!(ranked[0].point, GeoPoint::new(0.5, 0.5));
        assert_eq!(ranked[1].point, GeoPoint::new(10.5, 10.5));
    }

    #[test]
    fn test_top_k_is_idempotent() {
        let cells = vec![
            cell_at(0.0, Some(10.0), 0),
            cell_at(10.0, Some(50.0), 1),
        ];
        assert_eq!(top_k(&cells, 2), top_k(&cells, 2));
    }
}
