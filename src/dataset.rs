//! One-shot loading of the two static datasets.
//!
//! The population grid is a GeoJSON-style feature collection. Loading is
//! lenient: a feature with a wrongly nested geometry or a degenerate ring is
//! skipped, never fatal, and the grid is whatever survives. Only I/O failures
//! and an unparseable document are errors. The facilities list is small and
//! regular, so it is parsed strictly.

use std::fs;
use std::path::Path;

use geo_types::Coord;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info};

use crate::models::{DensityCell, Facility};

/// Errors from the dataset loading boundary.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("population grid root has no features array")]
    NotAFeatureCollection,
}

/// Load the population grid from a GeoJSON file.
pub fn load_grid(path: &Path) -> Result<Vec<DensityCell>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let root: Value = serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
        path: path.display().to_string(),
        source,
    })?;
    grid_from_value(&root)
}

/// Build grid cells from an already parsed feature collection.
///
/// Each feature contributes at most one cell: its outer ring
/// (`geometry.coordinates[0]`) and the optional `properties.PDEN_KM2`
/// density. The feature's position in the collection becomes the cell's
/// `dataset_index`.
pub fn grid_from_value(root: &Value) -> Result<Vec<DensityCell>, DatasetError> {
    let features = root
        .get("features")
        .and_then(Value::as_array)
        .ok_or(DatasetError::NotAFeatureCollection)?;

    let mut cells = Vec::new();
    for (idx, feature) in features.iter().enumerate() {
        let density = feature
            .pointer("/properties/PDEN_KM2")
            .and_then(Value::as_f64);

        let Some(ring) = outer_ring(feature) else {
            debug!("skipping feature {idx}: geometry is not a nested ring");
            continue;
        };

        match DensityCell::new(ring, density, idx) {
            Some(cell) => cells.push(cell),
            None => debug!("skipping feature {idx}: degenerate ring"),
        }
    }

    info!(
        "loaded {} grid cells from {} features",
        cells.len(),
        features.len()
    );
    Ok(cells)
}

/// Load the facilities list from a JSON file.
pub fn load_facilities(path: &Path) -> Result<Vec<Facility>, DatasetError> {
    let content = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let facilities: Vec<Facility> =
        serde_json::from_str(&content).map_err(|source| DatasetError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    info!("loaded {} facilities", facilities.len());
    Ok(facilities)
}

/// Extract the outer ring of a feature's polygon, tolerating bad nesting.
///
/// Pairs that are not `[lon, lat]` number arrays are dropped individually;
/// a geometry without the expected `coordinates[0]` array yields `None`.
fn outer_ring(feature: &Value) -> Option<Vec<Coord<f64>>> {
    let outer = feature.pointer("/geometry/coordinates/0")?.as_array()?;
    Some(outer.iter().filter_map(coord_pair).collect())
}

fn coord_pair(value: &Value) -> Option<Coord<f64>> {
    let pair = value.as_array()?;
    if pair.len() < 2 {
        return None;
    }
    let lon = pair[0].as_f64()?;
    let lat = pair[1].as_f64()?;
    Some(Coord { x: lon, y: lat })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn feature(coordinates: Value, density: Option<f64>) -> Value {
        let mut properties = serde_json::Map::new();
        if let Some(d) = density {
            properties.insert("PDEN_KM2".to_string(), json!(d));
        }
        json!({
            "type": "Feature",
            "geometry": { "type": "Polygon", "coordinates": coordinates },
            "properties": properties,
        })
    }

    fn square(density: Option<f64>) -> Value {
        feature(
            json!([[[0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0]]]),
            density,
        )
    }

    #[test]
    fn test_well_formed_grid() {
        let root = json!({ "features": [square(Some(100.0)), square(None)] });
        let cells = grid_from_value(&root).unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0].density, Some(100.0));
        assert_eq!(cells[0].dataset_index, 0);
        assert_eq!(cells[1].density, None);
        assert_eq!(cells[1].dataset_index, 1);
    }

    #[test]
    fn test_wrong_nesting_skipped() {
        // coordinates is a flat pair list, not a ring list
        let flat = feature(json!([[0.0, 0.0], [0.0, 1.0], [1.0, 1.0]]), Some(5.0));
        let root = json!({ "features": [flat, square(Some(7.0))] });
        let cells = grid_from_value(&root).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].density, Some(7.0));
        // Index still reflects the source position
        assert_eq!(cells[0].dataset_index, 1);
    }

    #[test]
    fn test_degenerate_ring_skipped() {
        let two_points = feature(json!([[[0.0, 0.0], [1.0, 1.0]]]), Some(5.0));
        let root = json!({ "features": [two_points] });
        let cells = grid_from_value(&root).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_bad_pairs_dropped_individually() {
        let coords = json!([[[0.0, 0.0], "junk", [0.0, 1.0], [1.5], [1.0, 1.0], [1.0, 0.0]]]);
        let root = json!({ "features": [feature(coords, Some(9.0))] });
        let cells = grid_from_value(&root).unwrap();
        assert_eq!(cells.len(), 1);
        assert_eq!(cells[0].ring().0.len(), 4);
    }

    #[test]
    fn test_missing_geometry_skipped() {
        let root = json!({ "features": [{ "type": "Feature", "properties": { "PDEN_KM2": 3.0 } }] });
        let cells = grid_from_value(&root).unwrap();
        assert!(cells.is_empty());
    }

    #[test]
    fn test_root_without_features_is_error() {
        let root = json!({ "type": "FeatureCollection" });
        assert!(matches!(
            grid_from_value(&root),
            Err(DatasetError::NotAFeatureCollection)
        ));
    }

    #[test]
    fn test_facilities_strict_parse() {
        let raw = r#"[{"name": "Al Noor Clinic", "type": "Clinic", "coords": [46.67, 24.71]}]"#;
        let facilities: Vec<Facility> = serde_json::from_str(raw).unwrap();
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].kind, "Clinic");
        let pos = facilities[0].position();
        assert_eq!(pos.lat, 24.71);
        assert_eq!(pos.lon, 46.67);
    }
}
