//! Fill-color scale for density polygons.

/// Hex fill color for a density value. Thresholds and colors follow the
/// standard choropleth scale the map front end uses for these polygons.
pub fn color_for_density(density: f64) -> &'static str {
    if density > 5000.0 {
        "#800026"
    } else if density > 2500.0 {
        "#BD0026"
    } else if density > 1000.0 {
        "#E31A1C"
    } else if density > 500.0 {
        "#FC4E2A"
    } else if density > 200.0 {
        "#FD8D3C"
    } else if density > 100.0 {
        "#FEB24C"
    } else if density > 50.0 {
        "#FED976"
    } else {
        "#FFEDA0"
    }
}
