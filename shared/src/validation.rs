//! Boundary validation helpers

use crate::models::GeoJsonFeature;

/// Minimal GeoJSON shape check: the payload must be a Feature carrying a
/// non-null geometry. Geometry contents are not validated beyond that.
pub fn validate_feature(feature: &GeoJsonFeature) -> Result<(), &'static str> {
    if feature.feature_type != "Feature" {
        return Err("Invalid GeoJSON: must be Feature with geometry");
    }
    match &feature.geometry {
        Some(geometry) if !geometry.is_null() => Ok(()),
        _ => Err("Invalid GeoJSON: must be Feature with geometry"),
    }
}
