//! GeoJSON feature envelope and coordinate-order conversion
//!
//! Map widgets hand us Leaflet-convention `[lat, lon]` pairs; the imagery
//! provider expects GeoJSON-convention `[lon, lat]`. The conversion is a
//! recursive swap of every leaf pair in Polygon and MultiPolygon
//! geometries. Any other geometry type is forwarded untouched.

use serde::{Deserialize, Serialize};

/// A single coordinate pair, serialized as a two-element array
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position(pub f64, pub f64);

impl Position {
    /// Swap the pair order; applying twice restores the original
    pub fn swapped(self) -> Self {
        Position(self.1, self.0)
    }
}

/// A linear ring of coordinate pairs
pub type Ring = Vec<Position>;

/// Typed view of the geometries the coordinate transform understands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl Geometry {
    /// Swap every leaf coordinate pair, preserving the nesting structure
    pub fn swap_coordinate_order(self) -> Self {
        match self {
            Geometry::Polygon(rings) => Geometry::Polygon(swap_rings(rings)),
            Geometry::MultiPolygon(polygons) => {
                Geometry::MultiPolygon(polygons.into_iter().map(swap_rings).collect())
            }
        }
    }
}

fn swap_rings(rings: Vec<Ring>) -> Vec<Ring> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(Position::swapped).collect())
        .collect()
}

/// A GeoJSON Feature as supplied by the caller.
///
/// The geometry is kept as raw JSON so unrecognized geometry types survive
/// round-tripping; all other members (`properties` and friends) are
/// preserved verbatim.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoJsonFeature {
    #[serde(rename = "type", default)]
    pub feature_type: String,
    #[serde(default)]
    pub geometry: Option<serde_json::Value>,
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl GeoJsonFeature {
    /// Convert Leaflet-order coordinates to the provider's order.
    ///
    /// Polygon and MultiPolygon geometries are swapped in place; anything
    /// else (Point, LineString, ...) is left exactly as received.
    pub fn to_provider_coordinate_order(&mut self) {
        let geometry = match self.geometry.as_mut() {
            Some(geometry) => geometry,
            None => return,
        };

        let typed = match serde_json::from_value::<Geometry>(geometry.clone()) {
            Ok(typed) => typed,
            Err(_) => return,
        };

        if let Ok(swapped) = serde_json::to_value(typed.swap_coordinate_order()) {
            *geometry = swapped;
        }
    }
}
