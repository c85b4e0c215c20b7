//! Polygon registration service
//!
//! Validates a caller-drawn GeoJSON Feature, converts its coordinates from
//! Leaflet order to the provider's order, and registers it with the imagery
//! provider.

use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use shared::{validate_feature, GeoJsonFeature};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::agro::{AgroClient, CreatePolygonBody};

/// Polygon registration service
#[derive(Clone)]
pub struct PolygonService {
    config: Arc<Config>,
}

/// Request body for polygon creation
#[derive(Debug, Deserialize)]
pub struct CreatePolygonRequest {
    pub geo_json: Option<GeoJsonFeature>,
}

/// Response after successful registration
#[derive(Debug, Serialize)]
pub struct CreatePolygonResponse {
    pub poly_id: String,
    pub message: &'static str,
}

impl PolygonService {
    /// Create a new PolygonService instance
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Validate, transform, and register a field polygon
    pub async fn register(&self, request: CreatePolygonRequest) -> AppResult<CreatePolygonResponse> {
        if self.config.imagery.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Imagery API key not configured".to_string(),
            ));
        }

        let mut feature = request.geo_json.ok_or_else(invalid_geojson)?;
        validate_feature(&feature).map_err(|msg| AppError::Validation(msg.to_string()))?;

        // Leaflet [lat, lon] -> provider [lon, lat]
        feature.to_provider_coordinate_order();

        let body = CreatePolygonBody {
            name: polygon_name(),
            geo_json: feature,
        };

        let client = AgroClient::new(
            self.config.imagery.api_endpoint.clone(),
            self.config.imagery.api_key.clone(),
        );
        let poly_id = client.create_polygon(&body).await?;

        tracing::info!(%poly_id, "polygon registered with imagery provider");

        Ok(CreatePolygonResponse {
            poly_id,
            message: "Polygon created successfully",
        })
    }
}

fn invalid_geojson() -> AppError {
    AppError::Validation("Invalid GeoJSON: must be Feature with geometry".to_string())
}

/// Provider-side display name, stamped with the local creation time
fn polygon_name() -> String {
    format!("Farm from App - {}", Local::now().format("%Y-%m-%d %H:%M"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polygon_name_carries_timestamp() {
        let name = polygon_name();
        assert!(name.starts_with("Farm from App - "));
        // "YYYY-MM-DD HH:MM" suffix
        assert_eq!(name.len(), "Farm from App - ".len() + 16);
    }

    #[test]
    fn test_missing_geo_json_is_a_validation_error() {
        let err = invalid_geojson();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
