//! HTTP handler for NDVI-based crop health lookup

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::crop_health::{CropHealthResponse, CropHealthService, DEFAULT_LOOKBACK_DAYS};
use crate::AppState;

/// Query parameters for crop health lookup
#[derive(Debug, Deserialize)]
pub struct CropHealthQuery {
    #[serde(default = "default_poly_id")]
    pub poly_id: String,
    #[serde(default = "default_lookback")]
    pub days_lookback: i64,
}

fn default_poly_id() -> String {
    "your_polygon_id_here".to_string()
}

fn default_lookback() -> i64 {
    DEFAULT_LOOKBACK_DAYS
}

/// NDVI-based crop health for a registered polygon
pub async fn get_crop_health(
    State(state): State<AppState>,
    Query(query): Query<CropHealthQuery>,
) -> AppResult<Json<CropHealthResponse>> {
    let service = CropHealthService::new(state.config.clone());
    let report = service
        .evaluate(&query.poly_id, query.days_lookback)
        .await?;
    Ok(Json(report))
}
