//! HTTP handler for weather-based planting advice

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::planting::{PlantingAdviceResponse, PlantingService};
use crate::AppState;

/// Query parameters for planting advice
#[derive(Debug, Deserialize)]
pub struct PlantingQuery {
    pub latitude: f64,
    pub longitude: f64,
}

/// Weather-driven maize planting advice for a location
pub async fn get_planting_advice(
    State(state): State<AppState>,
    Query(query): Query<PlantingQuery>,
) -> AppResult<Json<PlantingAdviceResponse>> {
    let service = PlantingService::new(state.config.clone());
    let advice = service
        .planting_advice(query.latitude, query.longitude)
        .await?;
    Ok(Json(advice))
}
