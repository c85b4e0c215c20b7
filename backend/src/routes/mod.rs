//! Route definitions for the Maize Advisor Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Weather-based planting advice
        .route("/weather", get(handlers::get_planting_advice))
        // Field polygon registration
        .route("/polygons", post(handlers::create_polygon))
        // NDVI-based crop health
        .route("/crop-health", get(handlers::get_crop_health))
}
