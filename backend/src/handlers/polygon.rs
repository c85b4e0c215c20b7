//! HTTP handler for field polygon registration

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::services::polygon::{CreatePolygonRequest, CreatePolygonResponse, PolygonService};
use crate::AppState;

/// Register a field boundary with the imagery provider
pub async fn create_polygon(
    State(state): State<AppState>,
    Json(request): Json<CreatePolygonRequest>,
) -> AppResult<Json<CreatePolygonResponse>> {
    let service = PolygonService::new(state.config.clone());
    let created = service.register(request).await?;
    Ok(Json(created))
}
