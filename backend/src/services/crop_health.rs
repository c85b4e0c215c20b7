//! Crop health evaluation service
//!
//! Looks up recent satellite scenes for a registered polygon, picks the
//! newest, fetches its NDVI statistics, and classifies the mean into a
//! health tier. Dry-season gaps ("no image") and slow satellite processing
//! ("timeout") are expected operating conditions, not failures, and are
//! returned as structured statuses.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use shared::{classify_ndvi, na_if_none, round3};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::agro::{AgroClient, SatelliteImage};
use crate::external::truncate_chars;

const SECONDS_PER_DAY: i64 = 86_400;

/// Default lookback window for the image search
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Crop health evaluation service
#[derive(Clone)]
pub struct CropHealthService {
    config: Arc<Config>,
}

/// Crop health lookup outcome: a full report, or a structured
/// non-error status when imagery is unavailable
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CropHealthResponse {
    Report(CropHealthReport),
    Unavailable(CropHealthUnavailable),
}

/// Successful NDVI evaluation of the newest scene
#[derive(Debug, Serialize)]
pub struct CropHealthReport {
    pub polygon_id: String,
    pub ndvi_mean: f64,
    pub health_status: &'static str,
    pub advice: &'static str,
    /// Acquisition time of the evaluated scene, unix seconds
    pub satellite_date: i64,
    #[serde(serialize_with = "na_if_none")]
    pub truecolor_image: Option<String>,
}

/// Non-fatal "come back later" statuses
#[derive(Debug, Serialize)]
pub struct CropHealthUnavailable {
    pub status: &'static str,
    pub message: String,
    pub tip: &'static str,
}

impl CropHealthUnavailable {
    fn no_image(days_lookback: i64) -> Self {
        Self {
            status: "no_image",
            message: format!(
                "No clear satellite images found in the last {} days \
                 (common in harmattan/dry season).",
                days_lookback
            ),
            tip: "Try again in 3–7 days or draw polygon over greener area.",
        }
    }

    fn timeout() -> Self {
        Self {
            status: "timeout",
            message: "Agro API is taking too long to respond \
                      (common during harmattan season or server load)."
                .to_string(),
            tip: "Try again in 10–30 minutes or tomorrow. No data lost — your polygon ID is still valid.",
        }
    }
}

impl CropHealthService {
    /// Create a new CropHealthService instance
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Evaluate crop health for a polygon over a lookback window.
    ///
    /// A timeout on any outbound call becomes a structured status; gateway
    /// and data-shape errors propagate; anything else is an internal error
    /// with a truncated message.
    pub async fn evaluate(&self, poly_id: &str, days_lookback: i64) -> AppResult<CropHealthResponse> {
        if self.config.imagery.api_key.is_empty() {
            return Err(AppError::Configuration(
                "Imagery API key not configured".to_string(),
            ));
        }

        match self.evaluate_inner(poly_id, days_lookback).await {
            Ok(response) => Ok(response),
            Err(AppError::UpstreamTimeout) => {
                tracing::warn!(%poly_id, "imagery provider timed out");
                Ok(CropHealthResponse::Unavailable(CropHealthUnavailable::timeout()))
            }
            Err(err @ (AppError::ImageryApi { .. } | AppError::DataShape(_))) => Err(err),
            Err(other) => Err(AppError::Internal(format!(
                "Unexpected error: {}",
                truncate_chars(&other.to_string(), 150)
            ))),
        }
    }

    async fn evaluate_inner(
        &self,
        poly_id: &str,
        days_lookback: i64,
    ) -> AppResult<CropHealthResponse> {
        let end = Utc::now().timestamp();
        let start = end - days_lookback * SECONDS_PER_DAY;

        let client = AgroClient::new(
            self.config.imagery.api_endpoint.clone(),
            self.config.imagery.api_key.clone(),
        );

        let images = client
            .search_images(poly_id, start, end, self.config.agronomy.max_cloud_percent)
            .await?;

        let latest = match latest_image(images) {
            Some(image) => image,
            None => {
                tracing::info!(%poly_id, days_lookback, "no satellite images in window");
                return Ok(CropHealthResponse::Unavailable(
                    CropHealthUnavailable::no_image(days_lookback),
                ));
            }
        };

        let stats_url = latest
            .stats
            .ndvi
            .as_deref()
            .ok_or_else(|| AppError::DataShape("No NDVI stats URL found in image data".to_string()))?;

        let stats = client.fetch_ndvi_stats(stats_url).await?;
        let mean = stats
            .mean
            .ok_or_else(|| AppError::DataShape("No NDVI mean value available".to_string()))?;

        let health = classify_ndvi(mean, &self.config.agronomy.ndvi);

        tracing::info!(
            %poly_id,
            ndvi_mean = mean,
            status = health.status_label(),
            "crop health evaluated"
        );

        Ok(CropHealthResponse::Report(CropHealthReport {
            polygon_id: poly_id.to_string(),
            ndvi_mean: round3(mean),
            health_status: health.status_label(),
            advice: health.advice(),
            satellite_date: latest.dt,
            truecolor_image: latest.image.truecolor,
        }))
    }
}

/// Pick the newest scene by acquisition time. The sort is stable and
/// descending, so timestamp ties keep the provider's ordering.
fn latest_image(mut images: Vec<SatelliteImage>) -> Option<SatelliteImage> {
    images.sort_by(|a, b| b.dt.cmp(&a.dt));
    images.into_iter().next()
}
