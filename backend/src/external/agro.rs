//! Satellite imagery client
//!
//! Integrates with the Agromonitoring API for polygon registration, image
//! search, and NDVI statistics. All calls are authenticated with the API
//! key as an `appid` query parameter.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use shared::GeoJsonFeature;

use crate::error::{AppError, AppResult};
use crate::external::truncate_chars;

/// Overall budget for a client scope; individual requests override it
const CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

/// Polygon creation is a quick metadata write
const POLYGON_CREATE_TIMEOUT: Duration = Duration::from_secs(20);

/// Image search scans the archive for the requested window
const IMAGE_SEARCH_TIMEOUT: Duration = Duration::from_secs(40);

/// NDVI statistics are computed on demand; this is the slow path
const NDVI_STATS_TIMEOUT: Duration = Duration::from_secs(90);

const DIAGNOSTIC_CHARS: usize = 150;
const CREATE_DIAGNOSTIC_CHARS: usize = 200;

/// Imagery API client
#[derive(Clone)]
pub struct AgroClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Payload for registering a field polygon
#[derive(Debug, Serialize)]
pub struct CreatePolygonBody {
    pub name: String,
    pub geo_json: GeoJsonFeature,
}

/// Polygon creation response; the id field name varies by API version
#[derive(Debug, Deserialize)]
pub struct CreatedPolygon {
    #[serde(rename = "_id")]
    mongo_id: Option<String>,
    id: Option<String>,
}

impl CreatedPolygon {
    pub fn poly_id(self) -> Option<String> {
        self.mongo_id.or(self.id)
    }
}

/// One satellite scene from the image search
#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteImage {
    /// Acquisition time, unix seconds
    #[serde(default)]
    pub dt: i64,
    #[serde(default)]
    pub stats: ImageStats,
    #[serde(default)]
    pub image: ImageUrls,
}

/// Per-scene statistics resource URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageStats {
    pub ndvi: Option<String>,
}

/// Per-scene rendered image URLs
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageUrls {
    pub truecolor: Option<String>,
}

/// NDVI statistics for one scene
#[derive(Debug, Deserialize)]
pub struct NdviStats {
    pub mean: Option<f64>,
}

impl AgroClient {
    /// Create a new AgroClient
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(CLIENT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
        }
    }

    /// Register a polygon with the imagery provider and return its id
    pub async fn create_polygon(&self, body: &CreatePolygonBody) -> AppResult<String> {
        let url = format!("{}/polygons", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("appid", self.api_key.as_str())])
            .timeout(POLYGON_CREATE_TIMEOUT)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if status != StatusCode::OK && status != StatusCode::CREATED {
            let body = response.text().await.unwrap_or_default();
            let detail = if body.is_empty() {
                "Unknown error".to_string()
            } else {
                truncate_chars(&body, CREATE_DIAGNOSTIC_CHARS)
            };
            return Err(AppError::ImageryApi {
                status: status.as_u16(),
                detail: format!("Agro API failed: {}", detail),
            });
        }

        let created: CreatedPolygon = response
            .json()
            .await
            .map_err(|e| AppError::DataShape(format!("Failed to parse polygon response: {}", e)))?;

        created
            .poly_id()
            .ok_or_else(|| AppError::DataShape("No _id returned from Agro API".to_string()))
    }

    /// Search for satellite scenes of a polygon within a unix-second range,
    /// limited to the given maximum cloud cover
    pub async fn search_images(
        &self,
        poly_id: &str,
        start: i64,
        end: i64,
        max_cloud_percent: u8,
    ) -> AppResult<Vec<SatelliteImage>> {
        let url = format!(
            "{}/image/search?appid={}&polyid={}&start={}&end={}&clouds={}",
            self.base_url, self.api_key, poly_id, start, end, max_cloud_percent
        );

        let response = self
            .client
            .get(&url)
            .timeout(IMAGE_SEARCH_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ImageryApi {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                detail: format!("Search failed: {}", truncate_chars(&body, DIAGNOSTIC_CHARS)),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::DataShape(format!("Failed to parse image search response: {}", e)))
    }

    /// Fetch NDVI statistics from a per-scene resource URL supplied by the
    /// image search
    pub async fn fetch_ndvi_stats(&self, stats_url: &str) -> AppResult<NdviStats> {
        let url = with_api_key(stats_url, &self.api_key);

        let response = self
            .client
            .get(&url)
            .timeout(NDVI_STATS_TIMEOUT)
            .send()
            .await
            .map_err(map_transport_error)?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ImageryApi {
                status: StatusCode::BAD_GATEWAY.as_u16(),
                detail: format!(
                    "NDVI stats failed: {}",
                    truncate_chars(&body, DIAGNOSTIC_CHARS)
                ),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::DataShape(format!("Failed to parse NDVI stats: {}", e)))
    }
}

/// Append the API key only when the URL carries no query string already;
/// provider-supplied stats URLs sometimes come pre-signed.
fn with_api_key(url: &str, api_key: &str) -> String {
    if url.contains('?') {
        url.to_string()
    } else {
        format!("{}?appid={}", url, api_key)
    }
}

fn map_transport_error(e: reqwest::Error) -> AppError {
    if e.is_timeout() {
        AppError::UpstreamTimeout
    } else {
        AppError::ImageryUnreachable(format!("Request failed: {}", e))
    }
}
