//! Weather forecast client
//!
//! Integrates with the Open-Meteo forecast API. No API key is required; the
//! provider validates coordinate ranges itself.

use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::truncate_chars;

/// How many characters of an upstream error body to keep as diagnostics
const DIAGNOSTIC_CHARS: usize = 150;

/// How many days of daily forecast to request
const FORECAST_DAYS: u8 = 14;

/// Weather API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

/// Open-Meteo forecast response, reduced to the fields we consume
#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub elevation: Option<f64>,
    pub daily: Option<DailyBlock>,
}

/// The `daily` section: parallel arrays keyed by `time`
#[derive(Debug, Default, Deserialize)]
pub struct DailyBlock {
    pub time: Option<Vec<String>>,
    #[serde(default)]
    pub temperature_2m_max: Vec<f64>,
    #[serde(default)]
    pub temperature_2m_min: Vec<f64>,
    #[serde(default)]
    pub precipitation_sum: Vec<f64>,
}

impl OpenMeteoClient {
    /// Create a new OpenMeteoClient
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Fetch a 14-day forecast (current, hourly, and daily variables) for
    /// the given coordinates, resolved in the location's own timezone.
    pub async fn fetch_forecast(&self, latitude: f64, longitude: f64) -> AppResult<ForecastResponse> {
        let url = format!(
            "{}/forecast?latitude={}&longitude={}\
             &current=temperature_2m,wind_speed_10m\
             &hourly=temperature_2m,relative_humidity_2m,precipitation_probability\
             &daily=temperature_2m_max,temperature_2m_min,precipitation_sum\
             &timezone=auto&forecast_days={}",
            self.base_url, latitude, longitude, FORECAST_DAYS
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::WeatherApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::WeatherApi(format!(
                "Failed to fetch weather: {}",
                truncate_chars(&body, DIAGNOSTIC_CHARS)
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::DataShape(format!("Failed to parse forecast response: {}", e)))
    }
}
