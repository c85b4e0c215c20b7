//! Planting advice service
//!
//! Fetches a 14-day forecast, reduces it to daily summaries, aggregates the
//! first 7 days, and classifies the window into a planting recommendation.

use std::sync::Arc;

use serde::Serialize;
use shared::{
    analyze_seven_days, classify_planting, na_if_none, DailyForecast, PlantingCriteria,
    SevenDayAnalysis,
};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::open_meteo::{DailyBlock, OpenMeteoClient};

/// Number of forecast days aggregated into the planting analysis
pub const ANALYSIS_WINDOW_DAYS: usize = 7;

/// Planting advice service
#[derive(Clone)]
pub struct PlantingService {
    config: Arc<Config>,
}

/// Location echo in the advice response
#[derive(Debug, Serialize)]
pub struct LocationEcho {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(serialize_with = "na_if_none")]
    pub elevation: Option<f64>,
}

/// Full planting advice document returned to the caller
#[derive(Debug, Serialize)]
pub struct PlantingAdviceResponse {
    pub location: LocationEcho,
    pub crop: &'static str,
    pub daily_summary_next_14_days: Vec<DailyForecast>,
    pub next_7_days_analysis: SevenDayAnalysis,
    pub recommendation: String,
    pub advice: String,
}

impl PlantingService {
    /// Create a new PlantingService instance
    pub fn new(config: Arc<Config>) -> Self {
        Self { config }
    }

    /// Compute planting advice for a location
    pub async fn planting_advice(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> AppResult<PlantingAdviceResponse> {
        let client = OpenMeteoClient::new(self.config.weather.api_endpoint.clone());
        let forecast = client.fetch_forecast(latitude, longitude).await?;

        let daily = forecast
            .daily
            .ok_or_else(|| AppError::DataShape("No valid daily data returned".to_string()))?;
        let daily_summary = build_daily_summary(&daily, &self.config.agronomy.planting)?;

        if daily_summary.len() < ANALYSIS_WINDOW_DAYS {
            return Err(AppError::DataShape("Not enough forecast days".to_string()));
        }

        let analysis = analyze_seven_days(
            &daily_summary[..ANALYSIS_WINDOW_DAYS],
            &self.config.agronomy.planting,
        );
        let recommendation = classify_planting(&analysis, &self.config.agronomy.planting);
        let advice = recommendation.advice(analysis.total_rainfall_mm);

        tracing::info!(
            latitude,
            longitude,
            ?recommendation,
            total_rainfall_mm = analysis.total_rainfall_mm,
            "planting advice computed"
        );

        Ok(PlantingAdviceResponse {
            location: LocationEcho {
                latitude: forecast.latitude,
                longitude: forecast.longitude,
                elevation: forecast.elevation,
            },
            crop: "maize (corn)",
            daily_summary_next_14_days: daily_summary,
            next_7_days_analysis: analysis,
            recommendation: recommendation.headline().to_string(),
            advice,
        })
    }
}

/// Reduce the provider's parallel daily arrays to per-day summaries.
///
/// The arrays are zipped on their common length; a missing `time` field is
/// a malformed payload.
fn build_daily_summary(
    daily: &DailyBlock,
    criteria: &PlantingCriteria,
) -> AppResult<Vec<DailyForecast>> {
    let time = daily
        .time
        .as_ref()
        .ok_or_else(|| AppError::DataShape("No valid daily data returned".to_string()))?;

    Ok(time
        .iter()
        .zip(&daily.temperature_2m_max)
        .zip(&daily.temperature_2m_min)
        .zip(&daily.precipitation_sum)
        .map(|(((date, &max_temp), &min_temp), &precipitation)| {
            DailyForecast::from_raw(date.clone(), max_temp, min_temp, precipitation, criteria)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(days: usize) -> DailyBlock {
        DailyBlock {
            time: Some((0..days).map(|i| format!("2025-03-{:02}", i + 1)).collect()),
            temperature_2m_max: vec![33.0; days],
            temperature_2m_min: vec![23.0; days],
            precipitation_sum: vec![10.0; days],
        }
    }

    #[test]
    fn test_summary_follows_time_length() {
        let summary = build_daily_summary(&block(14), &PlantingCriteria::default()).unwrap();
        assert_eq!(summary.len(), 14);
        assert_eq!(summary[0].avg_temp, 28.0);
        assert_eq!(summary[0].date, "2025-03-01");
    }

    #[test]
    fn test_missing_time_is_a_data_error() {
        let daily = DailyBlock {
            time: None,
            ..Default::default()
        };
        let err = build_daily_summary(&daily, &PlantingCriteria::default()).unwrap_err();
        assert!(matches!(err, AppError::DataShape(_)));
    }

    #[test]
    fn test_truncated_arrays_zip_to_shortest() {
        let mut daily = block(14);
        daily.precipitation_sum.truncate(3);
        let summary = build_daily_summary(&daily, &PlantingCriteria::default()).unwrap();
        assert_eq!(summary.len(), 3);
    }
}
