//! Daily forecast models and maize planting classification
//!
//! A 14-day daily forecast is reduced to per-day summaries, the first 7 days
//! are aggregated into a planting analysis, and the analysis is classified
//! into a farmer-facing recommendation.

use serde::{Deserialize, Serialize};

use crate::types::round2;

/// Thresholds driving the planting analysis.
///
/// The per-day moisture label uses a strict `> moisture_high_mm` bound while
/// the 7-day rainy-day count uses an inclusive `>= rainy_day_mm` bound. The
/// mismatch is deliberate and matches field-tested behavior; a day with
/// exactly 5 mm is labelled "Low" but still counts as a rainy day.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlantingCriteria {
    /// Lower bound of the acceptable 7-day average temperature (°C)
    pub temp_ok_min: f64,
    /// Upper bound of the acceptable 7-day average temperature (°C)
    pub temp_ok_max: f64,
    /// 7-day rainfall total that signals rains are arriving (mm)
    pub rain_incoming_mm: f64,
    /// Rainfall that makes a day count as rainy, inclusive (mm)
    pub rainy_day_mm: f64,
    /// Minimum rainy days for consistent moisture
    pub rainy_days_min: u32,
    /// Daily maximum above which heat is considered extreme (°C)
    pub extreme_heat_max: f64,
    /// Rainfall above which the per-day moisture label is "High", strict (mm)
    pub moisture_high_mm: f64,
    /// 7-day rainfall total that justifies preparing to plant (mm)
    pub prepare_soon_mm: f64,
}

impl Default for PlantingCriteria {
    fn default() -> Self {
        Self {
            temp_ok_min: 25.0,
            temp_ok_max: 32.0,
            rain_incoming_mm: 30.0,
            rainy_day_mm: 5.0,
            rainy_days_min: 3,
            extreme_heat_max: 35.0,
            moisture_high_mm: 5.0,
            prepare_soon_mm: 15.0,
        }
    }
}

/// Qualitative per-day moisture label shown to farmers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoistureIndicator {
    High,
    Low,
}

/// One day of the forecast, reduced to the fields the analysis needs
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DailyForecast {
    pub date: String,
    pub avg_temp: f64,
    pub max_temp: f64,
    pub min_temp: f64,
    pub total_rainfall_mm: f64,
    pub moisture_indicator: MoistureIndicator,
}

impl DailyForecast {
    /// Build a daily summary from raw provider values.
    ///
    /// Temperatures and rainfall are rounded to 2 decimals; the moisture
    /// label is derived from the raw (unrounded) precipitation sum.
    pub fn from_raw(
        date: String,
        max_temp: f64,
        min_temp: f64,
        precipitation_sum: f64,
        criteria: &PlantingCriteria,
    ) -> Self {
        let moisture_indicator = if precipitation_sum > criteria.moisture_high_mm {
            MoistureIndicator::High
        } else {
            MoistureIndicator::Low
        };

        Self {
            date,
            avg_temp: round2((max_temp + min_temp) / 2.0),
            max_temp: round2(max_temp),
            min_temp: round2(min_temp),
            total_rainfall_mm: round2(precipitation_sum),
            moisture_indicator,
        }
    }
}

/// The four boolean planting conditions over the 7-day window
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PlantingConditions {
    pub temperature_ok: bool,
    pub rain_incoming: bool,
    pub consistent_moisture: bool,
    pub no_extreme_heat: bool,
}

impl PlantingConditions {
    pub fn all_met(&self) -> bool {
        self.temperature_ok && self.rain_incoming && self.consistent_moisture && self.no_extreme_heat
    }
}

/// Aggregate view of the first 7 forecast days
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SevenDayAnalysis {
    pub avg_temp: f64,
    pub total_rainfall_mm: f64,
    pub rainy_days_count: u32,
    pub conditions_met: PlantingConditions,
}

/// Aggregate a window of daily summaries into a planting analysis.
///
/// The window is expected to hold exactly 7 days; the caller enforces that
/// enough forecast days were returned.
pub fn analyze_seven_days(window: &[DailyForecast], criteria: &PlantingCriteria) -> SevenDayAnalysis {
    let days = window.len().max(1) as f64;
    let avg_temp = window.iter().map(|d| d.avg_temp).sum::<f64>() / days;
    let total_rainfall_mm = window.iter().map(|d| d.total_rainfall_mm).sum::<f64>();
    let rainy_days_count = window
        .iter()
        .filter(|d| d.total_rainfall_mm >= criteria.rainy_day_mm)
        .count() as u32;

    let conditions_met = PlantingConditions {
        temperature_ok: avg_temp >= criteria.temp_ok_min && avg_temp <= criteria.temp_ok_max,
        rain_incoming: total_rainfall_mm >= criteria.rain_incoming_mm,
        consistent_moisture: rainy_days_count >= criteria.rainy_days_min,
        no_extreme_heat: window.iter().all(|d| d.max_temp <= criteria.extreme_heat_max),
    };

    SevenDayAnalysis {
        avg_temp: round2(avg_temp),
        total_rainfall_mm: round2(total_rainfall_mm),
        rainy_days_count,
        conditions_met,
    }
}

/// Planting recommendation tiers, first match wins
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum PlantingRecommendation {
    PlantNow,
    PrepareSoon,
    WaitForRains,
}

impl PlantingRecommendation {
    /// Headline shown to the farmer
    pub fn headline(&self) -> &'static str {
        match self {
            PlantingRecommendation::PlantNow => "PLANT MAIZE NOW 🌽 Optimal window ahead!",
            PlantingRecommendation::PrepareSoon => "PREPARE TO PLANT SOON ⏳",
            PlantingRecommendation::WaitForRains => "WAIT FOR RAINY SEASON ⏳ (March–June best)",
        }
    }

    /// Supporting advice; the dry-forecast tier quotes the rainfall total
    pub fn advice(&self, total_rainfall_mm: f64) -> String {
        match self {
            PlantingRecommendation::PlantNow => {
                "Rains starting soon + perfect temps. Prepare land!".to_string()
            }
            PlantingRecommendation::PrepareSoon => {
                "Some rain coming – good if you have irrigation backup.".to_string()
            }
            PlantingRecommendation::WaitForRains => format!(
                "Dry forecast ({}mm next week). Risk of poor germination without irrigation.",
                total_rainfall_mm
            ),
        }
    }
}

/// Classify a 7-day analysis into a recommendation.
///
/// All four conditions met wins outright; otherwise a partial rainfall total
/// downgrades to preparation, and anything drier waits for the season.
pub fn classify_planting(
    analysis: &SevenDayAnalysis,
    criteria: &PlantingCriteria,
) -> PlantingRecommendation {
    if analysis.conditions_met.all_met() {
        PlantingRecommendation::PlantNow
    } else if analysis.total_rainfall_mm >= criteria.prepare_soon_mm {
        PlantingRecommendation::PrepareSoon
    } else {
        PlantingRecommendation::WaitForRains
    }
}
