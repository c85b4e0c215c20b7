//! Planting advice tests
//!
//! Covers the daily forecast reduction, the 7-day aggregation, and the
//! maize recommendation classification.

use proptest::prelude::*;
use shared::{
    analyze_seven_days, classify_planting, round2, DailyForecast, MoistureIndicator,
    PlantingConditions, PlantingCriteria, PlantingRecommendation, SevenDayAnalysis,
};

// Helper to build one forecast day from raw provider values
fn day(max_temp: f64, min_temp: f64, rain: f64) -> DailyForecast {
    DailyForecast::from_raw(
        "2025-04-01".to_string(),
        max_temp,
        min_temp,
        rain,
        &PlantingCriteria::default(),
    )
}

fn analyze(days: &[DailyForecast]) -> SevenDayAnalysis {
    analyze_seven_days(days, &PlantingCriteria::default())
}

fn classify(analysis: &SevenDayAnalysis) -> PlantingRecommendation {
    classify_planting(analysis, &PlantingCriteria::default())
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Optimal window: 28°C average, 10mm rain per day, max never above 33°C
    #[test]
    fn test_optimal_week_plants_now() {
        let days: Vec<_> = (0..7).map(|_| day(33.0, 23.0, 10.0)).collect();
        let analysis = analyze(&days);

        assert_eq!(analysis.avg_temp, 28.0);
        assert_eq!(analysis.total_rainfall_mm, 70.0);
        assert_eq!(analysis.rainy_days_count, 7);
        assert!(analysis.conditions_met.all_met());
        assert_eq!(classify(&analysis), PlantingRecommendation::PlantNow);
    }

    /// A single hot day breaks the window but rain still warrants preparing
    #[test]
    fn test_heat_spike_downgrades_to_preparing() {
        let mut days: Vec<_> = (0..7).map(|_| day(33.0, 23.0, 10.0)).collect();
        days[2] = day(36.5, 23.0, 10.0);
        let analysis = analyze(&days);

        assert!(!analysis.conditions_met.no_extreme_heat);
        assert_eq!(classify(&analysis), PlantingRecommendation::PrepareSoon);
    }

    /// Cold nights push the average below the window even with rain
    #[test]
    fn test_cold_week_does_not_plant() {
        let days: Vec<_> = (0..7).map(|_| day(26.0, 14.0, 10.0)).collect();
        let analysis = analyze(&days);

        assert!(!analysis.conditions_met.temperature_ok);
        assert!(analysis.conditions_met.rain_incoming);
        assert_eq!(classify(&analysis), PlantingRecommendation::PrepareSoon);
    }

    /// Dry forecast waits for the season and quotes the total in the advice
    #[test]
    fn test_dry_week_waits_for_rains() {
        let days: Vec<_> = (0..7).map(|_| day(34.0, 24.0, 0.5)).collect();
        let analysis = analyze(&days);

        assert_eq!(analysis.total_rainfall_mm, 3.5);
        let recommendation = classify(&analysis);
        assert_eq!(recommendation, PlantingRecommendation::WaitForRains);
        assert!(recommendation
            .advice(analysis.total_rainfall_mm)
            .contains("3.5mm next week"));
    }

    /// Exactly 15mm over the week is enough to prepare
    #[test]
    fn test_prepare_boundary_is_inclusive() {
        let mut days: Vec<_> = (0..7).map(|_| day(34.0, 24.0, 0.0)).collect();
        days[0] = day(34.0, 24.0, 15.0);
        let analysis = analyze(&days);

        assert_eq!(classify(&analysis), PlantingRecommendation::PrepareSoon);
    }

    /// A day at exactly 5mm counts as rainy yet is labelled "Low"
    #[test]
    fn test_five_millimetre_day_straddles_the_thresholds() {
        let d = day(30.0, 22.0, 5.0);
        assert_eq!(d.moisture_indicator, MoistureIndicator::Low);

        let days = vec![d; 7];
        assert_eq!(analyze(&days).rainy_days_count, 7);
    }

    /// Rounding of the per-day summary fields
    #[test]
    fn test_daily_values_are_rounded() {
        let d = day(31.456, 22.123, 4.567);
        assert_eq!(d.max_temp, 31.46);
        assert_eq!(d.min_temp, 22.12);
        assert_eq!(d.avg_temp, 26.79);
        assert_eq!(d.total_rainfall_mm, 4.57);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    /// Strategy for generating plausible tropical temperatures
    fn temperature_strategy() -> impl Strategy<Value = (f64, f64)> {
        (10.0..35.0f64, 0.0..15.0f64).prop_map(|(min, delta)| (min + delta, min))
    }

    /// Strategy for generating daily rainfall amounts
    fn rain_strategy() -> impl Strategy<Value = f64> {
        0.0..60.0f64
    }

    /// Strategy for a full 7-day window of forecast days
    fn window_strategy() -> impl Strategy<Value = Vec<DailyForecast>> {
        prop::collection::vec(
            (temperature_strategy(), rain_strategy())
                .prop_map(|((max_temp, min_temp), rain)| day(max_temp, min_temp, rain)),
            7,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Every daily average is the rounded midpoint of max and min
        #[test]
        fn prop_avg_temp_is_rounded_midpoint(
            (max_temp, min_temp) in temperature_strategy(),
            rain in rain_strategy()
        ) {
            let d = day(max_temp, min_temp, rain);
            prop_assert_eq!(d.avg_temp, round2((max_temp + min_temp) / 2.0));
        }

        /// The rainy-day count matches the inclusive 5mm rule over rounded values
        #[test]
        fn prop_rainy_days_match_inclusive_rule(window in window_strategy()) {
            let analysis = analyze(&window);
            let expected = window.iter().filter(|d| d.total_rainfall_mm >= 5.0).count() as u32;
            prop_assert_eq!(analysis.rainy_days_count, expected);
            prop_assert!(analysis.rainy_days_count <= 7);
        }

        /// The weekly total is the rounded sum of the rounded daily values
        #[test]
        fn prop_total_rainfall_is_sum_of_dailies(window in window_strategy()) {
            let analysis = analyze(&window);
            let expected = round2(window.iter().map(|d| d.total_rainfall_mm).sum::<f64>());
            prop_assert_eq!(analysis.total_rainfall_mm, expected);
        }

        /// Classification is a pure function of the conditions and the total
        #[test]
        fn prop_classification_follows_first_match_rules(
            temperature_ok in any::<bool>(),
            rain_incoming in any::<bool>(),
            consistent_moisture in any::<bool>(),
            no_extreme_heat in any::<bool>(),
            total in 0.0..200.0f64
        ) {
            let analysis = SevenDayAnalysis {
                avg_temp: 28.0,
                total_rainfall_mm: total,
                rainy_days_count: 3,
                conditions_met: PlantingConditions {
                    temperature_ok,
                    rain_incoming,
                    consistent_moisture,
                    no_extreme_heat,
                },
            };

            let all_met = temperature_ok && rain_incoming && consistent_moisture && no_extreme_heat;
            let expected = if all_met {
                PlantingRecommendation::PlantNow
            } else if total >= 15.0 {
                PlantingRecommendation::PrepareSoon
            } else {
                PlantingRecommendation::WaitForRains
            };

            prop_assert_eq!(classify(&analysis), expected);
        }

        /// All four conditions met always plants, regardless of the total
        #[test]
        fn prop_all_conditions_always_plant(total in 0.0..200.0f64) {
            let analysis = SevenDayAnalysis {
                avg_temp: 28.0,
                total_rainfall_mm: total,
                rainy_days_count: 7,
                conditions_met: PlantingConditions {
                    temperature_ok: true,
                    rain_incoming: true,
                    consistent_moisture: true,
                    no_extreme_heat: true,
                },
            };
            prop_assert_eq!(classify(&analysis), PlantingRecommendation::PlantNow);
        }
    }
}
