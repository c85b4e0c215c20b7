//! NDVI crop-health classification
//!
//! Mean NDVI over a field polygon, bucketed into three farmer-facing tiers.
//! Thresholds are tuned for maize in Nigeria.

use serde::Deserialize;

/// Classification boundaries for mean NDVI, inclusive at each lower edge
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
#[serde(default)]
pub struct NdviThresholds {
    pub healthy: f64,
    pub moderate: f64,
}

impl Default for NdviThresholds {
    fn default() -> Self {
        Self {
            healthy: 0.55,
            moderate: 0.38,
        }
    }
}

/// Crop health tier derived from mean NDVI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CropHealth {
    Healthy,
    ModerateStress,
    PoorHealth,
}

impl CropHealth {
    /// Status string shown to the farmer
    pub fn status_label(&self) -> &'static str {
        match self {
            CropHealth::Healthy => "Healthy 🌿",
            CropHealth::ModerateStress => "Moderate Stress ⚠️",
            CropHealth::PoorHealth => "Poor Health ❌",
        }
    }

    /// Actionable advice per tier
    pub fn advice(&self) -> &'static str {
        match self {
            CropHealth::Healthy => "Crops look strong. Keep it up!",
            CropHealth::ModerateStress => "Some stress detected — check water/nutrients soon.",
            CropHealth::PoorHealth => "Crop struggling — act fast (water, pests, nutrients?).",
        }
    }
}

/// Bucket a mean NDVI value into a health tier
pub fn classify_ndvi(mean: f64, thresholds: &NdviThresholds) -> CropHealth {
    if mean >= thresholds.healthy {
        CropHealth::Healthy
    } else if mean >= thresholds.moderate {
        CropHealth::ModerateStress
    } else {
        CropHealth::PoorHealth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(mean: f64) -> CropHealth {
        classify_ndvi(mean, &NdviThresholds::default())
    }

    #[test]
    fn test_healthy_boundary_is_inclusive() {
        assert_eq!(classify(0.55), CropHealth::Healthy);
        assert_eq!(classify(0.549999), CropHealth::ModerateStress);
        assert_eq!(classify(0.9), CropHealth::Healthy);
    }

    #[test]
    fn test_moderate_boundary_is_inclusive() {
        assert_eq!(classify(0.38), CropHealth::ModerateStress);
        assert_eq!(classify(0.379999), CropHealth::PoorHealth);
    }

    #[test]
    fn test_bare_soil_is_poor_health() {
        assert_eq!(classify(0.1), CropHealth::PoorHealth);
        assert_eq!(classify(-0.2), CropHealth::PoorHealth);
    }

    #[test]
    fn test_every_tier_carries_advice() {
        for tier in [CropHealth::Healthy, CropHealth::ModerateStress, CropHealth::PoorHealth] {
            assert!(!tier.status_label().is_empty());
            assert!(!tier.advice().is_empty());
        }
    }
}
