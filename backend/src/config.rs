//! Configuration management for the Maize Advisor Platform
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with MAIZE_ prefix

use config::{ConfigError, Environment, File};
use serde::Deserialize;
use shared::{NdviThresholds, PlantingCriteria};

/// Main application configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Server configuration
    pub server: ServerConfig,

    /// Weather provider configuration
    pub weather: WeatherConfig,

    /// Satellite imagery provider configuration
    pub imagery: ImageryConfig,

    /// Agronomic thresholds
    #[serde(default)]
    pub agronomy: AgronomyConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Server port
    pub port: u16,

    /// Server host
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Weather API endpoint
    pub api_endpoint: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ImageryConfig {
    /// Imagery API endpoint
    pub api_endpoint: String,

    /// Imagery API key
    pub api_key: String,
}

/// Thresholds for planting advice and crop-health classification
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AgronomyConfig {
    /// Maize planting criteria over the 7-day window
    pub planting: PlantingCriteria,

    /// NDVI classification boundaries
    pub ndvi: NdviThresholds,

    /// Maximum acceptable cloud cover for satellite images (percent)
    pub max_cloud_percent: u8,
}

impl Default for AgronomyConfig {
    fn default() -> Self {
        Self {
            planting: PlantingCriteria::default(),
            ndvi: NdviThresholds::default(),
            max_cloud_percent: 20,
        }
    }
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let environment =
            std::env::var("MAIZE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("weather.api_endpoint", "https://api.open-meteo.com/v1")?
            .set_default(
                "imagery.api_endpoint",
                "https://api.agromonitoring.com/agro/1.0",
            )?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (MAIZE_ prefix)
            .add_source(
                Environment::with_prefix("MAIZE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            host: "0.0.0.0".to_string(),
        }
    }
}
