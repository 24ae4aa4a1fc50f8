//! Configuration management for the aggregation pipeline
//!
//! Supports hierarchical configuration loading:
//! 1. Default values in code
//! 2. Configuration files (development.toml, production.toml)
//! 3. Environment variable overrides with CROPSENSE_ prefix
//!
//! The market data API key is a required secret: it has no in-code default
//! and loading fails if it is not supplied.

use config::{ConfigError, Environment, File};
use serde::Deserialize;

/// Main pipeline configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Current environment (development, production)
    pub environment: String,

    /// Weather service (Open-Meteo) configuration
    pub weather: WeatherConfig,

    /// Soil service (SoilGrids) configuration
    pub soil: SoilConfig,

    /// Market price service (data.gov.in) configuration
    pub market: MarketConfig,

    /// Prediction service configuration
    pub prediction: PredictionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeatherConfig {
    /// Forecast endpoint URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SoilConfig {
    /// Properties query endpoint URL
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MarketConfig {
    /// Price records resource URL
    pub base_url: String,

    /// Access credential. Required; no default.
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PredictionConfig {
    /// Prediction service base URL (crop and yield endpoints hang off it)
    pub base_url: String,

    /// Bounded wait for forwarding calls, in seconds
    pub timeout_seconds: u64,
}

impl Config {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment =
            std::env::var("CROPSENSE_ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let config = config::Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("weather.base_url", "https://api.open-meteo.com/v1/forecast")?
            .set_default(
                "soil.base_url",
                "https://rest.isric.org/soilgrids/v2.0/properties/query",
            )?
            .set_default(
                "market.base_url",
                "https://api.data.gov.in/resource/9ef84268-d588-465a-a308-a864a43d0070",
            )?
            .set_default(
                "prediction.base_url",
                "https://sih-crop-prediction-model-1.onrender.com",
            )?
            .set_default("prediction.timeout_seconds", 10)?
            // Load environment-specific config file
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Override with environment variables (CROPSENSE_ prefix)
            .add_source(
                Environment::with_prefix("CROPSENSE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
