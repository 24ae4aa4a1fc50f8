//! Open-Meteo forecast client
//!
//! Requests daily max-temperature, daily precipitation, and hourly relative
//! humidity series for a fixed UTC-aligned multi-day window. The adapter
//! only deserializes the wire payload; all semantic derivation happens in
//! the feature extractor.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::WeatherProvider;
use crate::models::GeoQuery;

/// Raw weather time series for one location, read-only to downstream stages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSnapshot {
    pub daily_max_temperature: Vec<f64>,
    pub daily_precipitation: Vec<f64>,
    /// Hourly relative humidity; null entries are permitted and excluded
    /// during derivation.
    pub hourly_humidity: Vec<Option<f64>>,
}

/// Open-Meteo forecast response. Missing blocks or series deserialize to
/// empty so that a partial payload degrades features, not the request.
#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<DailySeries>,
    hourly: Option<HourlySeries>,
}

#[derive(Debug, Default, Deserialize)]
struct DailySeries {
    #[serde(default)]
    temperature_2m_max: Vec<f64>,
    #[serde(default)]
    precipitation_sum: Vec<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct HourlySeries {
    #[serde(default)]
    relativehumidity_2m: Vec<Option<f64>>,
}

/// Weather API client
#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
}

impl OpenMeteoClient {
    pub fn new(base_url: String) -> Self {
        // Adapter calls carry their own wall-clock bound so a hung upstream
        // cannot block the fetch branch indefinitely.
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn fetch(&self, query: &GeoQuery) -> AppResult<WeatherSnapshot> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                (
                    "hourly",
                    "temperature_2m,relativehumidity_2m,precipitation".to_string(),
                ),
                ("daily", "temperature_2m_max,precipitation_sum".to_string()),
                ("timezone", "UTC".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Open-Meteo request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Open-Meteo HTTP error: {}", status),
            });
        }

        let data: OpenMeteoResponse = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Failed to parse Open-Meteo response: {}", e),
        })?;

        let daily = data.daily.unwrap_or_default();
        let hourly = data.hourly.unwrap_or_default();

        Ok(WeatherSnapshot {
            daily_max_temperature: daily.temperature_2m_max,
            daily_precipitation: daily.precipitation_sum,
            hourly_humidity: hourly.relativehumidity_2m,
        })
    }
}
