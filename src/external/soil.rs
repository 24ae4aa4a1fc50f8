//! SoilGrids properties client
//!
//! Requests nitrogen and pH layers at four depth bands. Layers come back as
//! named property series with per-depth mean-value samples; individual
//! samples may lack a mean.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::external::SoilProvider;
use crate::models::GeoQuery;

/// Requested soil properties. Layer names in the response match these.
const SOIL_PROPERTIES: [&str; 2] = ["nitrogen", "phh2o"];

/// Requested depth bands.
const SOIL_DEPTHS: [&str; 4] = ["0-5cm", "5-15cm", "15-30cm", "0-30cm"];

/// Raw soil property layers for one location.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SoilSnapshot {
    #[serde(default)]
    pub layers: Vec<SoilLayer>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SoilLayer {
    pub name: String,
    #[serde(default)]
    pub depths: Vec<DepthSample>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DepthSample {
    #[serde(default)]
    pub values: DepthValues,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
pub struct DepthValues {
    pub mean: Option<f64>,
}

/// SoilGrids wire envelope.
#[derive(Debug, Deserialize)]
struct SoilGridsResponse {
    properties: Option<SoilSnapshot>,
}

/// Soil API client
#[derive(Clone)]
pub struct SoilGridsClient {
    client: Client,
    base_url: String,
}

impl SoilGridsClient {
    pub fn new(base_url: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }
}

#[async_trait]
impl SoilProvider for SoilGridsClient {
    async fn fetch(&self, query: &GeoQuery) -> AppResult<SoilSnapshot> {
        let mut params: Vec<(&str, String)> = vec![
            ("lon", query.longitude.to_string()),
            ("lat", query.latitude.to_string()),
        ];
        for property in SOIL_PROPERTIES {
            params.push(("property", property.to_string()));
        }
        for depth in SOIL_DEPTHS {
            params.push(("depth", depth.to_string()));
        }
        params.push(("value", "mean".to_string()));

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("SoilGrids request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!(
                    "SoilGrids HTTP error: {}",
                    status.canonical_reason().unwrap_or("unknown")
                ),
            });
        }

        let data: SoilGridsResponse = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Failed to parse SoilGrids response: {}", e),
        })?;

        Ok(data.properties.unwrap_or_default())
    }
}
