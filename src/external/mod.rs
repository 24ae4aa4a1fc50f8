//! External API integrations
//!
//! One client per upstream collaborator, each behind a provider trait so the
//! coordinator can be exercised against stubs. Clients are stateless and
//! safely reentrant; every call is a single attempt with no retries.

pub mod market;
pub mod prediction;
pub mod soil;
pub mod weather;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{FeatureSet, GeoQuery, MarketQuery, MarketRecord, YieldFeatureSet};

pub use market::MarketPricesClient;
pub use prediction::PredictionClient;
pub use soil::{SoilGridsClient, SoilSnapshot};
pub use weather::{OpenMeteoClient, WeatherSnapshot};

/// Weather time-series source for a pair of coordinates.
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch(&self, query: &GeoQuery) -> AppResult<WeatherSnapshot>;
}

/// Soil property layers source for a pair of coordinates.
#[async_trait]
pub trait SoilProvider: Send + Sync {
    async fn fetch(&self, query: &GeoQuery) -> AppResult<SoilSnapshot>;
}

/// Paginated market price records source.
#[async_trait]
pub trait MarketProvider: Send + Sync {
    async fn fetch(&self, query: &MarketQuery) -> AppResult<Vec<MarketRecord>>;
}

/// Downstream prediction service with a bounded-latency contract.
#[async_trait]
pub trait Predictor: Send + Sync {
    async fn predict_crop(&self, features: &FeatureSet) -> AppResult<serde_json::Value>;

    async fn predict_yield(&self, features: &YieldFeatureSet) -> AppResult<serde_json::Value>;
}
