//! Prediction service forwarder
//!
//! Performs a single bounded-wait POST to the crop or yield endpoint of the
//! downstream prediction model, mapping outcomes into the error taxonomy.
//! The wait ceiling applies uniformly to both paths; on expiry the outbound
//! call is dropped and the result is `AppError::Timeout`.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::external::Predictor;
use crate::models::{FeatureSet, YieldFeatureSet};

/// Prediction API client
#[derive(Clone)]
pub struct PredictionClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl PredictionClient {
    pub fn new(base_url: String, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url,
            timeout,
        }
    }

    async fn forward<T: Serialize + Sync>(&self, path: &str, payload: &T) -> AppResult<Value> {
        let url = format!("{}{}", self.base_url, path);
        bounded(self.timeout, async {
            let response = self
                .client
                .post(&url)
                .json(payload)
                .send()
                .await
                .map_err(|e| {
                    if e.is_timeout() {
                        AppError::Timeout
                    } else {
                        AppError::Forwarding(e.to_string())
                    }
                })?;

            if !response.status().is_success() {
                let status = response.status();
                return Err(AppError::Upstream {
                    status: status.as_u16(),
                    message: format!(
                        "Prediction model API error: {}",
                        status.canonical_reason().unwrap_or("unknown")
                    ),
                });
            }

            response
                .json::<Value>()
                .await
                .map_err(|e| AppError::Forwarding(format!("unparseable prediction body: {}", e)))
        })
        .await
    }
}

#[async_trait]
impl Predictor for PredictionClient {
    async fn predict_crop(&self, features: &FeatureSet) -> AppResult<Value> {
        self.forward("/predict/crop", features).await
    }

    async fn predict_yield(&self, features: &YieldFeatureSet) -> AppResult<Value> {
        self.forward("/predict/yield", features).await
    }
}

/// Run `call` under a wait ceiling, mapping expiry to `AppError::Timeout`.
/// The inner future is dropped when the ceiling is hit.
pub(crate) async fn bounded<T, F>(limit: Duration, call: F) -> AppResult<T>
where
    F: Future<Output = AppResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(AppError::Timeout),
    }
}
