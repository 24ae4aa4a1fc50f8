//! Market price client for the data.gov.in records endpoint
//!
//! Builds a filtered, paginated query and returns the raw record mapping
//! after coercing price-like fields to numbers. The access credential is
//! injected configuration with no compiled-in default.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::external::MarketProvider;
use crate::models::{MarketQuery, MarketRecord};

/// Upstream fields coerced to numeric type when parseable.
const PRICE_FIELDS: [&str; 4] = ["min_price", "max_price", "modal_price", "price"];

#[derive(Debug, Deserialize)]
struct MarketResponse {
    #[serde(default)]
    records: Vec<MarketRecord>,
}

/// Market price API client
#[derive(Clone)]
pub struct MarketPricesClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MarketPricesClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url,
            api_key,
        }
    }
}

#[async_trait]
impl MarketProvider for MarketPricesClient {
    async fn fetch(&self, query: &MarketQuery) -> AppResult<Vec<MarketRecord>> {
        let mut params: Vec<(&str, String)> = vec![
            ("api-key", self.api_key.clone()),
            ("format", "json".to_string()),
            ("offset", query.offset.to_string()),
            ("limit", query.limit.to_string()),
            ("filters[state.keyword]", query.state.clone()),
            ("filters[commodity]", query.commodity.clone()),
        ];
        if let Some(district) = &query.district {
            params.push(("filters[district]", district.clone()));
        }
        if let Some(variety) = &query.variety {
            params.push(("filters[variety]", variety.clone()));
        }
        if let Some(grade) = &query.grade {
            params.push(("filters[grade]", grade.clone()));
        }

        let response = self
            .client
            .get(&self.base_url)
            .query(&params)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::Upstream {
                status: 502,
                message: format!("Market data request failed: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream {
                status: status.as_u16(),
                message: format!("Market data API error: {} - {}", status, body),
            });
        }

        let data: MarketResponse = response.json().await.map_err(|e| AppError::Upstream {
            status: 502,
            message: format!("Failed to parse market data response: {}", e),
        })?;

        Ok(data.records.into_iter().map(coerce_prices).collect())
    }
}

/// Coerce string-encoded price fields to JSON numbers. Unparseable values
/// are left as-is.
fn coerce_prices(mut record: MarketRecord) -> MarketRecord {
    for field in PRICE_FIELDS {
        let coerced = match record.get(field) {
            Some(Value::String(raw)) => raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number),
            _ => None,
        };
        if let Some(value) = coerced {
            record.insert(field.to_string(), value);
        }
    }
    record
}
