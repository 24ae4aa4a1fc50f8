//! Canonical domain types shared across the pipeline stages

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// GPS coordinates for an incoming request. Immutable, created per request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoQuery {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoQuery {
    pub fn new(latitude: f64, longitude: f64) -> AppResult<Self> {
        let query = Self {
            latitude,
            longitude,
        };
        query.validate()?;
        Ok(query)
    }

    /// Check coordinates are finite and within range. Runs before any
    /// network call is made.
    pub fn validate(&self) -> AppResult<()> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return Err(AppError::InvalidInput(
                "Invalid latitude or longitude values.".to_string(),
            ));
        }
        if self.latitude < -90.0 || self.latitude > 90.0 {
            return Err(AppError::InvalidInput(format!(
                "Latitude {} out of range [-90, 90].",
                self.latitude
            )));
        }
        if self.longitude < -180.0 || self.longitude > 180.0 {
            return Err(AppError::InvalidInput(format!(
                "Longitude {} out of range [-180, 180].",
                self.longitude
            )));
        }
        Ok(())
    }
}

/// The canonical payload sent to the crop prediction endpoint.
///
/// All five fields are required before forwarding; each is either a derived
/// value or a fallback default. Built exactly once per request and never
/// mutated after the completeness gate passes. Wire names match what the
/// prediction model expects (`N` for nitrogen).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    #[serde(rename = "N")]
    pub nitrogen: f64,
    pub temperature: f64,
    pub humidity: f64,
    pub ph: f64,
    pub rainfall: f64,
}

/// Growing season, derived from the calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Zaid,
}

impl Season {
    /// June-October is Kharif, November-March is Rabi, April-May is Zaid.
    pub fn from_month(month: u32) -> Self {
        match month {
            6..=10 => Season::Kharif,
            11 | 12 | 1..=3 => Season::Rabi,
            _ => Season::Zaid,
        }
    }

    /// Season for the current UTC date.
    pub fn current() -> Self {
        Self::from_month(chrono::Utc::now().month())
    }
}

/// Caller-supplied parameters for the yield prediction entry point.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YieldParams {
    pub crop: String,
    pub state: String,
    pub area: f64,
    pub fertilizer: f64,
}

impl YieldParams {
    pub fn validate(&self) -> AppResult<()> {
        if self.crop.trim().is_empty() || self.state.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Crop and state are required.".to_string(),
            ));
        }
        if !self.area.is_finite() || self.area <= 0.0 {
            return Err(AppError::InvalidInput(
                "Invalid area value. Area must be a positive number.".to_string(),
            ));
        }
        if !self.fertilizer.is_finite() || self.fertilizer < 0.0 {
            return Err(AppError::InvalidInput(
                "Invalid fertilizer value.".to_string(),
            ));
        }
        Ok(())
    }
}

/// The canonical payload sent to the yield prediction endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldFeatureSet {
    pub crop: String,
    pub crop_year: i32,
    pub season: Season,
    pub state: String,
    pub area: f64,
    pub annual_rainfall: f64,
    pub fertilizer: f64,
}

/// Filter and pagination parameters for a market price lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuery {
    pub state: String,
    pub district: Option<String>,
    pub commodity: String,
    pub variety: Option<String>,
    pub grade: Option<String>,
    #[serde(default)]
    pub offset: u32,
    #[serde(default = "default_market_limit")]
    pub limit: u32,
}

fn default_market_limit() -> u32 {
    100
}

impl MarketQuery {
    pub fn new(state: impl Into<String>, commodity: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            district: None,
            commodity: commodity.into(),
            variety: None,
            grade: None,
            offset: 0,
            limit: default_market_limit(),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.state.trim().is_empty() || self.commodity.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "State and commodity are required.".to_string(),
            ));
        }
        Ok(())
    }
}

/// One upstream market price record, kept as the raw field mapping with
/// price-like fields coerced to numbers where parseable.
pub type MarketRecord = serde_json::Map<String, serde_json::Value>;

/// Result of a market lookup. An empty upstream result is reported
/// explicitly, distinct from an upstream failure.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MarketData {
    Records(Vec<MarketRecord>),
    NoRecords,
}

/// Prediction outcome paired with the exact payload that was sent, so the
/// caller can audit what was fed to the model.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult<T> {
    pub input_data: T,
    pub prediction: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geo_query_accepts_valid_coordinates() {
        assert!(GeoQuery::new(18.7883, 98.9853).is_ok());
        assert!(GeoQuery::new(-90.0, -180.0).is_ok());
        assert!(GeoQuery::new(90.0, 180.0).is_ok());
        assert!(GeoQuery::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn geo_query_rejects_out_of_range() {
        assert!(matches!(
            GeoQuery::new(91.0, 0.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            GeoQuery::new(0.0, 181.0),
            Err(AppError::InvalidInput(_))
        ));
        assert!(GeoQuery::new(-90.5, 0.0).is_err());
        assert!(GeoQuery::new(0.0, -180.5).is_err());
    }

    #[test]
    fn geo_query_rejects_non_finite() {
        assert!(GeoQuery::new(f64::NAN, 0.0).is_err());
        assert!(GeoQuery::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn season_covers_all_months() {
        assert_eq!(Season::from_month(6), Season::Kharif);
        assert_eq!(Season::from_month(10), Season::Kharif);
        assert_eq!(Season::from_month(11), Season::Rabi);
        assert_eq!(Season::from_month(12), Season::Rabi);
        assert_eq!(Season::from_month(1), Season::Rabi);
        assert_eq!(Season::from_month(3), Season::Rabi);
        assert_eq!(Season::from_month(4), Season::Zaid);
        assert_eq!(Season::from_month(5), Season::Zaid);
    }

    #[test]
    fn season_serializes_as_capitalized_name() {
        let json = serde_json::to_string(&Season::Kharif).unwrap();
        assert_eq!(json, "\"Kharif\"");
    }

    #[test]
    fn yield_params_validation() {
        let valid = YieldParams {
            crop: "Rice".into(),
            state: "Assam".into(),
            area: 12.5,
            fertilizer: 40.0,
        };
        assert!(valid.validate().is_ok());

        let zero_area = YieldParams {
            area: 0.0,
            ..valid.clone()
        };
        assert!(zero_area.validate().is_err());

        let negative_fertilizer = YieldParams {
            fertilizer: -1.0,
            ..valid.clone()
        };
        assert!(negative_fertilizer.validate().is_err());

        let blank_crop = YieldParams {
            crop: "  ".into(),
            ..valid
        };
        assert!(blank_crop.validate().is_err());
    }

    #[test]
    fn market_query_requires_state_and_commodity() {
        assert!(MarketQuery::new("Karnataka", "Onion").validate().is_ok());
        assert!(MarketQuery::new("", "Onion").validate().is_err());
        assert!(MarketQuery::new("Karnataka", "").validate().is_err());
    }

    #[test]
    fn feature_set_uses_model_wire_names() {
        let features = FeatureSet {
            nitrogen: 1.5,
            temperature: 27.0,
            humidity: 80.0,
            ph: 6.5,
            rainfall: 3.2,
        };
        let json = serde_json::to_value(&features).unwrap();
        assert_eq!(json["N"], 1.5);
        assert_eq!(json["ph"], 6.5);
        assert!(json.get("nitrogen").is_none());
    }

    #[test]
    fn prediction_result_serializes_camel_case() {
        let result = PredictionResult {
            input_data: 1,
            prediction: serde_json::json!({"crop": "rice"}),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("inputData").is_some());
    }
}
