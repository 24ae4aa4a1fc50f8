//! Completeness gate
//!
//! The sole gatekeeper between fallback resolution and forwarding: no
//! feature set reaches the prediction service with a field still absent.
//! A failure lists every missing field so the caller sees the full
//! deficiency in one response.

use crate::error::{AppError, AppResult};
use crate::models::FeatureSet;
use crate::services::fallback::Feature;
use crate::services::features::DerivedFeatures;

/// Check every required field after fallback resolution and build the final
/// immutable feature set.
pub fn validate(candidate: &DerivedFeatures) -> AppResult<FeatureSet> {
    let mut missing = Vec::new();
    if candidate.nitrogen.is_none() {
        missing.push(Feature::Nitrogen.name().to_string());
    }
    if candidate.temperature.is_none() {
        missing.push(Feature::Temperature.name().to_string());
    }
    if candidate.humidity.is_none() {
        missing.push(Feature::Humidity.name().to_string());
    }
    if candidate.ph.is_none() {
        missing.push(Feature::Ph.name().to_string());
    }
    if candidate.rainfall.is_none() {
        missing.push(Feature::Rainfall.name().to_string());
    }

    match (
        candidate.nitrogen,
        candidate.temperature,
        candidate.humidity,
        candidate.ph,
        candidate.rainfall,
    ) {
        (Some(nitrogen), Some(temperature), Some(humidity), Some(ph), Some(rainfall)) => {
            Ok(FeatureSet {
                nitrogen,
                temperature,
                humidity,
                ph,
                rainfall,
            })
        }
        _ => Err(AppError::MissingFields { fields: missing }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> DerivedFeatures {
        DerivedFeatures {
            nitrogen: Some(1.5),
            temperature: Some(28.0),
            humidity: Some(74.0),
            ph: Some(6.5),
            rainfall: Some(2.2),
        }
    }

    #[test]
    fn complete_candidate_passes() {
        let features = validate(&complete()).unwrap();
        assert_eq!(features.temperature, 28.0);
        assert_eq!(features.nitrogen, 1.5);
    }

    #[test]
    fn failure_lists_all_missing_fields() {
        let candidate = DerivedFeatures {
            temperature: None,
            humidity: None,
            ..complete()
        };
        match validate(&candidate) {
            Err(AppError::MissingFields { fields }) => {
                assert_eq!(fields, vec!["temperature".to_string(), "humidity".to_string()]);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }

    #[test]
    fn fully_absent_candidate_lists_every_field() {
        match validate(&DerivedFeatures::default()) {
            Err(AppError::MissingFields { fields }) => {
                assert_eq!(fields.len(), 5);
            }
            other => panic!("expected MissingFields, got {:?}", other),
        }
    }
}
