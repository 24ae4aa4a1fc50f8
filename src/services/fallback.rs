//! Fallback policy
//!
//! A fixed feature-to-default table applied only when derivation is
//! impossible. Temperature, humidity, and crop-prediction rainfall have no
//! entry: their absence is a hard validation failure at the gate.

/// The features the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    Nitrogen,
    Temperature,
    Humidity,
    Ph,
    Rainfall,
    AnnualRainfall,
}

impl Feature {
    pub fn name(self) -> &'static str {
        match self {
            Feature::Nitrogen => "nitrogen",
            Feature::Temperature => "temperature",
            Feature::Humidity => "humidity",
            Feature::Ph => "ph",
            Feature::Rainfall => "rainfall",
            Feature::AnnualRainfall => "annual_rainfall",
        }
    }
}

/// Default value for a feature, if the policy defines one.
pub fn default_for(feature: Feature) -> Option<f64> {
    match feature {
        Feature::Nitrogen => Some(1.5),
        Feature::Ph => Some(6.5),
        Feature::AnnualRainfall => Some(1200.0),
        Feature::Temperature | Feature::Humidity | Feature::Rainfall => None,
    }
}

/// Resolve a derived value against the fallback table. Pure: the same
/// absent feature always resolves to the same default, and no value is ever
/// fabricated for a feature outside the table.
pub fn resolve(feature: Feature, derived: Option<f64>) -> Option<f64> {
    if derived.is_some() {
        return derived;
    }
    match default_for(feature) {
        Some(value) => {
            tracing::warn!(feature = feature.name(), value, "using fallback value");
            Some(value)
        }
        None => None,
    }
}
