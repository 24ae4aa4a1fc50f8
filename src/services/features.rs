//! Feature extractor
//!
//! Turns raw snapshots into candidate feature values. Every derivation is a
//! pure per-field function returning present-or-absent, so one malformed or
//! missing upstream field degrades that single feature without aborting
//! extraction of the others.

use crate::external::soil::SoilSnapshot;
use crate::external::weather::WeatherSnapshot;

/// How many leading hourly entries feed the daily humidity average.
pub const HUMIDITY_WINDOW_HOURS: usize = 24;

/// Soil layer names as SoilGrids reports them.
pub const NITROGEN_LAYER: &str = "nitrogen";
pub const PH_LAYER: &str = "phh2o";

/// Candidate feature values before fallback resolution. `None` means the
/// derivation was impossible, never zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedFeatures {
    pub nitrogen: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub ph: Option<f64>,
    pub rainfall: Option<f64>,
}

/// Derive the crop-prediction feature candidates from both snapshots.
pub fn derive_features(weather: &WeatherSnapshot, soil: &SoilSnapshot) -> DerivedFeatures {
    DerivedFeatures {
        nitrogen: mean_layer_value(soil, NITROGEN_LAYER),
        temperature: first_daily_max(weather),
        humidity: mean_daily_humidity(weather),
        ph: mean_layer_value(soil, PH_LAYER),
        rainfall: first_daily_precipitation(weather),
    }
}

/// First element of the daily max-temperature series.
pub fn first_daily_max(weather: &WeatherSnapshot) -> Option<f64> {
    weather.daily_max_temperature.first().copied()
}

/// First element of the daily precipitation series (crop-prediction
/// variant).
pub fn first_daily_precipitation(weather: &WeatherSnapshot) -> Option<f64> {
    weather.daily_precipitation.first().copied()
}

/// Sum of the entire daily precipitation series (yield-prediction variant).
/// An empty series is absent, not zero.
pub fn total_precipitation(weather: &WeatherSnapshot) -> Option<f64> {
    if weather.daily_precipitation.is_empty() {
        return None;
    }
    Some(weather.daily_precipitation.iter().sum())
}

/// Arithmetic mean of the first 24 hourly humidity entries, excluding null
/// entries. Absent if no valid entries remain.
pub fn mean_daily_humidity(weather: &WeatherSnapshot) -> Option<f64> {
    let valid: Vec<f64> = weather
        .hourly_humidity
        .iter()
        .take(HUMIDITY_WINDOW_HOURS)
        .filter_map(|entry| *entry)
        .collect();
    if valid.is_empty() {
        return None;
    }
    Some(valid.iter().sum::<f64>() / valid.len() as f64)
}

/// Mean of the per-depth mean values for the layer matching `property`.
/// Absent if the layer is missing or no depth sample carries a mean.
pub fn mean_layer_value(soil: &SoilSnapshot, property: &str) -> Option<f64> {
    let layer = soil.layers.iter().find(|layer| layer.name == property)?;
    let values: Vec<f64> = layer
        .depths
        .iter()
        .filter_map(|depth| depth.values.mean)
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::soil::{DepthSample, DepthValues, SoilLayer};

    fn weather(
        temps: Vec<f64>,
        precipitation: Vec<f64>,
        humidity: Vec<Option<f64>>,
    ) -> WeatherSnapshot {
        WeatherSnapshot {
            daily_max_temperature: temps,
            daily_precipitation: precipitation,
            hourly_humidity: humidity,
        }
    }

    fn soil_with_layer(name: &str, means: Vec<Option<f64>>) -> SoilSnapshot {
        SoilSnapshot {
            layers: vec![SoilLayer {
                name: name.to_string(),
                depths: means
                    .into_iter()
                    .map(|mean| DepthSample {
                        values: DepthValues { mean },
                    })
                    .collect(),
            }],
        }
    }

    #[test]
    fn temperature_takes_first_daily_max() {
        let w = weather(vec![31.4, 29.0], vec![], vec![]);
        assert_eq!(first_daily_max(&w), Some(31.4));
        assert_eq!(first_daily_max(&weather(vec![], vec![], vec![])), None);
    }

    #[test]
    fn rainfall_takes_first_daily_precipitation() {
        let w = weather(vec![], vec![4.2, 0.0, 1.1], vec![]);
        assert_eq!(first_daily_precipitation(&w), Some(4.2));
    }

    #[test]
    fn total_precipitation_sums_whole_series() {
        let w = weather(vec![], vec![4.0, 6.0, 0.0, 2.5], vec![]);
        assert_eq!(total_precipitation(&w), Some(12.5));
    }

    #[test]
    fn empty_precipitation_series_is_absent_not_zero() {
        let w = weather(vec![], vec![], vec![]);
        assert_eq!(first_daily_precipitation(&w), None);
        assert_eq!(total_precipitation(&w), None);
    }

    #[test]
    fn humidity_mean_excludes_null_entries() {
        let mut series = vec![Some(10.0), Some(20.0), None, Some(30.0)];
        series.extend(std::iter::repeat(None).take(20));
        let w = weather(vec![], vec![], series);
        // Mean of {10, 20, 30}, not of the nulls counted as zero.
        assert_eq!(mean_daily_humidity(&w), Some(20.0));
    }

    #[test]
    fn humidity_mean_only_considers_first_24_entries() {
        let mut series = vec![Some(50.0); 24];
        series.extend(vec![Some(1000.0); 10]);
        let w = weather(vec![], vec![], series);
        assert_eq!(mean_daily_humidity(&w), Some(50.0));
    }

    #[test]
    fn humidity_absent_when_all_entries_null() {
        let w = weather(vec![], vec![], vec![None; 24]);
        assert_eq!(mean_daily_humidity(&w), None);
    }

    #[test]
    fn layer_mean_averages_present_depths() {
        let soil = soil_with_layer(NITROGEN_LAYER, vec![Some(140.0), None, Some(92.0)]);
        assert_eq!(mean_layer_value(&soil, NITROGEN_LAYER), Some(116.0));
    }

    #[test]
    fn layer_mean_absent_for_empty_depths() {
        let soil = soil_with_layer(NITROGEN_LAYER, vec![]);
        assert_eq!(mean_layer_value(&soil, NITROGEN_LAYER), None);

        let all_missing = soil_with_layer(PH_LAYER, vec![None, None]);
        assert_eq!(mean_layer_value(&all_missing, PH_LAYER), None);
    }

    #[test]
    fn layer_mean_absent_for_unknown_layer() {
        let soil = soil_with_layer("sand", vec![Some(33.0)]);
        assert_eq!(mean_layer_value(&soil, NITROGEN_LAYER), None);
    }

    #[test]
    fn derivations_are_fault_isolated() {
        // Weather carries humidity only; soil carries pH only. The other
        // features degrade to absent without affecting these two.
        let w = weather(vec![], vec![], vec![Some(70.0); 24]);
        let soil = soil_with_layer(PH_LAYER, vec![Some(6.1)]);
        let derived = derive_features(&w, &soil);
        assert_eq!(derived.humidity, Some(70.0));
        assert_eq!(derived.ph, Some(6.1));
        assert_eq!(derived.temperature, None);
        assert_eq!(derived.rainfall, None);
        assert_eq!(derived.nitrogen, None);
    }
}
