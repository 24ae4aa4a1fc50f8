//! Aggregation coordinator
//!
//! Drives each request through validation, concurrent upstream fetches,
//! feature extraction, fallback resolution, the completeness gate, and the
//! bounded forwarding call. A request either finishes with a
//! `PredictionResult` or terminates with exactly one typed failure.

use chrono::{Datelike, Utc};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::external::soil::SoilSnapshot;
use crate::external::{
    MarketPricesClient, MarketProvider, OpenMeteoClient, PredictionClient, Predictor,
    SoilGridsClient, SoilProvider, WeatherProvider,
};
use crate::models::{
    FeatureSet, GeoQuery, MarketData, MarketQuery, PredictionResult, Season, YieldFeatureSet,
    YieldParams,
};
use crate::services::fallback::{self, Feature};
use crate::services::features::{self, DerivedFeatures};
use crate::services::gate;

/// The pipeline's inbound surface, generic over its upstream providers so
/// tests can substitute stubs.
pub struct AdvisorService<W, S, M, P> {
    weather: W,
    soil: S,
    market: M,
    predictor: P,
}

impl AdvisorService<OpenMeteoClient, SoilGridsClient, MarketPricesClient, PredictionClient> {
    /// Wire the concrete upstream clients from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            weather: OpenMeteoClient::new(config.weather.base_url.clone()),
            soil: SoilGridsClient::new(config.soil.base_url.clone()),
            market: MarketPricesClient::new(
                config.market.base_url.clone(),
                config.market.api_key.clone(),
            ),
            predictor: PredictionClient::new(
                config.prediction.base_url.clone(),
                std::time::Duration::from_secs(config.prediction.timeout_seconds),
            ),
        }
    }
}

impl<W, S, M, P> AdvisorService<W, S, M, P>
where
    W: WeatherProvider,
    S: SoilProvider,
    M: MarketProvider,
    P: Predictor,
{
    pub fn new(weather: W, soil: S, market: M, predictor: P) -> Self {
        Self {
            weather,
            soil,
            market,
            predictor,
        }
    }

    /// Crop recommendation for a location.
    ///
    /// Weather and soil are fetched concurrently; neither cancels the other.
    /// A weather failure propagates because temperature, humidity, and
    /// rainfall have no fallback. A soil failure is downgraded to an empty
    /// snapshot since nitrogen and pH fall back.
    pub async fn get_crop_prediction(
        &self,
        query: GeoQuery,
    ) -> AppResult<PredictionResult<FeatureSet>> {
        query.validate()?;

        let (weather, soil) = tokio::join!(self.weather.fetch(&query), self.soil.fetch(&query));
        let weather = weather?;
        let soil = match soil {
            Ok(snapshot) => snapshot,
            Err(e) => {
                tracing::warn!(error = %e, "soil lookup failed, relying on fallback defaults");
                SoilSnapshot::default()
            }
        };

        let derived = features::derive_features(&weather, &soil);
        let candidate = DerivedFeatures {
            nitrogen: fallback::resolve(Feature::Nitrogen, derived.nitrogen),
            temperature: fallback::resolve(Feature::Temperature, derived.temperature),
            humidity: fallback::resolve(Feature::Humidity, derived.humidity),
            ph: fallback::resolve(Feature::Ph, derived.ph),
            rainfall: fallback::resolve(Feature::Rainfall, derived.rainfall),
        };

        let features = gate::validate(&candidate)?;
        tracing::debug!(?features, "forwarding feature set to prediction model");

        let prediction = self.predictor.predict_crop(&features).await?;
        Ok(PredictionResult {
            input_data: features,
            prediction,
        })
    }

    /// Yield estimation for a crop at a location.
    ///
    /// Weather-only variant: annual rainfall is the sum of the daily
    /// precipitation series, with a policy fallback when the series is
    /// absent, so even a weather failure is tolerated here.
    pub async fn get_crop_yield(
        &self,
        query: GeoQuery,
        params: YieldParams,
    ) -> AppResult<PredictionResult<YieldFeatureSet>> {
        query.validate()?;
        params.validate()?;

        let derived_rainfall = match self.weather.fetch(&query).await {
            Ok(weather) => features::total_precipitation(&weather),
            Err(e) => {
                tracing::warn!(error = %e, "rainfall lookup failed, relying on fallback default");
                None
            }
        };
        let annual_rainfall = fallback::resolve(Feature::AnnualRainfall, derived_rainfall)
            .ok_or_else(|| AppError::MissingFields {
                fields: vec![Feature::AnnualRainfall.name().to_string()],
            })?;

        let today = Utc::now();
        let features = YieldFeatureSet {
            crop: params.crop,
            crop_year: today.year(),
            season: Season::from_month(today.month()),
            state: params.state,
            area: params.area,
            annual_rainfall,
            fertilizer: params.fertilizer,
        };
        tracing::debug!(?features, "forwarding yield feature set to prediction model");

        let prediction = self.predictor.predict_yield(&features).await?;
        Ok(PredictionResult {
            input_data: features,
            prediction,
        })
    }

    /// Market price lookup. Single adapter call, no feature extraction; an
    /// empty upstream result is reported explicitly.
    pub async fn get_market_data(&self, query: MarketQuery) -> AppResult<MarketData> {
        query.validate()?;

        let records = self.market.fetch(&query).await?;
        if records.is_empty() {
            return Ok(MarketData::NoRecords);
        }
        Ok(MarketData::Records(records))
    }
}
