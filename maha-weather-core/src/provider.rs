use crate::{
    Config, ForecastReport, WeatherError, provider::open_meteo::OpenMeteoProvider, registry::City,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod open_meteo;

/// A source of current conditions and daily forecasts by coordinate.
#[async_trait]
pub trait ForecastProvider: Send + Sync + Debug {
    /// Issue exactly one request for `city` and return the validated report.
    async fn fetch_forecast(&self, city: &City) -> Result<ForecastReport, WeatherError>;
}

/// Construct the provider described by the `[provider]` section of the config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn ForecastProvider>> {
    let provider = OpenMeteoProvider::new(&config.provider)?;
    Ok(Box::new(provider))
}
