use crate::{
    Config, CurrentWeather, ForecastEntry, WeatherError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// A source of current conditions and forecasts for a composed location query.
///
/// Implementations are stateless between calls and never retry.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_current(&self, query: &str) -> Result<CurrentWeather, WeatherError>;

    /// Three-hourly entries in provider (chronological) order.
    async fn fetch_forecast(&self, query: &str) -> Result<Vec<ForecastEntry>, WeatherError>;
}

/// Construct the OpenWeather provider from config, resolving the API key
/// first so a missing credential fails before any network call.
pub fn provider_from_config(config: &Config) -> Result<OpenWeatherProvider, WeatherError> {
    let api_key = config.api_key()?;
    OpenWeatherProvider::new(api_key, &config.base_url, config.timeout())
}
