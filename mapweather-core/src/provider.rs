use crate::{
    Config,
    error::ProviderError,
    model::{CitySearchResult, Coordinate, WeatherSnapshot},
    provider::openweather::OpenWeatherClient,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Abstraction over the weather/geocoding provider, mainly so the
/// session layer can be exercised against a canned implementation.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at a coordinate.
    async fn current_weather(&self, coord: Coordinate) -> Result<WeatherSnapshot, ProviderError>;

    /// City matches for a free-text query, in provider order, at most
    /// five. No ranking beyond what the provider returns.
    async fn search_cities(&self, query: &str) -> Result<Vec<CitySearchResult>, ProviderError>;
}

/// Construct the OpenWeather-backed provider from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.require_api_key()?;
    Ok(Box::new(OpenWeatherClient::new(api_key.to_owned())))
}
