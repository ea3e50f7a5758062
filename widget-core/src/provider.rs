use crate::{
    Config,
    error::Result,
    model::{Coordinates, RawWeather},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod openweather;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current conditions at `coords`, descriptions in `language`.
    async fn current(&self, coords: &Coordinates, language: &str) -> Result<RawWeather>;
}

/// Construct the OpenWeather provider from config.
pub fn provider_from_config(
    config: &Config,
    http: Client,
) -> anyhow::Result<Box<dyn WeatherProvider>> {
    let api_key = config.api_key()?;
    Ok(Box::new(OpenWeatherProvider::new(api_key.to_owned(), config.weather_url.clone(), http)))
}
