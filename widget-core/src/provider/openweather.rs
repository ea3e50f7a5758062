use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::{Result, WidgetError, truncate_body},
    model::{Coordinates, RawWeather},
};

use super::WeatherProvider;

const SERVICE: &str = "OpenWeather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, url: String, http: Client) -> Self {
        Self { api_key, url, http }
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: Option<String>,
    dt: Option<i64>,
    main: Option<OwMain>,
    #[serde(default)]
    weather: Vec<OwWeather>,
}

impl OwCurrentResponse {
    fn into_raw(self) -> Result<RawWeather> {
        let kelvin = self
            .main
            .and_then(|m| m.temp)
            .ok_or(WidgetError::MissingField { service: SERVICE, field: "main.temp" })?;

        let first = self
            .weather
            .into_iter()
            .next()
            .ok_or(WidgetError::MissingField { service: SERVICE, field: "weather[0]" })?;

        Ok(RawWeather {
            kelvin,
            description: first.description,
            icon_id: first.icon,
            location_name: self.name.filter(|n| !n.is_empty()),
            observed_at: self.dt.and_then(unix_to_utc),
        })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current(&self, coords: &Coordinates, language: &str) -> Result<RawWeather> {
        tracing::debug!(
            latitude = coords.latitude,
            longitude = coords.longitude,
            language,
            "requesting current weather"
        );

        let res = self
            .http
            .get(&self.url)
            .query(&[
                ("lat", coords.latitude.to_string()),
                ("lon", coords.longitude.to_string()),
                ("lang", language.to_string()),
                ("appid", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|source| WidgetError::Request { service: SERVICE, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| WidgetError::Body { service: SERVICE, source })?;

        if !status.is_success() {
            return Err(WidgetError::Status {
                service: SERVICE,
                status,
                body: truncate_body(&body),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)
            .map_err(|source| WidgetError::Parse { service: SERVICE, source })?;

        parsed.into_raw()
    }
}

fn unix_to_utc(ts: i64) -> Option<DateTime<Utc>> {
    DateTime::<Utc>::from_timestamp(ts, 0)
}
