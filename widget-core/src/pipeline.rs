//! The widget pipeline: position → weather → report → render.

use anyhow::Context;
use reqwest::Client;
use std::fmt;

use crate::{
    config::Config,
    error::Result,
    model::WeatherReport,
    position::{GeoLocator, IpGeolocator, resolve_position},
    provider::{WeatherProvider, provider_from_config},
    render::{RenderTarget, render},
};

const USER_AGENT: &str = concat!("weather-widget/", env!("CARGO_PKG_VERSION"));

pub struct Widget {
    config: Config,
    locator: Box<dyn GeoLocator>,
    provider: Box<dyn WeatherProvider>,
}

impl fmt::Debug for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("locator", &self.locator)
            .field("provider", &self.provider)
            .finish_non_exhaustive()
    }
}

impl Widget {
    pub fn new(
        config: Config,
        locator: Box<dyn GeoLocator>,
        provider: Box<dyn WeatherProvider>,
    ) -> Self {
        Self { config, locator, provider }
    }

    /// Widget wired to the IP geolocation endpoint and OpenWeather, as
    /// configured.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        let provider = provider_from_config(&config, http.clone())?;
        let locator = Box::new(IpGeolocator::with_client(config.geolocation_url.clone(), http));
        Ok(Self::new(config, locator, provider))
    }

    /// Resolves the position and fetches current conditions.
    pub async fn fetch(&self) -> Result<WeatherReport> {
        let coords = resolve_position(&self.config, self.locator.as_ref()).await;
        let raw = self.provider.current(&coords, &self.config.language).await?;
        Ok(WeatherReport::from_raw(raw, self.config.weather_unit, coords))
    }

    /// Fetches and renders into `target`. On error nothing is written,
    /// so the target keeps whatever it showed before.
    pub async fn refresh(&self, target: &mut dyn RenderTarget) -> Result<WeatherReport> {
        let report = self.fetch().await.inspect_err(|err| {
            tracing::error!("weather update failed: {err}");
        })?;
        render(&self.config, &report, target);
        tracing::info!(
            temperature = report.rounded_temperature(),
            unit = %report.unit,
            description = %report.description,
            "weather rendered"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::WidgetError,
        model::{Coordinates, PositionSource, RawWeather, TemperatureUnit},
        render::HtmlTarget,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    #[derive(Debug)]
    struct NoLookup;

    #[async_trait]
    impl GeoLocator for NoLookup {
        async fn locate(&self) -> anyhow::Result<(f64, f64)> {
            panic!("geolocation must not be called when tracking is disabled");
        }
    }

    #[derive(Debug, Default)]
    struct RecordingProvider {
        fail: bool,
        seen: Arc<Mutex<Vec<(Coordinates, String)>>>,
    }

    #[async_trait]
    impl WeatherProvider for RecordingProvider {
        async fn current(&self, coords: &Coordinates, language: &str) -> Result<RawWeather> {
            self.seen.lock().unwrap().push((*coords, language.to_string()));
            if self.fail {
                return Err(WidgetError::MissingField { service: "test", field: "weather[0]" });
            }
            Ok(RawWeather {
                kelvin: 283.15,
                description: "rain".into(),
                icon_id: "10d".into(),
                location_name: None,
                observed_at: None,
            })
        }
    }

    fn config() -> Config {
        Config {
            track_location: false,
            default_latitude: 10.0,
            default_longitude: 20.0,
            weather_unit: TemperatureUnit::Celsius,
            language: "fr".into(),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn refresh_renders_report() {
        let provider = RecordingProvider::default();
        let widget = Widget::new(config(), Box::new(NoLookup), Box::new(provider));
        let mut target = HtmlTarget::default();

        let report = widget.refresh(&mut target).await.expect("refresh succeeds");

        assert_eq!(report.coordinates, Coordinates::new(10.0, 20.0, PositionSource::Configured));
        assert_eq!(target.temperature_text, "10°C");
        assert_eq!(target.description, "rain");
        assert!(target.icon.contains("10d.png"));
    }

    #[tokio::test]
    async fn provider_gets_default_coordinates_and_language() {
        let provider = RecordingProvider::default();
        let seen = Arc::clone(&provider.seen);
        let widget = Widget::new(config(), Box::new(NoLookup), Box::new(provider));

        widget.fetch().await.expect("fetch succeeds");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].0, Coordinates::new(10.0, 20.0, PositionSource::Configured));
        assert_eq!(seen[0].1, "fr");
    }

    #[test]
    fn from_config_needs_api_key() {
        let err = Widget::from_config(config()).unwrap_err();
        assert!(err.to_string().contains("No OpenWeather API key configured"));

        let cfg = Config { weather_key: "KEY".into(), ..config() };
        let widget = Widget::from_config(cfg).expect("widget with shared client");
        assert!(format!("{widget:?}").contains("OpenWeatherProvider"));
    }

    #[tokio::test]
    async fn failed_fetch_leaves_target_untouched() {
        let provider = RecordingProvider { fail: true, ..Default::default() };
        let widget = Widget::new(config(), Box::new(NoLookup), Box::new(provider));
        let mut target = HtmlTarget {
            description: "previous".into(),
            ..Default::default()
        };

        let err = widget.refresh(&mut target).await.unwrap_err();

        assert!(matches!(err, WidgetError::MissingField { .. }));
        assert_eq!(target.description, "previous");
        assert!(target.icon.is_empty());
    }
}
