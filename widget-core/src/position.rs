//! Position resolution: configured coordinates or an IP geolocation
//! lookup, with the configured coordinates as the fallback.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::fmt::Debug;

use crate::{
    config::Config,
    error::truncate_body,
    model::{Coordinates, PositionSource},
};

/// Source of an approximate position for this machine.
#[async_trait]
pub trait GeoLocator: Send + Sync + Debug {
    /// Returns `(latitude, longitude)`.
    async fn locate(&self) -> Result<(f64, f64)>;
}

/// IP-based lookup against a freeipapi-compatible endpoint.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpLocation {
    latitude: Option<f64>,
    longitude: Option<f64>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, Client::new())
    }

    /// Lookup sharing `http` with other requests of the same widget.
    pub fn with_client(url: impl Into<String>, http: Client) -> Self {
        Self { url: url.into(), http }
    }
}

#[async_trait]
impl GeoLocator for IpGeolocator {
    async fn locate(&self) -> Result<(f64, f64)> {
        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .context("Failed to send IP geolocation request")?;

        let status = res.status();
        let body = res.text().await.context("Failed to read IP geolocation response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "IP geolocation request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: IpLocation =
            serde_json::from_str(&body).context("Failed to parse IP geolocation JSON")?;

        match (parsed.latitude, parsed.longitude) {
            (Some(lat), Some(lon)) => Ok((lat, lon)),
            _ => Err(anyhow!("IP location failed: response has no latitude/longitude")),
        }
    }
}

/// Resolves the position to fetch weather for. Never fails: lookup
/// errors are logged and replaced by the configured defaults.
pub async fn resolve_position(config: &Config, locator: &dyn GeoLocator) -> Coordinates {
    let defaults = |source| {
        Coordinates::new(config.default_latitude, config.default_longitude, source)
    };

    if !config.track_location {
        tracing::debug!("location tracking disabled, using configured coordinates");
        return defaults(PositionSource::Configured);
    }

    match locator.locate().await {
        Ok((latitude, longitude)) => {
            tracing::info!(latitude, longitude, "position resolved from IP");
            Coordinates::new(latitude, longitude, PositionSource::IpLookup)
        }
        Err(err) => {
            tracing::warn!("IP geolocation error: {err:#}; falling back to configured coordinates");
            defaults(PositionSource::Fallback)
        }
    }
}
