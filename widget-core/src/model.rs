use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display unit for temperatures. Serialized as the single-letter marker
/// the widget prints after the degree sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C", alias = "c", alias = "celsius")]
    Celsius,
    #[serde(rename = "F", alias = "f", alias = "fahrenheit")]
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn abbreviation(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    pub const fn all() -> &'static [TemperatureUnit] {
        &[TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit]
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "c" | "celsius" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: C, F."
            )),
        }
    }
}

/// Where a pair of coordinates came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSource {
    /// Location tracking is off; the configured defaults were used.
    Configured,
    /// The IP geolocation lookup answered with a position.
    IpLookup,
    /// The lookup failed and the configured defaults were used instead.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
    pub source: PositionSource,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64, source: PositionSource) -> Self {
        Self { latitude, longitude, source }
    }
}

/// Current conditions as returned by the weather provider, before any
/// unit conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct RawWeather {
    pub kelvin: f64,
    pub description: String,
    pub icon_id: String,
    pub location_name: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
}

/// Display-ready weather. Only built from a complete `RawWeather`, so a
/// report always carries temperature, description and icon together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    /// Temperature in `unit`, before display rounding.
    pub temperature: f64,
    pub unit: TemperatureUnit,
    pub description: String,
    pub icon_id: String,
    pub location_name: Option<String>,
    pub observed_at: Option<DateTime<Utc>>,
    pub coordinates: Coordinates,
}

impl WeatherReport {
    pub fn from_raw(raw: RawWeather, unit: TemperatureUnit, coordinates: Coordinates) -> Self {
        Self {
            temperature: crate::units::kelvin_to_display(raw.kelvin, unit),
            unit,
            description: raw.description,
            icon_id: raw.icon_id,
            location_name: raw.location_name,
            observed_at: raw.observed_at,
            coordinates,
        }
    }

    /// Temperature rounded to zero decimals.
    pub fn rounded_temperature(&self) -> i64 {
        self.temperature.round() as i64
    }
}
