//! Core library for the weather widget.
//!
//! This crate defines:
//! - Configuration handling
//! - Position resolution (IP geolocation with a configured fallback)
//! - The weather provider abstraction and its OpenWeather implementation
//! - Unit conversion and rendering into the widget's three slots
//!
//! It is used by `weather-widget`, but can also be embedded by anything
//! that implements [`RenderTarget`].

pub mod config;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod position;
pub mod provider;
pub mod render;
pub mod units;

pub use config::Config;
pub use error::WidgetError;
pub use model::{Coordinates, PositionSource, RawWeather, TemperatureUnit, WeatherReport};
pub use pipeline::Widget;
pub use position::{GeoLocator, IpGeolocator, resolve_position};
pub use provider::WeatherProvider;
pub use render::{HtmlTarget, RenderTarget, render};
