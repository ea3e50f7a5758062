use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::{Path, PathBuf}};

use crate::model::TemperatureUnit;

pub const DEFAULT_GEOLOCATION_URL: &str = "https://freeipapi.com/api/json";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
pub const DEFAULT_ICON_ROOT: &str = "assets/icons";

/// Widget configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// track_location = true
/// default_latitude = 52.52
/// default_longitude = 13.41
/// weather_key = "..."
/// weather_unit = "C"
/// language = "en"
/// weather_icons = "OneDark"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Look the position up from the public IP instead of using the defaults.
    pub track_location: bool,
    pub default_latitude: f64,
    pub default_longitude: f64,

    /// OpenWeather API key, sent as `appid`.
    pub weather_key: String,
    pub weather_unit: TemperatureUnit,

    /// Passed through to the weather API as `lang`.
    pub language: String,

    /// Icon set directory under `icon_root`.
    pub weather_icons: String,
    pub icon_root: String,

    pub geolocation_url: String,
    pub weather_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            track_location: true,
            default_latitude: 0.0,
            default_longitude: 0.0,
            weather_key: String::new(),
            weather_unit: TemperatureUnit::Celsius,
            language: "en".to_string(),
            weather_icons: "OneDark".to_string(),
            icon_root: DEFAULT_ICON_ROOT.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            weather_url: DEFAULT_WEATHER_URL.to_string(),
        }
    }
}

impl Config {
    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-widget", "weather-widget")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// API key, or an error with a hint when none has been configured.
    pub fn api_key(&self) -> Result<&str> {
        let key = self.weather_key.trim();
        if key.is_empty() {
            return Err(anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `weather-widget configure` and enter your API key."
            ));
        }
        Ok(key)
    }

    /// Path of the icon image for `icon_id`.
    pub fn icon_path(&self, icon_id: &str) -> String {
        format!(
            "{}/{}/{}.png",
            self.icon_root.trim_end_matches('/'),
            self.weather_icons,
            icon_id
        )
    }
}
