use anyhow::Context;
use clap::{Parser, Subcommand};
use inquire::{Confirm, CustomType, Select, Text};
use weather_widget_core::{Config, HtmlTarget, TemperatureUnit, Widget};

use crate::output::{TerminalTarget, print_html};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather-widget", version, about = "Current weather for where you are")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactively edit the widget configuration.
    Configure,

    /// Fetch and show the current weather.
    Show {
        /// Print the icon, temperature and description HTML fragments.
        #[arg(long)]
        html: bool,

        /// Skip the IP lookup and use the configured coordinates.
        #[arg(long)]
        no_track: bool,
    },

    /// Print the location of the config file.
    ConfigPath,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { html, no_track } => show(html, no_track).await,
            Command::ConfigPath => {
                println!("{}", Config::config_file_path()?.display());
                Ok(())
            }
        }
    }
}

async fn show(html: bool, no_track: bool) -> anyhow::Result<()> {
    let mut config = Config::load()?;
    if no_track {
        config.track_location = false;
    }

    tracing::debug!(
        track_location = config.track_location,
        unit = %config.weather_unit,
        "loaded configuration"
    );
    let widget = Widget::from_config(config)?;

    if html {
        let mut target = HtmlTarget::default();
        widget.refresh(&mut target).await.context("Failed to update weather")?;
        print_html(&target);
    } else {
        let mut target = TerminalTarget::default();
        let report = widget.refresh(&mut target).await.context("Failed to update weather")?;
        target.print(&report);
    }

    Ok(())
}

fn configure() -> anyhow::Result<()> {
    let current = Config::load()?;

    let weather_key = Text::new("OpenWeather API key:")
        .with_default(&current.weather_key)
        .prompt()?;

    let track_location = Confirm::new("Look up your position from your IP address?")
        .with_default(current.track_location)
        .prompt()?;

    let default_latitude = CustomType::<f64>::new("Default latitude:")
        .with_default(current.default_latitude)
        .with_error_message("Please enter a number")
        .prompt()?;

    let default_longitude = CustomType::<f64>::new("Default longitude:")
        .with_default(current.default_longitude)
        .with_error_message("Please enter a number")
        .prompt()?;

    let units = TemperatureUnit::all().to_vec();
    let start = units.iter().position(|u| *u == current.weather_unit).unwrap_or(0);
    let weather_unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(start)
        .prompt()?;

    let language = Text::new("Language code:")
        .with_default(&current.language)
        .prompt()?;

    let weather_icons = Text::new("Icon set:")
        .with_default(&current.weather_icons)
        .prompt()?;

    let config = Config {
        track_location,
        default_latitude,
        default_longitude,
        weather_key: weather_key.trim().to_string(),
        weather_unit,
        language: language.trim().to_string(),
        weather_icons: weather_icons.trim().to_string(),
        ..current
    };

    let path = Config::config_file_path()?;
    config.save()?;
    tracing::info!(path = %path.display(), "configuration saved");
    println!("Saved configuration to {}", path.display());

    Ok(())
}
