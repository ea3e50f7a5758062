//! Writing a [`WeatherReport`] into the widget's three output slots.

use crate::{config::Config, model::WeatherReport};

/// The three slots the widget fills: icon, temperature, description.
///
/// `text` arguments are the plain-text content of each slot; `html`
/// arguments carry the markup the page embeds.
pub trait RenderTarget {
    fn set_icon(&mut self, src: &str, html: &str);
    fn set_temperature(&mut self, text: &str, html: &str);
    fn set_description(&mut self, text: &str);
}

/// `<img src="assets/icons/<set>/<icon>.png"/>`
pub fn icon_html(config: &Config, report: &WeatherReport) -> String {
    format!(r#"<img src="{}"/>"#, config.icon_path(&report.icon_id))
}

/// `27°C`
pub fn temperature_text(report: &WeatherReport) -> String {
    format!("{}°{}", report.rounded_temperature(), report.unit)
}

/// `27°<span class="darkfg">C</span>`
pub fn temperature_html(report: &WeatherReport) -> String {
    format!(
        r#"{}°<span class="darkfg">{}</span>"#,
        report.rounded_temperature(),
        report.unit
    )
}

/// Writes `report` into `target`. The description is passed through
/// untouched.
pub fn render(config: &Config, report: &WeatherReport, target: &mut dyn RenderTarget) {
    target.set_icon(&config.icon_path(&report.icon_id), &icon_html(config, report));
    target.set_temperature(&temperature_text(report), &temperature_html(report));
    target.set_description(&report.description);
}

/// Keeps the markup of each slot, as a page would hold it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlTarget {
    pub icon: String,
    pub temperature: String,
    pub temperature_text: String,
    pub description: String,
}

impl RenderTarget for HtmlTarget {
    fn set_icon(&mut self, _src: &str, html: &str) {
        self.icon = html.to_string();
    }

    fn set_temperature(&mut self, text: &str, html: &str) {
        self.temperature = html.to_string();
        self.temperature_text = text.to_string();
    }

    fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Coordinates, PositionSource, TemperatureUnit};

    fn report(temperature: f64, unit: TemperatureUnit) -> WeatherReport {
        WeatherReport {
            temperature,
            unit,
            description: "clear sky".into(),
            icon_id: "01d".into(),
            location_name: None,
            observed_at: None,
            coordinates: Coordinates::new(0.0, 0.0, PositionSource::Configured),
        }
    }

    #[test]
    fn renders_all_three_slots() {
        let cfg = Config { weather_icons: "Dracula".into(), ..Config::default() };
        let mut target = HtmlTarget::default();

        render(&cfg, &report(27.0, TemperatureUnit::Celsius), &mut target);

        assert_eq!(target.icon, r#"<img src="assets/icons/Dracula/01d.png"/>"#);
        assert!(target.icon.contains("Dracula/01d.png"));
        assert_eq!(target.temperature, r#"27°<span class="darkfg">C</span>"#);
        assert_eq!(target.temperature_text, "27°C");
        assert_eq!(target.description, "clear sky");
    }

    #[test]
    fn fahrenheit_is_rounded_for_display() {
        let r = report(80.6, TemperatureUnit::Fahrenheit);
        assert_eq!(temperature_text(&r), "81°F");
        assert_eq!(temperature_html(&r), r#"81°<span class="darkfg">F</span>"#);
    }

    #[test]
    fn small_negative_rounds_to_zero() {
        let r = report(-0.4, TemperatureUnit::Fahrenheit);
        assert_eq!(temperature_text(&r), "0°F");
    }

    #[test]
    fn description_is_not_escaped() {
        let mut r = report(1.0, TemperatureUnit::Celsius);
        r.description = "<b>storm</b> & hail".into();
        let mut target = HtmlTarget::default();

        render(&Config::default(), &r, &mut target);
        assert_eq!(target.description, "<b>storm</b> & hail");
    }
}
