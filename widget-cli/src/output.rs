use chrono::Local;
use std::fmt::Write;
use weather_widget_core::{HtmlTarget, PositionSource, RenderTarget, WeatherReport};

/// Plain-text rendering of the three widget slots.
#[derive(Debug, Default)]
pub struct TerminalTarget {
    icon: String,
    temperature: String,
    description: String,
}

impl RenderTarget for TerminalTarget {
    fn set_icon(&mut self, src: &str, _html: &str) {
        self.icon = src.to_string();
    }

    fn set_temperature(&mut self, text: &str, _html: &str) {
        self.temperature = text.to_string();
    }

    fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }
}

impl TerminalTarget {
    pub fn format(&self, report: &WeatherReport) -> String {
        let place = report.location_name.as_deref().unwrap_or("Current location");
        let source = match report.coordinates.source {
            PositionSource::Configured => "configured",
            PositionSource::IpLookup => "from IP",
            PositionSource::Fallback => "fallback",
        };

        let mut out = format!(
            "{place} ({:.4}, {:.4}, {source})\n",
            report.coordinates.latitude, report.coordinates.longitude
        );
        let _ = writeln!(out, "  {}  {}", self.temperature, self.description);
        let _ = writeln!(out, "  icon: {}", self.icon);
        if let Some(observed) = report.observed_at {
            let local = observed.with_timezone(&Local);
            let _ = writeln!(out, "  observed: {}", local.format("%Y-%m-%d %H:%M"));
        }
        out
    }

    pub fn print(&self, report: &WeatherReport) {
        print!("{}", self.format(report));
    }
}

/// The fragments a page would place into its three slots.
pub fn html_fragments(target: &HtmlTarget) -> String {
    format!(
        concat!(
            r#"<div class="weatherIcon">{}</div>"#,
            "\n",
            r#"<div class="weatherValue"><p>{}</p></div>"#,
            "\n",
            r#"<div class="weatherDescription"><p>{}</p></div>"#,
            "\n",
        ),
        target.icon, target.temperature, target.description
    )
}

pub fn print_html(target: &HtmlTarget) {
    print!("{}", html_fragments(target));
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};
    use weather_widget_core::{Config, Coordinates, TemperatureUnit, render};

    fn config() -> Config {
        Config { weather_icons: "Nord".into(), ..Config::default() }
    }

    fn report(source: PositionSource) -> WeatherReport {
        WeatherReport {
            temperature: 10.0,
            unit: TemperatureUnit::Celsius,
            description: "rain".into(),
            icon_id: "10d".into(),
            location_name: None,
            observed_at: None,
            coordinates: Coordinates::new(10.0, 20.0, source),
        }
    }

    #[test]
    fn html_fragments_wrap_each_slot() {
        let mut target = HtmlTarget::default();
        render(&config(), &report(PositionSource::Configured), &mut target);

        let out = html_fragments(&target);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(
            lines,
            vec![
                r#"<div class="weatherIcon"><img src="assets/icons/Nord/10d.png"/></div>"#,
                r#"<div class="weatherValue"><p>10°<span class="darkfg">C</span></p></div>"#,
                r#"<div class="weatherDescription"><p>rain</p></div>"#,
            ]
        );
    }

    #[test]
    fn terminal_keeps_icon_path_not_markup() {
        let r = report(PositionSource::Configured);
        let mut target = TerminalTarget::default();
        render(&config(), &r, &mut target);

        assert_eq!(target.icon, "assets/icons/Nord/10d.png");
        assert_eq!(target.temperature, "10°C");

        let out = target.format(&r);
        assert!(out.contains("  10°C  rain\n"));
        assert!(out.contains("  icon: assets/icons/Nord/10d.png\n"));
        assert!(!out.contains("<img"));
        assert!(!out.contains("observed:"));
    }

    #[test]
    fn place_line_names_position_source() {
        let cases = [
            (PositionSource::Configured, "configured"),
            (PositionSource::IpLookup, "from IP"),
            (PositionSource::Fallback, "fallback"),
        ];

        for (source, label) in cases {
            let r = report(source);
            let mut target = TerminalTarget::default();
            render(&config(), &r, &mut target);

            let first = target.format(&r).lines().next().unwrap().to_string();
            assert_eq!(first, format!("Current location (10.0000, 20.0000, {label})"));
        }
    }

    #[test]
    fn place_line_uses_location_name_and_shows_observation() {
        let mut r = report(PositionSource::IpLookup);
        r.location_name = Some("Lisbon".into());
        r.observed_at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0);
        let mut target = TerminalTarget::default();
        render(&config(), &r, &mut target);

        let out = target.format(&r);
        assert!(out.starts_with("Lisbon (10.0000, 20.0000, from IP)\n"));
        assert!(out.lines().any(|l| l.starts_with("  observed: ")));
    }
}
