//! Kelvin to display-unit conversion.

use crate::model::TemperatureUnit;

pub const KELVIN: f64 = 273.15;

/// Whole degrees Celsius, floored.
pub fn kelvin_to_celsius(kelvin: f64) -> f64 {
    (kelvin - KELVIN).floor()
}

/// Converts an API temperature to the configured unit.
///
/// The Celsius value is floored first; Fahrenheit is derived from that
/// floored value and is therefore not necessarily whole.
pub fn kelvin_to_display(kelvin: f64, unit: TemperatureUnit) -> f64 {
    let celsius = kelvin_to_celsius(kelvin);
    match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    }
}
