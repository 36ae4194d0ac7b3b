//! Temperature unit conversion between the cloud's native-unit integer
//! vocabulary and the local protocol's 0.1 °C resolution.

use crate::accessory::TemperatureDisplayUnit;
use crate::error::MappingError;

/// Parse the cloud's display unit tag.
///
/// # Errors
///
/// Returns [`MappingError::UnknownUnit`] for any tag outside `{c, f}`.
pub fn parse_unit(tag: &str) -> Result<TemperatureDisplayUnit, MappingError> {
    match tag {
        "c" => Ok(TemperatureDisplayUnit::Celsius),
        "f" => Ok(TemperatureDisplayUnit::Fahrenheit),
        other => Err(MappingError::UnknownUnit {
            unit: other.to_string(),
        }),
    }
}

/// Convert a stored native-unit temperature into local degrees Celsius,
/// rounded to one decimal place (the local protocol's resolution).
///
/// # Errors
///
/// Returns [`MappingError::InvalidTemperature`] when the stored text does
/// not parse as a number.
pub fn to_local(value: &str, unit: TemperatureDisplayUnit) -> Result<f64, MappingError> {
    let parsed: f64 = value
        .trim()
        .parse()
        .map_err(|_| MappingError::InvalidTemperature {
            value: value.to_string(),
        })?;
    let celsius = match unit {
        TemperatureDisplayUnit::Celsius => parsed,
        TemperatureDisplayUnit::Fahrenheit => (parsed - 32.0) * 5.0 / 9.0,
    };
    Ok(round_tenth(celsius))
}

/// Convert a local Celsius value into the remote command vocabulary:
/// the nearest whole degree in the appliance's native unit, as text.
#[must_use]
pub fn to_remote(celsius: f64, unit: TemperatureDisplayUnit) -> String {
    let native = match unit {
        TemperatureDisplayUnit::Celsius => celsius,
        TemperatureDisplayUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
    };
    format!("{}", native.round() as i64)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
