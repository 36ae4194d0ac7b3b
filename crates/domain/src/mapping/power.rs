//! Binary power mapping for on/off appliances.

use crate::error::MappingError;

/// Map the cloud's reported power state onto the local On characteristic.
///
/// # Errors
///
/// Returns [`MappingError::UnknownPowerState`] for anything but `on`/`off`.
pub fn to_local(state: &str) -> Result<bool, MappingError> {
    match state {
        "on" => Ok(true),
        "off" => Ok(false),
        other => Err(MappingError::UnknownPowerState {
            state: other.to_string(),
        }),
    }
}

/// Map the local On characteristic onto the infrared signal token.
#[must_use]
pub fn to_remote(on: bool) -> &'static str {
    if on { "on" } else { "off" }
}
