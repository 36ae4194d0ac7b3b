//! Error types shared across the workspace.
//!
//! Two failure families exist: [`RemoteError`] (the cloud API collaborator
//! failed) and [`MappingError`] (a value fell outside a mapper's declared
//! domain — a contract violation, never swallowed). [`WriteError`] covers a
//! characteristic write that cannot be dispatched at all.

use crate::device::SensorKind;
use crate::id::DeviceId;

/// Top-level error for bridge operations.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The cloud API call failed.
    #[error("remote API error")]
    Remote(#[from] RemoteError),

    /// A value fell outside a mapper's declared domain.
    #[error("value mapping error")]
    Mapping(#[from] MappingError),

    /// A characteristic write could not be dispatched.
    #[error("characteristic write error")]
    Write(#[from] WriteError),
}

/// Failure reported by the remote API client.
///
/// Adapter crates define their own error enums and convert into this at the
/// port boundary, boxing the concrete source.
#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// The request never produced a usable response (connect, DNS, timeout).
    #[error("remote API request failed")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The remote API rejected the request.
    #[error("remote API rejected the request (HTTP {status}): {message}")]
    Api {
        /// HTTP status code returned by the cloud.
        status: u16,
        /// Response body, truncated by the adapter.
        message: String,
    },

    /// The response body could not be decoded into the expected shape.
    #[error("remote API returned a malformed payload")]
    Decode(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// A value outside a value mapper's declared input or output domain.
///
/// Signals a logic defect or an unanticipated remote value; callers do not
/// recover from it locally — it propagates to the transport fault boundary.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MappingError {
    /// Operation mode outside the supported climate vocabulary.
    #[error("unsupported operation mode {mode:?}")]
    UnknownMode {
        /// The offending mode string.
        mode: String,
    },

    /// Override button outside the supported climate vocabulary.
    #[error("unsupported button {button:?}")]
    UnknownButton {
        /// The offending button string.
        button: String,
    },

    /// Temperature unit tag outside `{c, f}`.
    #[error("unsupported temperature unit {unit:?}")]
    UnknownUnit {
        /// The offending unit tag.
        unit: String,
    },

    /// A stored temperature that does not parse as a number.
    #[error("temperature {value:?} is not numeric")]
    InvalidTemperature {
        /// The offending temperature string.
        value: String,
    },

    /// Power state outside `{on, off}`.
    #[error("unsupported power state {state:?}")]
    UnknownPowerState {
        /// The offending power-state string.
        state: String,
    },

    /// A numeric characteristic value outside the enumerated domain.
    #[error("value {value} is outside the domain of {characteristic}")]
    ValueOutOfDomain {
        /// Characteristic type tag.
        characteristic: &'static str,
        /// The rejected value.
        value: u8,
    },

    /// An appliance payload lacked the sub-record its kind requires.
    #[error("appliance {appliance_id} lacks its {kind} state record")]
    MissingApplianceState {
        /// The malformed appliance.
        appliance_id: crate::id::ApplianceId,
        /// The appliance family whose record is missing.
        kind: crate::appliance::ApplianceKind,
    },

    /// A sensor reading the contract requires was absent.
    ///
    /// Every device is assumed to carry a temperature reading; this is the
    /// documented lookup fault when that precondition does not hold.
    #[error("device {device_id} reports no {kind} reading")]
    MissingReading {
        /// The device lacking the reading.
        device_id: DeviceId,
        /// The missing sensor kind.
        kind: SensorKind,
    },
}

/// A characteristic write that cannot be dispatched.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum WriteError {
    /// The accessory exposes no characteristic with this tag.
    #[error("unknown characteristic {name:?}")]
    UnknownCharacteristic {
        /// The requested characteristic tag.
        name: String,
    },

    /// The characteristic exists but does not accept writes.
    #[error("characteristic {name} does not accept writes")]
    ReadOnly {
        /// The characteristic type tag.
        name: &'static str,
    },

    /// The supplied JSON value has the wrong type for the characteristic.
    #[error("characteristic {name} expects a {expected} value")]
    InvalidType {
        /// The characteristic type tag.
        name: &'static str,
        /// Expected JSON type.
        expected: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_unknown_mode_error() {
        let err = MappingError::UnknownMode {
            mode: "heat-pump".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported operation mode \"heat-pump\"");
    }

    #[test]
    fn should_display_missing_reading_error() {
        let device_id = DeviceId::new();
        let err = MappingError::MissingReading {
            device_id,
            kind: SensorKind::Temperature,
        };
        assert!(err.to_string().contains(&device_id.to_string()));
        assert!(err.to_string().contains("te"));
    }

    #[test]
    fn should_display_api_error_with_status() {
        let err = RemoteError::Api {
            status: 429,
            message: "rate limit exceeded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "remote API rejected the request (HTTP 429): rate limit exceeded"
        );
    }

    #[test]
    fn should_convert_mapping_error_into_bridge_error() {
        let err: BridgeError = MappingError::UnknownPowerState {
            state: "dim".to_string(),
        }
        .into();
        assert!(matches!(err, BridgeError::Mapping(_)));
    }

    #[test]
    fn should_convert_remote_error_into_bridge_error() {
        let err: BridgeError = RemoteError::Api {
            status: 500,
            message: String::new(),
        }
        .into();
        assert!(matches!(err, BridgeError::Remote(_)));
    }

    #[test]
    fn should_display_read_only_write_error() {
        let err = WriteError::ReadOnly {
            name: "TemperatureDisplayUnits",
        };
        assert_eq!(
            err.to_string(),
            "characteristic TemperatureDisplayUnits does not accept writes"
        );
    }
}
