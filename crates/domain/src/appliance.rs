//! Cloud appliances — the infrared-controlled devices reported by the
//! remote inventory.
//!
//! Remote vocabulary fields (modes, buttons, units, power states) stay as
//! strings here; the [`mapping`](crate::mapping) module owns the domain
//! checks and raises [`MappingError`](crate::error::MappingError) for
//! values outside the supported vocabulary.

use serde::{Deserialize, Serialize};

use crate::id::{ApplianceId, DeviceId};

/// Appliance family recognised by the cloud API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApplianceKind {
    /// Climate control (air conditioner).
    #[serde(rename = "AC")]
    Aircon,
    /// Television / media control.
    #[serde(rename = "TV")]
    Television,
    /// On/off light.
    #[serde(rename = "LIGHT")]
    Light,
    /// Any family this bridge does not project.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ApplianceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Aircon => f.write_str("AC"),
            Self::Television => f.write_str("TV"),
            Self::Light => f.write_str("LIGHT"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Current climate settings as stored by the cloud.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AirconSettings {
    /// Operation mode (`warm`, `cool`, `dry`, `blow`, `auto`).
    pub mode: String,
    /// Override button; empty when none, `power-off` when powered down.
    pub button: String,
    /// Target temperature in the appliance's native unit, integer text.
    pub temperature: String,
}

/// Climate sub-record: settings plus the fixed display unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirconState {
    /// Current settings.
    pub settings: AirconSettings,
    /// Display temperature unit tag (`c` or `f`), fixed per appliance.
    pub unit: String,
}

/// Light sub-record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LightState {
    /// Reported power state (`on` or `off`).
    pub power: String,
}

/// A controllable appliance in the cloud inventory.
///
/// Same lifecycle as [`RemoteDevice`](crate::device::RemoteDevice):
/// immutable once fetched, superseded by the next poll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteAppliance {
    /// Cloud identity; the join key for appliance-backed accessories.
    pub id: ApplianceId,
    /// Appliance family.
    pub kind: ApplianceKind,
    /// Display name configured in the cloud.
    pub nickname: String,
    /// Back-reference to the hub the infrared emitter lives on.
    pub device_id: DeviceId,
    /// Climate sub-record, present for [`ApplianceKind::Aircon`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircon: Option<AirconState>,
    /// Light sub-record, present for [`ApplianceKind::Light`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub light: Option<LightState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_deserialize_known_kind_from_wire_tag() {
        let kind: ApplianceKind = serde_json::from_str("\"AC\"").unwrap();
        assert_eq!(kind, ApplianceKind::Aircon);
    }

    #[test]
    fn should_deserialize_unrecognised_kind_as_unknown() {
        let kind: ApplianceKind = serde_json::from_str("\"IR\"").unwrap();
        assert_eq!(kind, ApplianceKind::Unknown);
    }

    #[test]
    fn should_display_kind_as_wire_tag() {
        assert_eq!(ApplianceKind::Television.to_string(), "TV");
        assert_eq!(ApplianceKind::Light.to_string(), "LIGHT");
    }
}
