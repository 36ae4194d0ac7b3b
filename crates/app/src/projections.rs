//! Accessory projections — local accessory objects mirroring remote state.
//!
//! Each projection owns a local accessory identity, an immutable
//! [`AccessoryLink`] join key, and a fixed set of characteristics decided
//! at construction. State flows in through `update` (driven by the
//! synchronization cycle) and out through `write` (driven by the transport
//! layer), with remote command failures logged and suppressed so they never
//! reach the protocol session.

pub mod climate;
pub mod light;
pub mod media;
pub mod sensor;

pub use climate::ClimateProjection;
pub use light::LightProjection;
pub use media::MediaProjection;
pub use sensor::SensorProjection;

use remobridge_domain::appliance::{ApplianceKind, RemoteAppliance};
use remobridge_domain::device::RemoteDevice;
use remobridge_domain::error::{BridgeError, MappingError, WriteError};
use remobridge_domain::id::{ApplianceId, DeviceId};

use crate::ports::RemoteApi;

/// The immutable join key linking a projection to the cloud inventory.
///
/// Fixed at construction; used every cycle to locate the matching device
/// and appliance in the newest snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessoryLink {
    /// Sensor-only accessory, joined by device id.
    Sensor {
        /// Backing sensor hub.
        device_id: DeviceId,
    },
    /// Appliance-backed accessory, joined by appliance id and kind.
    Appliance {
        /// Hub carrying the infrared emitter (resolved via the appliance).
        device_id: DeviceId,
        /// Backing appliance.
        appliance_id: ApplianceId,
        /// Kind recorded at construction; a changed kind means no match.
        kind: ApplianceKind,
    },
}

/// One local accessory, dispatched over the supported families.
pub enum Projection<A> {
    /// Environmental sensor readings.
    Sensor(SensorProjection),
    /// Climate control (thermostat-style surface).
    Climate(ClimateProjection<A>),
    /// On/off light.
    Light(LightProjection<A>),
    /// Television / relative volume.
    Media(MediaProjection<A>),
}

impl<A: RemoteApi> Projection<A> {
    /// Accessory display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Sensor(p) => p.name(),
            Self::Climate(p) => p.name(),
            Self::Light(p) => p.name(),
            Self::Media(p) => p.name(),
        }
    }

    /// Stable numeric accessory category tag.
    #[must_use]
    pub fn category(&self) -> u8 {
        match self {
            Self::Sensor(_) => remobridge_domain::accessory::CATEGORY_SENSOR,
            Self::Climate(_) => remobridge_domain::accessory::CATEGORY_AIR_CONDITIONER,
            Self::Light(_) => remobridge_domain::accessory::CATEGORY_LIGHTBULB,
            Self::Media(_) => remobridge_domain::accessory::CATEGORY_TELEVISION,
        }
    }

    /// The join key recorded at construction.
    #[must_use]
    pub fn link(&self) -> AccessoryLink {
        match self {
            Self::Sensor(p) => AccessoryLink::Sensor {
                device_id: p.device_id(),
            },
            Self::Climate(p) => AccessoryLink::Appliance {
                device_id: p.device_id(),
                appliance_id: p.appliance_id(),
                kind: ApplianceKind::Aircon,
            },
            Self::Light(p) => AccessoryLink::Appliance {
                device_id: p.device_id(),
                appliance_id: p.appliance_id(),
                kind: ApplianceKind::Light,
            },
            Self::Media(p) => AccessoryLink::Appliance {
                device_id: p.device_id(),
                appliance_id: p.appliance_id(),
                kind: ApplianceKind::Television,
            },
        }
    }

    /// Push freshly fetched remote state into the local characteristics.
    ///
    /// `appliance` is present exactly when the join key is appliance-backed.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the snapshot carries a value outside
    /// the mapper domains; such faults propagate to the cycle's fault
    /// boundary rather than being silently absorbed.
    pub fn update(
        &self,
        device: &RemoteDevice,
        appliance: Option<&RemoteAppliance>,
    ) -> Result<(), MappingError> {
        match (self, appliance) {
            (Self::Sensor(p), _) => p.update(device),
            (Self::Climate(p), Some(appliance)) => p.update(device, appliance),
            (Self::Light(p), Some(appliance)) => p.update(appliance),
            (Self::Media(p), Some(_)) => {
                p.update();
                Ok(())
            }
            // Appliance-backed projections are only resolved together with
            // their appliance; nothing to apply otherwise.
            (_, None) => Ok(()),
        }
    }

    /// Dispatch a transport-initiated characteristic write.
    ///
    /// Remote command failures are handled inside the individual setters
    /// (logged and suppressed); the errors that do surface here are
    /// contract violations the transport's fault boundary must report.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError`] for unknown, read-only, or mistyped
    /// characteristics, and [`MappingError`] for values outside the
    /// characteristic's enumerated domain.
    pub async fn write(
        &self,
        characteristic: &str,
        value: &serde_json::Value,
    ) -> Result<(), BridgeError> {
        match self {
            Self::Sensor(p) => p.write(characteristic).map_err(BridgeError::from),
            Self::Climate(p) => p.write(characteristic, value).await,
            Self::Light(p) => p.write(characteristic, value).await,
            Self::Media(p) => p.write(characteristic, value).await,
        }
    }

    /// Current characteristic values, for the transport's read surface.
    #[must_use]
    pub fn characteristics(&self) -> Vec<(&'static str, serde_json::Value)> {
        match self {
            Self::Sensor(p) => p.characteristics(),
            Self::Climate(p) => p.characteristics(),
            Self::Light(p) => p.characteristics(),
            Self::Media(p) => p.characteristics(),
        }
    }
}

/// Reject a write with the right error for a known read-only tag.
pub(crate) fn reject_write(
    known_read_only: &[&'static str],
    characteristic: &str,
) -> WriteError {
    known_read_only
        .iter()
        .find(|name| **name == characteristic)
        .map_or_else(
            || WriteError::UnknownCharacteristic {
                name: characteristic.to_string(),
            },
            |name| WriteError::ReadOnly { name },
        )
}

/// Extract a `u8` characteristic value from a JSON write payload.
pub(crate) fn value_as_u8(
    name: &'static str,
    value: &serde_json::Value,
) -> Result<u8, WriteError> {
    value
        .as_u64()
        .and_then(|v| u8::try_from(v).ok())
        .ok_or(WriteError::InvalidType {
            name,
            expected: "small integer",
        })
}

/// Extract a `bool` characteristic value from a JSON write payload.
pub(crate) fn value_as_bool(
    name: &'static str,
    value: &serde_json::Value,
) -> Result<bool, WriteError> {
    value.as_bool().ok_or(WriteError::InvalidType {
        name,
        expected: "boolean",
    })
}

/// Extract an `f64` characteristic value from a JSON write payload.
pub(crate) fn value_as_f64(
    name: &'static str,
    value: &serde_json::Value,
) -> Result<f64, WriteError> {
    value.as_f64().ok_or(WriteError::InvalidType {
        name,
        expected: "number",
    })
}
