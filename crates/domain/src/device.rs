//! Cloud devices — the sensor hubs reported by the remote inventory.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MappingError;
use crate::id::DeviceId;

/// Short sensor-type codes used by the cloud API.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum SensorKind {
    /// Ambient temperature, degrees in the device's native unit.
    #[serde(rename = "te")]
    Temperature,
    /// Relative humidity, percent.
    #[serde(rename = "hu")]
    Humidity,
    /// Illuminance, lux.
    #[serde(rename = "il")]
    Illuminance,
    /// Motion trigger counter.
    #[serde(rename = "mo")]
    Motion,
}

impl std::fmt::Display for SensorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Temperature => f.write_str("te"),
            Self::Humidity => f.write_str("hu"),
            Self::Illuminance => f.write_str("il"),
            Self::Motion => f.write_str("mo"),
        }
    }
}

/// Latest observed value for one sensor kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// The observed numeric value.
    #[serde(rename = "val")]
    pub value: f64,
    /// When the cloud recorded the observation.
    #[serde(rename = "created_at")]
    pub observed_at: DateTime<Utc>,
}

/// A sensor hub in the cloud inventory.
///
/// Produced wholesale by each poll; never mutated, only superseded by the
/// next poll's result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteDevice {
    /// Cloud identity; the join key for sensor-only accessories.
    pub id: DeviceId,
    /// Display name configured in the cloud.
    pub name: String,
    /// Latest observation per sensor kind.
    pub readings: BTreeMap<SensorKind, SensorReading>,
}

impl RemoteDevice {
    /// Latest value for the given sensor kind, if the device reports it.
    #[must_use]
    pub fn reading(&self, kind: SensorKind) -> Option<f64> {
        self.readings.get(&kind).map(|r| r.value)
    }

    /// Latest temperature reading.
    ///
    /// Every device is assumed to report a temperature; this is a documented
    /// precondition of the cloud inventory rather than an invented fallback.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::MissingReading`] when the precondition does
    /// not hold.
    pub fn temperature(&self) -> Result<f64, MappingError> {
        self.reading(SensorKind::Temperature)
            .ok_or(MappingError::MissingReading {
                device_id: self.id,
                kind: SensorKind::Temperature,
            })
    }
}
