//! Local accessory vocabulary — the characteristic value domains exposed to
//! the accessory protocol.
//!
//! Numeric values match the accessory protocol's characteristic encodings;
//! conversions from raw numbers go through `TryFrom<u8>` and reject values
//! outside the enumerated domain.

use serde::{Deserialize, Serialize};

use crate::error::MappingError;

/// Stable numeric category tag for sensor accessories.
pub const CATEGORY_SENSOR: u8 = 10;
/// Stable numeric category tag for air-conditioner accessories.
pub const CATEGORY_AIR_CONDITIONER: u8 = 21;
/// Stable numeric category tag for television accessories.
pub const CATEGORY_TELEVISION: u8 = 31;
/// Stable numeric category tag for lightbulb accessories.
pub const CATEGORY_LIGHTBULB: u8 = 5;

/// Tri-state (plus off) heating/cooling characteristic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeatingCoolingState {
    /// Appliance powered down.
    Off,
    /// Heating.
    Heat,
    /// Cooling (also the documented approximation for dry, blow, and
    /// observed auto operation).
    Cool,
    /// Automatic mode selection; valid as a target only.
    Auto,
}

impl HeatingCoolingState {
    /// Characteristic encoding.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Heat => 1,
            Self::Cool => 2,
            Self::Auto => 3,
        }
    }
}

impl TryFrom<u8> for HeatingCoolingState {
    type Error = MappingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Off),
            1 => Ok(Self::Heat),
            2 => Ok(Self::Cool),
            3 => Ok(Self::Auto),
            other => Err(MappingError::ValueOutOfDomain {
                characteristic: "HeatingCoolingState",
                value: other,
            }),
        }
    }
}

/// Read-only display unit characteristic value, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureDisplayUnit {
    /// Degrees Celsius.
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
}

impl TemperatureDisplayUnit {
    /// Characteristic encoding.
    #[must_use]
    pub fn as_u8(self) -> u8 {
        match self {
            Self::Celsius => 0,
            Self::Fahrenheit => 1,
        }
    }
}

/// Relative volume step; the remote protocol exposes no absolute volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VolumeSelector {
    /// Volume up.
    Increment,
    /// Volume down.
    Decrement,
}

impl TryFrom<u8> for VolumeSelector {
    type Error = MappingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Increment),
            1 => Ok(Self::Decrement),
            other => Err(MappingError::ValueOutOfDomain {
                characteristic: "VolumeSelector",
                value: other,
            }),
        }
    }
}
