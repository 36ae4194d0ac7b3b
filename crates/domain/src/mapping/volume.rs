//! Relative volume stepper mapping.
//!
//! The remote protocol only exposes one-shot infrared triggers for volume;
//! no absolute-volume mapping exists.

use crate::accessory::VolumeSelector;

/// Map a volume step onto the infrared signal token.
#[must_use]
pub fn to_remote(selector: VolumeSelector) -> &'static str {
    match selector {
        VolumeSelector::Increment => "vol-up",
        VolumeSelector::Decrement => "vol-down",
    }
}
