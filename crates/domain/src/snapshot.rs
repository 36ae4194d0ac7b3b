//! Snapshot — one atomic poll result.

use serde::{Deserialize, Serialize};

use crate::appliance::RemoteAppliance;
use crate::device::RemoteDevice;
use crate::id::{ApplianceId, DeviceId};

/// The pair of inventories returned by one poll.
///
/// Treated as an atomic, consistent view: every accessory in one
/// synchronization cycle is updated from the same snapshot, bounding the
/// cloud API call volume to two requests per cycle.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// All sensor hubs visible to the account.
    pub devices: Vec<RemoteDevice>,
    /// All registered appliances.
    pub appliances: Vec<RemoteAppliance>,
}

impl Snapshot {
    /// Look up a device by id.
    #[must_use]
    pub fn device(&self, id: DeviceId) -> Option<&RemoteDevice> {
        self.devices.iter().find(|device| device.id == id)
    }

    /// Look up an appliance by id.
    #[must_use]
    pub fn appliance(&self, id: ApplianceId) -> Option<&RemoteAppliance> {
        self.appliances.iter().find(|appliance| appliance.id == id)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::appliance::ApplianceKind;

    fn device(id: DeviceId) -> RemoteDevice {
        RemoteDevice {
            id,
            name: "Hub".to_string(),
            readings: BTreeMap::new(),
        }
    }

    fn appliance(id: ApplianceId, device_id: DeviceId) -> RemoteAppliance {
        RemoteAppliance {
            id,
            kind: ApplianceKind::Light,
            nickname: "Ceiling".to_string(),
            device_id,
            aircon: None,
            light: None,
        }
    }

    #[test]
    fn should_find_device_by_id() {
        let id = DeviceId::new();
        let snapshot = Snapshot {
            devices: vec![device(DeviceId::new()), device(id)],
            appliances: Vec::new(),
        };
        assert_eq!(snapshot.device(id).map(|d| d.id), Some(id));
    }

    #[test]
    fn should_return_none_for_unknown_device() {
        let snapshot = Snapshot::default();
        assert!(snapshot.device(DeviceId::new()).is_none());
    }

    #[test]
    fn should_find_appliance_by_id() {
        let id = ApplianceId::new();
        let snapshot = Snapshot {
            devices: Vec::new(),
            appliances: vec![appliance(id, DeviceId::new())],
        };
        assert_eq!(snapshot.appliance(id).map(|a| a.id), Some(id));
    }

    #[test]
    fn should_return_none_for_unknown_appliance() {
        let snapshot = Snapshot::default();
        assert!(snapshot.appliance(ApplianceId::new()).is_none());
    }
}
