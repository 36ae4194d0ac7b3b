//! Registry — the ordered collection of accessory projections.
//!
//! Built exactly once at startup from the initial snapshot and never
//! changed afterwards: appliances added or removed in the cloud during a
//! running session are not reconciled.

use std::sync::Arc;

use remobridge_domain::appliance::{ApplianceKind, RemoteAppliance};
use remobridge_domain::device::RemoteDevice;
use remobridge_domain::error::MappingError;
use remobridge_domain::snapshot::Snapshot;

use crate::event_bus::EventBus;
use crate::ports::RemoteApi;
use crate::projections::{
    AccessoryLink, ClimateProjection, LightProjection, MediaProjection, Projection,
    SensorProjection,
};

/// The accessory container exposed to the transport layer and driven by the
/// synchronization cycle.
pub struct Bridge<A> {
    name: String,
    accessories: Vec<Arc<Projection<A>>>,
}

impl<A: RemoteApi> Bridge<A> {
    /// Build the registry from the initial snapshot.
    ///
    /// One sensor accessory per device; one typed accessory per appliance
    /// whose kind is recognised and whose backing device resolves. Unknown
    /// kinds and orphaned appliances are skipped with a log line.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the snapshot carries values outside
    /// the mapper domains — at startup this is fatal, no accessory has
    /// been served yet.
    pub fn from_snapshot(
        api: &Arc<A>,
        bus: &EventBus,
        name: impl Into<String>,
        snapshot: &Snapshot,
    ) -> Result<Self, MappingError> {
        let mut accessories: Vec<Arc<Projection<A>>> = Vec::new();

        for device in &snapshot.devices {
            accessories.push(Arc::new(Projection::Sensor(SensorProjection::new(
                bus, device,
            )?)));
        }

        for appliance in &snapshot.appliances {
            let Some(device) = snapshot.device(appliance.device_id) else {
                tracing::warn!(
                    appliance_id = %appliance.id,
                    device_id = %appliance.device_id,
                    "appliance references a device missing from the snapshot, skipping"
                );
                continue;
            };

            match appliance.kind {
                ApplianceKind::Aircon => {
                    accessories.push(Arc::new(Projection::Climate(ClimateProjection::new(
                        bus,
                        Arc::clone(api),
                        device,
                        appliance,
                    )?)));
                }
                ApplianceKind::Television => {
                    accessories.push(Arc::new(Projection::Media(MediaProjection::new(
                        bus,
                        Arc::clone(api),
                        device.id,
                        appliance,
                    ))));
                }
                ApplianceKind::Light => {
                    accessories.push(Arc::new(Projection::Light(LightProjection::new(
                        bus,
                        Arc::clone(api),
                        device.id,
                        appliance,
                    )?)));
                }
                ApplianceKind::Unknown => {
                    tracing::info!(
                        appliance_id = %appliance.id,
                        nickname = %appliance.nickname,
                        "appliance kind is not projected, skipping"
                    );
                }
            }
        }

        tracing::info!(accessories = accessories.len(), "registry built");
        Ok(Self {
            name: name.into(),
            accessories,
        })
    }

    /// Bridge display name (the cloud account's nickname).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All registered accessories, in construction order.
    #[must_use]
    pub fn accessories(&self) -> &[Arc<Projection<A>>] {
        &self.accessories
    }

    /// Look up an accessory by display name (first match wins).
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Arc<Projection<A>>> {
        self.accessories
            .iter()
            .find(|accessory| accessory.name() == name)
    }

    /// Fan one snapshot out to every registered accessory.
    ///
    /// Accessories whose join key does not resolve in this snapshot are
    /// skipped for the cycle, keeping their previous values.
    ///
    /// # Errors
    ///
    /// Returns the first [`MappingError`] raised by an update; the caller's
    /// fault boundary logs it.
    pub fn update_all(&self, snapshot: &Snapshot) -> Result<(), MappingError> {
        for accessory in &self.accessories {
            let Some((device, appliance)) = resolve(accessory.link(), snapshot) else {
                tracing::debug!(
                    accessory = accessory.name(),
                    "join key did not resolve in this snapshot, keeping previous values"
                );
                continue;
            };
            accessory.update(device, appliance)?;
        }
        Ok(())
    }
}

/// Resolve a join key against a snapshot.
///
/// Sensor links match by device id. Appliance links match by appliance id,
/// require the appliance's kind to still equal the recorded kind, and then
/// resolve the appliance's device within the same snapshot.
fn resolve(
    link: AccessoryLink,
    snapshot: &Snapshot,
) -> Option<(&RemoteDevice, Option<&RemoteAppliance>)> {
    match link {
        AccessoryLink::Sensor { device_id } => {
            snapshot.device(device_id).map(|device| (device, None))
        }
        AccessoryLink::Appliance {
            appliance_id, kind, ..
        } => {
            let appliance = snapshot.appliance(appliance_id)?;
            if appliance.kind != kind {
                return None;
            }
            let device = snapshot.device(appliance.device_id)?;
            Some((device, Some(appliance)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{
        RecordingApi, aircon_appliance, device_with, light_appliance, tv_appliance,
    };
    use remobridge_domain::device::SensorKind;

    fn api() -> Arc<RecordingApi> {
        Arc::new(RecordingApi::default())
    }

    #[test]
    fn should_build_one_sensor_per_device_and_one_accessory_per_known_appliance() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let aircon = aircon_appliance(device.id, "cool", "", "25", "c");
        let light = light_appliance(device.id, "on");
        let tv = tv_appliance(device.id);
        let snapshot = Snapshot {
            devices: vec![device],
            appliances: vec![aircon, light, tv],
        };

        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();

        assert_eq!(bridge.accessories().len(), 4);
        assert_eq!(bridge.name(), "Tester");
    }

    #[test]
    fn should_skip_appliance_with_unknown_kind() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let mut appliance = tv_appliance(device.id);
        appliance.kind = ApplianceKind::Unknown;
        let snapshot = Snapshot {
            devices: vec![device],
            appliances: vec![appliance],
        };

        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();
        assert_eq!(bridge.accessories().len(), 1);
    }

    #[test]
    fn should_skip_appliance_whose_device_is_missing() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let orphan = light_appliance(remobridge_domain::id::DeviceId::new(), "on");
        let snapshot = Snapshot {
            devices: vec![device],
            appliances: vec![orphan],
        };

        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();
        assert_eq!(bridge.accessories().len(), 1);
    }

    #[test]
    fn should_fail_construction_when_snapshot_violates_mapper_domain() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let appliance = aircon_appliance(device.id, "turbo", "", "25", "c");
        let snapshot = Snapshot {
            devices: vec![device],
            appliances: vec![appliance],
        };

        assert!(Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).is_err());
    }

    #[test]
    fn should_find_accessory_by_name() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let snapshot = Snapshot {
            devices: vec![device],
            appliances: Vec::new(),
        };

        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();
        assert!(bridge.find("Living Room").is_some());
        assert!(bridge.find("Garage").is_none());
    }

    #[test]
    fn should_skip_accessory_whose_appliance_kind_changed() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let light = light_appliance(device.id, "off");
        let snapshot = Snapshot {
            devices: vec![device.clone()],
            appliances: vec![light.clone()],
        };
        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();

        // Same appliance id, now reported as a different kind, now "on".
        let mut changed = light;
        changed.kind = ApplianceKind::Television;
        if let Some(state) = changed.light.as_mut() {
            state.power = "on".to_string();
        }
        let next = Snapshot {
            devices: vec![device],
            appliances: vec![changed],
        };
        bridge.update_all(&next).unwrap();

        let light_accessory = bridge.find("Ceiling Light").unwrap();
        let characteristics = light_accessory.characteristics();
        assert_eq!(characteristics[0], ("On", serde_json::json!(false)));
    }

    #[test]
    fn should_update_resolved_accessories_and_skip_unresolved_ones() {
        let bus = EventBus::new(16);
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let light = light_appliance(device.id, "off");
        let snapshot = Snapshot {
            devices: vec![device.clone()],
            appliances: vec![light.clone()],
        };
        let bridge = Bridge::from_snapshot(&api(), &bus, "Tester", &snapshot).unwrap();

        // Light disappears from the snapshot; sensor keeps updating.
        let mut warmer = device;
        warmer
            .readings
            .insert(SensorKind::Temperature, crate::test_support::reading(25.0));
        let next = Snapshot {
            devices: vec![warmer],
            appliances: Vec::new(),
        };
        bridge.update_all(&next).unwrap();

        let sensor = bridge.find("Living Room").unwrap();
        assert_eq!(
            sensor.characteristics()[0],
            ("CurrentTemperature", serde_json::json!(25.0))
        );
        let light_accessory = bridge.find("Ceiling Light").unwrap();
        assert_eq!(
            light_accessory.characteristics()[0],
            ("On", serde_json::json!(false))
        );
    }
}
