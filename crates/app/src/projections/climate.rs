//! Climate projection — thermostat-style surface over a cloud air
//! conditioner.

use std::sync::Arc;

use remobridge_domain::accessory::{HeatingCoolingState, TemperatureDisplayUnit};
use remobridge_domain::appliance::{AirconState, ApplianceKind, RemoteAppliance};
use remobridge_domain::device::RemoteDevice;
use remobridge_domain::error::{BridgeError, MappingError};
use remobridge_domain::id::{ApplianceId, DeviceId};
use remobridge_domain::mapping::climate::{self, View};
use remobridge_domain::mapping::temperature;

use crate::characteristic::Characteristic;
use crate::event_bus::EventBus;
use crate::ports::{AirconSettingsUpdate, RemoteApi};
use crate::projections::{reject_write, value_as_f64, value_as_u8};

const READ_ONLY: &[&str] = &[
    "CurrentHeatingCoolingState",
    "CurrentTemperature",
    "TemperatureDisplayUnits",
];

/// Local projection of one climate appliance.
pub struct ClimateProjection<A> {
    name: String,
    api: Arc<A>,
    device_id: DeviceId,
    appliance_id: ApplianceId,
    /// Native display unit, fixed at construction. The remote protocol
    /// offers no way to change a running appliance's display unit.
    unit: TemperatureDisplayUnit,
    current_state: Characteristic<HeatingCoolingState>,
    target_state: Characteristic<HeatingCoolingState>,
    current_temperature: Characteristic<f64>,
    target_temperature: Characteristic<f64>,
    display_unit: Characteristic<TemperatureDisplayUnit>,
}

impl<A: RemoteApi> ClimateProjection<A> {
    /// Build the projection from the construction-time snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the appliance carries values outside
    /// the supported climate vocabulary or lacks its climate sub-record.
    pub fn new(
        bus: &EventBus,
        api: Arc<A>,
        device: &RemoteDevice,
        appliance: &RemoteAppliance,
    ) -> Result<Self, MappingError> {
        let aircon = require_aircon(appliance)?;
        let unit = temperature::parse_unit(&aircon.unit)?;
        let settings = &aircon.settings;
        let name = appliance.nickname.clone();

        let current_state = Characteristic::new(
            bus.clone(),
            name.clone(),
            "CurrentHeatingCoolingState",
            climate::to_heating_cooling(&settings.mode, &settings.button, View::Current)?,
        );
        let target_state = Characteristic::new(
            bus.clone(),
            name.clone(),
            "TargetHeatingCoolingState",
            climate::to_heating_cooling(&settings.mode, &settings.button, View::Target)?,
        );
        let current_temperature = Characteristic::new(
            bus.clone(),
            name.clone(),
            "CurrentTemperature",
            device.temperature()?,
        );
        let target_temperature = Characteristic::new(
            bus.clone(),
            name.clone(),
            "TargetTemperature",
            temperature::to_local(&settings.temperature, unit)?,
        );
        let display_unit =
            Characteristic::new(bus.clone(), name.clone(), "TemperatureDisplayUnits", unit);

        Ok(Self {
            name,
            api,
            device_id: device.id,
            appliance_id: appliance.id,
            unit,
            current_state,
            target_state,
            current_temperature,
            target_temperature,
            display_unit,
        })
    }

    /// Accessory display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Backing device id.
    #[must_use]
    pub fn device_id(&self) -> DeviceId {
        self.device_id
    }

    /// Backing appliance id (the join key).
    #[must_use]
    pub fn appliance_id(&self) -> ApplianceId {
        self.appliance_id
    }

    /// Push freshly fetched remote state into the characteristics.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when the snapshot carries values outside
    /// the supported vocabulary.
    pub fn update(
        &self,
        device: &RemoteDevice,
        appliance: &RemoteAppliance,
    ) -> Result<(), MappingError> {
        let aircon = require_aircon(appliance)?;
        let settings = &aircon.settings;

        self.current_state.set(climate::to_heating_cooling(
            &settings.mode,
            &settings.button,
            View::Current,
        )?);
        self.target_state.set(climate::to_heating_cooling(
            &settings.mode,
            &settings.button,
            View::Target,
        )?);
        self.current_temperature.set(device.temperature()?);
        self.target_temperature
            .set(temperature::to_local(&settings.temperature, self.unit)?);
        Ok(())
    }

    /// Target heating/cooling state setter.
    ///
    /// The local target write is accepted regardless of the remote outcome.
    /// On remote success the current state is echoed optimistically from
    /// the issued command so the UI is consistent before the next poll; on
    /// remote failure the error is logged and the current state left
    /// untouched (no rollback).
    ///
    /// # Errors
    ///
    /// Returns [`MappingError`] when `value` is outside the
    /// heating/cooling domain.
    pub async fn set_target_state(&self, value: u8) -> Result<(), MappingError> {
        let state = HeatingCoolingState::try_from(value)?;
        self.target_state.set(state);

        let command = climate::to_aircon_command(state);
        let update = AirconSettingsUpdate {
            operation_mode: command.operation_mode.map(str::to_string),
            button: Some(command.button.to_string()),
            temperature: None,
        };
        if let Err(err) = self
            .api
            .update_aircon_settings(self.appliance_id, update)
            .await
        {
            tracing::warn!(
                %err,
                accessory = %self.name,
                appliance_id = %self.appliance_id,
                "target state write failed, current state left untouched"
            );
            return Ok(());
        }

        self.current_state.set(climate::echo_current(command)?);
        Ok(())
    }

    /// Target temperature setter. Remote failure is logged only.
    pub async fn set_target_temperature(&self, value: f64) {
        self.target_temperature.set(value);

        let update = AirconSettingsUpdate {
            temperature: Some(temperature::to_remote(value, self.unit)),
            ..AirconSettingsUpdate::default()
        };
        if let Err(err) = self
            .api
            .update_aircon_settings(self.appliance_id, update)
            .await
        {
            tracing::warn!(
                %err,
                accessory = %self.name,
                appliance_id = %self.appliance_id,
                "target temperature write failed"
            );
        }
    }

    /// Dispatch a transport-initiated characteristic write.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] for unknown, read-only, or out-of-domain
    /// writes.
    pub async fn write(
        &self,
        characteristic: &str,
        value: &serde_json::Value,
    ) -> Result<(), BridgeError> {
        match characteristic {
            "TargetHeatingCoolingState" => {
                let raw = value_as_u8("TargetHeatingCoolingState", value)?;
                self.set_target_state(raw).await?;
                Ok(())
            }
            "TargetTemperature" => {
                let celsius = value_as_f64("TargetTemperature", value)?;
                self.set_target_temperature(celsius).await;
                Ok(())
            }
            other => Err(reject_write(READ_ONLY, other).into()),
        }
    }

    /// Current characteristic values.
    #[must_use]
    pub fn characteristics(&self) -> Vec<(&'static str, serde_json::Value)> {
        vec![
            (
                self.current_state.kind(),
                serde_json::Value::from(self.current_state.get().as_u8()),
            ),
            (
                self.target_state.kind(),
                serde_json::Value::from(self.target_state.get().as_u8()),
            ),
            (
                self.current_temperature.kind(),
                serde_json::Value::from(self.current_temperature.get()),
            ),
            (
                self.target_temperature.kind(),
                serde_json::Value::from(self.target_temperature.get()),
            ),
            (
                self.display_unit.kind(),
                serde_json::Value::from(self.display_unit.get().as_u8()),
            ),
        ]
    }

    #[cfg(test)]
    pub(crate) fn current_state(&self) -> HeatingCoolingState {
        self.current_state.get()
    }

    #[cfg(test)]
    pub(crate) fn target_state(&self) -> HeatingCoolingState {
        self.target_state.get()
    }

    #[cfg(test)]
    pub(crate) fn target_temperature(&self) -> f64 {
        self.target_temperature.get()
    }
}

fn require_aircon(appliance: &RemoteAppliance) -> Result<&AirconState, MappingError> {
    appliance
        .aircon
        .as_ref()
        .ok_or(MappingError::MissingApplianceState {
            appliance_id: appliance.id,
            kind: ApplianceKind::Aircon,
        })
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::test_support::{RecordedCall, RecordingApi, aircon_appliance, device_with};
    use remobridge_domain::device::SensorKind;
    use remobridge_domain::error::WriteError;

    fn projection(
        mode: &str,
        button: &str,
        temp: &str,
        unit: &str,
    ) -> (ClimateProjection<RecordingApi>, Arc<RecordingApi>) {
        let bus = EventBus::new(16);
        let api = Arc::new(RecordingApi::default());
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let appliance = aircon_appliance(device.id, mode, button, temp, unit);
        let projection =
            ClimateProjection::new(&bus, Arc::clone(&api), &device, &appliance).unwrap();
        (projection, api)
    }

    #[test]
    fn should_map_auto_mode_to_auto_target_and_cool_current() {
        let (projection, _) = projection("auto", "", "25", "c");
        assert_eq!(projection.target_state(), HeatingCoolingState::Auto);
        assert_eq!(projection.current_state(), HeatingCoolingState::Cool);
    }

    #[test]
    fn should_convert_fahrenheit_target_temperature_at_construction() {
        let (projection, _) = projection("cool", "", "75", "f");
        assert!((projection.target_temperature() - 23.9).abs() < 1e-9);
    }

    #[test]
    fn should_fail_construction_for_unknown_unit() {
        let bus = EventBus::new(4);
        let api = Arc::new(RecordingApi::default());
        let device = device_with(&[(SensorKind::Temperature, 21.5)]);
        let appliance = aircon_appliance(device.id, "cool", "", "25", "k");
        assert!(matches!(
            ClimateProjection::new(&bus, api, &device, &appliance),
            Err(MappingError::UnknownUnit { .. })
        ));
    }

    #[tokio::test]
    async fn should_send_mode_and_echo_current_state_on_target_write() {
        let (projection, api) = projection("cool", "", "25", "c");

        projection.set_target_state(1).await.unwrap();

        assert_eq!(projection.target_state(), HeatingCoolingState::Heat);
        assert_eq!(projection.current_state(), HeatingCoolingState::Heat);
        assert_eq!(
            api.recorded(),
            vec![RecordedCall::UpdateAircon {
                appliance_id: projection.appliance_id(),
                update: AirconSettingsUpdate {
                    operation_mode: Some("warm".to_string()),
                    button: Some(String::new()),
                    temperature: None,
                },
            }]
        );
    }

    #[tokio::test]
    async fn should_echo_cool_when_auto_target_succeeds() {
        let (projection, _) = projection("cool", "", "25", "c");
        projection.set_target_state(3).await.unwrap();
        assert_eq!(projection.target_state(), HeatingCoolingState::Auto);
        assert_eq!(projection.current_state(), HeatingCoolingState::Cool);
    }

    #[tokio::test]
    async fn should_send_power_off_button_for_off_target() {
        let (projection, api) = projection("cool", "", "25", "c");
        projection.set_target_state(0).await.unwrap();
        assert_eq!(
            api.recorded(),
            vec![RecordedCall::UpdateAircon {
                appliance_id: projection.appliance_id(),
                update: AirconSettingsUpdate {
                    operation_mode: None,
                    button: Some("power-off".to_string()),
                    temperature: None,
                },
            }]
        );
    }

    #[tokio::test]
    async fn should_accept_target_write_but_keep_current_state_on_remote_failure() {
        let (projection, api) = projection("cool", "", "25", "c");
        api.fail_commands.store(true, Ordering::SeqCst);

        projection.set_target_state(1).await.unwrap();

        assert_eq!(projection.target_state(), HeatingCoolingState::Heat);
        assert_eq!(projection.current_state(), HeatingCoolingState::Cool);
        assert!(api.recorded().is_empty());
    }

    #[tokio::test]
    async fn should_reject_target_state_outside_domain() {
        let (projection, api) = projection("cool", "", "25", "c");
        assert!(projection.set_target_state(4).await.is_err());
        assert!(api.recorded().is_empty());
    }

    #[tokio::test]
    async fn should_round_target_temperature_to_native_whole_degrees() {
        let (projection, api) = projection("cool", "", "75", "f");

        projection.set_target_temperature(24.0).await;

        assert_eq!(
            api.recorded(),
            vec![RecordedCall::UpdateAircon {
                appliance_id: projection.appliance_id(),
                update: AirconSettingsUpdate {
                    operation_mode: None,
                    button: None,
                    temperature: Some("75".to_string()),
                },
            }]
        );
    }

    #[tokio::test]
    async fn should_keep_local_target_temperature_on_remote_failure() {
        let (projection, api) = projection("cool", "", "25", "c");
        api.fail_commands.store(true, Ordering::SeqCst);

        projection.set_target_temperature(22.5).await;

        assert!((projection.target_temperature() - 22.5).abs() < 1e-9);
        assert!(api.recorded().is_empty());
    }

    #[test]
    fn should_apply_snapshot_values_on_update() {
        let (projection, _) = projection("cool", "", "25", "c");
        let device = {
            let mut d = device_with(&[(SensorKind::Temperature, 18.0)]);
            d.id = projection.device_id();
            d
        };
        let mut appliance = aircon_appliance(device.id, "warm", "", "27", "c");
        appliance.id = projection.appliance_id();

        projection.update(&device, &appliance).unwrap();

        assert_eq!(projection.current_state(), HeatingCoolingState::Heat);
        assert_eq!(projection.target_state(), HeatingCoolingState::Heat);
        assert!((projection.target_temperature() - 27.0).abs() < 1e-9);
    }

    #[test]
    fn should_fail_update_for_unknown_mode() {
        let (projection, _) = projection("cool", "", "25", "c");
        let device = device_with(&[(SensorKind::Temperature, 18.0)]);
        let appliance = aircon_appliance(device.id, "turbo", "", "27", "c");
        assert!(matches!(
            projection.update(&device, &appliance),
            Err(MappingError::UnknownMode { .. })
        ));
    }

    #[tokio::test]
    async fn should_reject_write_to_read_only_characteristic() {
        let (projection, _) = projection("cool", "", "25", "c");
        let result = projection
            .write("TemperatureDisplayUnits", &serde_json::json!(0))
            .await;
        assert!(matches!(
            result,
            Err(BridgeError::Write(WriteError::ReadOnly { .. }))
        ));
    }
}
