//! Shared fixture builders and a recording cloud-API double for tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use remobridge_domain::appliance::{
    AirconSettings, AirconState, ApplianceKind, LightState, RemoteAppliance,
};
use remobridge_domain::device::{RemoteDevice, SensorKind, SensorReading};
use remobridge_domain::error::RemoteError;
use remobridge_domain::id::{ApplianceId, DeviceId};
use remobridge_domain::user::RemoteUser;

use crate::ports::{AirconSettingsUpdate, RemoteApi};

pub(crate) fn reading(value: f64) -> SensorReading {
    SensorReading {
        value,
        observed_at: chrono::Utc::now(),
    }
}

pub(crate) fn device_with(readings: &[(SensorKind, f64)]) -> RemoteDevice {
    RemoteDevice {
        id: DeviceId::new(),
        name: "Living Room".to_string(),
        readings: readings
            .iter()
            .map(|&(kind, value)| (kind, reading(value)))
            .collect(),
    }
}

pub(crate) fn aircon_appliance(
    device_id: DeviceId,
    mode: &str,
    button: &str,
    temperature: &str,
    unit: &str,
) -> RemoteAppliance {
    RemoteAppliance {
        id: ApplianceId::new(),
        kind: ApplianceKind::Aircon,
        nickname: "Bedroom AC".to_string(),
        device_id,
        aircon: Some(AirconState {
            settings: AirconSettings {
                mode: mode.to_string(),
                button: button.to_string(),
                temperature: temperature.to_string(),
            },
            unit: unit.to_string(),
        }),
        light: None,
    }
}

pub(crate) fn light_appliance(device_id: DeviceId, power: &str) -> RemoteAppliance {
    RemoteAppliance {
        id: ApplianceId::new(),
        kind: ApplianceKind::Light,
        nickname: "Ceiling Light".to_string(),
        device_id,
        aircon: None,
        light: Some(LightState {
            power: power.to_string(),
        }),
    }
}

pub(crate) fn tv_appliance(device_id: DeviceId) -> RemoteAppliance {
    RemoteAppliance {
        id: ApplianceId::new(),
        kind: ApplianceKind::Television,
        nickname: "Living Room TV".to_string(),
        device_id,
        aircon: None,
        light: None,
    }
}

/// Commands observed by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RecordedCall {
    UpdateAircon {
        appliance_id: ApplianceId,
        update: AirconSettingsUpdate,
    },
    TvSignal {
        appliance_id: ApplianceId,
        button: String,
    },
    LightSignal {
        appliance_id: ApplianceId,
        button: String,
    },
}

/// In-memory cloud API double: serves configured inventories, records every
/// command, and fails on demand.
#[derive(Default)]
pub(crate) struct RecordingApi {
    pub devices: Mutex<Vec<RemoteDevice>>,
    pub appliances: Mutex<Vec<RemoteAppliance>>,
    pub calls: Mutex<Vec<RecordedCall>>,
    pub fail_fetch: AtomicBool,
    pub fail_commands: AtomicBool,
    pub device_fetches: AtomicUsize,
    pub appliance_fetches: AtomicUsize,
}

impl RecordingApi {
    pub fn with_inventory(
        devices: Vec<RemoteDevice>,
        appliances: Vec<RemoteAppliance>,
    ) -> Self {
        Self {
            devices: Mutex::new(devices),
            appliances: Mutex::new(appliances),
            ..Self::default()
        }
    }

    pub fn recorded(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn injected_failure() -> RemoteError {
        RemoteError::Api {
            status: 500,
            message: "injected failure".to_string(),
        }
    }
}

impl RemoteApi for RecordingApi {
    async fn get_user(&self) -> Result<RemoteUser, RemoteError> {
        Ok(RemoteUser {
            nickname: "Tester".to_string(),
        })
    }

    async fn get_devices(&self) -> Result<Vec<RemoteDevice>, RemoteError> {
        self.device_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        Ok(self.devices.lock().unwrap().clone())
    }

    async fn get_appliances(&self) -> Result<Vec<RemoteAppliance>, RemoteError> {
        self.appliance_fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        Ok(self.appliances.lock().unwrap().clone())
    }

    async fn update_aircon_settings(
        &self,
        appliance_id: ApplianceId,
        update: AirconSettingsUpdate,
    ) -> Result<(), RemoteError> {
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        self.calls.lock().unwrap().push(RecordedCall::UpdateAircon {
            appliance_id,
            update,
        });
        Ok(())
    }

    async fn send_tv_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> Result<(), RemoteError> {
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        self.calls.lock().unwrap().push(RecordedCall::TvSignal {
            appliance_id,
            button: button.to_string(),
        });
        Ok(())
    }

    async fn send_light_infrared_signal(
        &self,
        appliance_id: ApplianceId,
        button: &str,
    ) -> Result<(), RemoteError> {
        if self.fail_commands.load(Ordering::SeqCst) {
            return Err(Self::injected_failure());
        }
        self.calls.lock().unwrap().push(RecordedCall::LightSignal {
            appliance_id,
            button: button.to_string(),
        });
        Ok(())
    }
}
