//! Media projection — television power, mute, and relative volume.
//!
//! The remote protocol only supports one-shot infrared triggers for these,
//! not state queries: the true remote state is unknowable. Local values are
//! write-only best-effort placeholders initialised to an assumed default
//! (inactive, unmuted) and never corrected by polling.

use std::sync::Arc;

use remobridge_domain::accessory::VolumeSelector;
use remobridge_domain::appliance::RemoteAppliance;
use remobridge_domain::error::{BridgeError, MappingError};
use remobridge_domain::id::{ApplianceId, DeviceId};
use remobridge_domain::mapping::volume;

use crate::characteristic::Characteristic;
use crate::event_bus::EventBus;
use crate::ports::RemoteApi;
use crate::projections::{reject_write, value_as_bool, value_as_u8};

const READ_ONLY: &[&str] = &["VolumeControlType"];

/// Volume control type characteristic value: relative only.
const VOLUME_CONTROL_RELATIVE: u8 = 1;

/// Local projection of one infrared-controlled television.
pub struct MediaProjection<A> {
    name: String,
    api: Arc<A>,
    device_id: DeviceId,
    appliance_id: ApplianceId,
    active: Characteristic<u8>,
    mute: Characteristic<bool>,
    volume_control_type: Characteristic<u8>,
}

impl<A: RemoteApi> MediaProjection<A> {
    /// Build the projection with assumed-default values.
    pub fn new(
        bus: &EventBus,
        api: Arc<A>,
        device_id: DeviceId,
        appliance: &RemoteAppliance,
    ) -> Self {
        let name = appliance.nickname.clone();
        // No way to query power or mute; assume inactive and unmuted.
        let active = Characteristic::new(bus.clone(), name.clone(), "Active", 0);
        let mute = Characteristic::new(bus.clone(), name.clone(), "Mute", false);
        let volume_control_type = Characteristic::new(
            bus.clone(),
            name.clone(),
            "VolumeControlType",
            VOLUME_CONTROL_RELATIVE,
        );

        Self {
            name,
            api,
            device_id,
            appliance_id: appliance.id,
            active,
            mute,
            volume_control_type,
        }
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

    /// Polling cannot observe television state; nothing to apply.
    pub fn update(&self) {}

    /// Active setter — fires the power toggle signal.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::ValueOutOfDomain`] for values other than
    /// 0 or 1.
    pub async fn set_active(&self, value: u8) -> Result<(), MappingError> {
        if value > 1 {
            return Err(MappingError::ValueOutOfDomain {
                characteristic: "Active",
                value,
            });
        }
        self.active.set(value);
        self.send("power").await;
        Ok(())
    }

    /// Mute setter — fires the mute toggle signal.
    pub async fn set_mute(&self, value: bool) {
        self.mute.set(value);
        self.send("mute").await;
    }

    /// Volume step setter — fires a one-shot volume signal; no local value
    /// is retained.
    ///
    /// # Errors
    ///
    /// Returns [`MappingError::ValueOutOfDomain`] for values outside the
    /// volume selector domain.
    pub async fn set_volume(&self, value: u8) -> Result<(), MappingError> {
        let selector = VolumeSelector::try_from(value)?;
        self.send(volume::to_remote(selector)).await;
        Ok(())
    }

    async fn send(&self, button: &str) {
        if let Err(err) = self
            .api
            .send_tv_infrared_signal(self.appliance_id, button)
            .await
        {
            tracing::warn!(
                %err,
                accessory = %self.name,
                appliance_id = %self.appliance_id,
                button,
                "television signal failed"
            );
        }
    }

    /// Dispatch a transport-initiated characteristic write.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError`] for unknown, read-only, mistyped, or
    /// out-of-domain writes.
    pub async fn write(
        &self,
        characteristic: &str,
        value: &serde_json::Value,
    ) -> Result<(), BridgeError> {
        match characteristic {
            "Active" => {
                let raw = value_as_u8("Active", value)?;
                self.set_active(raw).await?;
                Ok(())
            }
            "Mute" => {
                self.set_mute(value_as_bool("Mute", value)?).await;
                Ok(())
            }
            "VolumeSelector" => {
                let raw = value_as_u8("VolumeSelector", value)?;
                self.set_volume(raw).await?;
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
                self.active.kind(),
                serde_json::Value::from(self.active.get()),
            ),
            (self.mute.kind(), serde_json::Value::from(self.mute.get())),
            (
                self.volume_control_type.kind(),
                serde_json::Value::from(self.volume_control_type.get()),
            ),
        ]
    }
}
