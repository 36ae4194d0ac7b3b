//! Wire DTOs for the cloud API and their conversion into domain types.
//!
//! Unknown sensor codes and appliance families are tolerated: a payload
//! carrying something this bridge does not project must not fail the whole
//! snapshot.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use remobridge_domain::appliance::{
    AirconSettings, AirconState, ApplianceKind, LightState, RemoteAppliance,
};
use remobridge_domain::device::{RemoteDevice, SensorKind, SensorReading};
use remobridge_domain::id::{ApplianceId, DeviceId};
use remobridge_domain::user::RemoteUser;

#[derive(Debug, Deserialize)]
pub(crate) struct UserDto {
    nickname: String,
}

impl From<UserDto> for RemoteUser {
    fn from(dto: UserDto) -> Self {
        Self {
            nickname: dto.nickname,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceDto {
    id: DeviceId,
    name: String,
    #[serde(default)]
    newest_events: BTreeMap<String, EventDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventDto {
    val: f64,
    created_at: DateTime<Utc>,
}

impl From<DeviceDto> for RemoteDevice {
    fn from(dto: DeviceDto) -> Self {
        let readings = dto
            .newest_events
            .into_iter()
            .filter_map(|(code, event)| {
                let kind = sensor_kind(&code)?;
                Some((
                    kind,
                    SensorReading {
                        value: event.val,
                        observed_at: event.created_at,
                    },
                ))
            })
            .collect();
        Self {
            id: dto.id,
            name: dto.name,
            readings,
        }
    }
}

fn sensor_kind(code: &str) -> Option<SensorKind> {
    match code {
        "te" => Some(SensorKind::Temperature),
        "hu" => Some(SensorKind::Humidity),
        "il" => Some(SensorKind::Illuminance),
        "mo" => Some(SensorKind::Motion),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApplianceDto {
    id: ApplianceId,
    #[serde(rename = "type")]
    kind: ApplianceKind,
    nickname: String,
    device: DeviceRefDto,
    #[serde(default)]
    settings: Option<SettingsDto>,
    #[serde(default)]
    aircon: Option<AirconDto>,
    #[serde(default)]
    light: Option<LightDto>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DeviceRefDto {
    id: DeviceId,
}

#[derive(Debug, Deserialize, Default)]
pub(crate) struct SettingsDto {
    #[serde(default)]
    mode: String,
    #[serde(default)]
    temp: String,
    #[serde(default)]
    button: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirconDto {
    #[serde(rename = "tempUnit")]
    temp_unit: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LightDto {
    state: LightStateDto,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LightStateDto {
    power: String,
}

impl From<ApplianceDto> for RemoteAppliance {
    fn from(dto: ApplianceDto) -> Self {
        let aircon = dto.aircon.map(|aircon| {
            let settings = dto.settings.unwrap_or_default();
            AirconState {
                settings: AirconSettings {
                    mode: settings.mode,
                    button: settings.button,
                    temperature: settings.temp,
                },
                unit: aircon.temp_unit,
            }
        });
        let light = dto.light.map(|light| LightState {
            power: light.state.power,
        });
        Self {
            id: dto.id,
            kind: dto.kind,
            nickname: dto.nickname,
            device_id: dto.device.id,
            aircon,
            light,
        }
    }
}
