//! JSON REST handlers for accessories.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use remobridge_app::ports::RemoteApi;
use remobridge_app::projections::Projection;

use crate::error::ApiError;
use crate::state::AppState;

/// One accessory, with its current characteristic values.
#[derive(Serialize)]
pub struct AccessoryDto {
    /// Display name, unique within the bridge.
    pub name: String,
    /// Accessory category number.
    pub category: u8,
    /// Characteristic type tag to current value.
    pub characteristics: serde_json::Map<String, serde_json::Value>,
}

impl<A: RemoteApi> From<&Projection<A>> for AccessoryDto {
    fn from(projection: &Projection<A>) -> Self {
        let characteristics = projection
            .characteristics()
            .into_iter()
            .map(|(kind, value)| (kind.to_string(), value))
            .collect();
        Self {
            name: projection.name().to_string(),
            category: projection.category(),
            characteristics,
        }
    }
}

/// Request body for writing a characteristic.
#[derive(Deserialize)]
pub struct WriteRequest {
    /// The new value, in the characteristic's JSON type.
    pub value: serde_json::Value,
}

/// Possible responses from the write endpoint.
pub enum WriteResponse {
    NoContent,
}

impl IntoResponse for WriteResponse {
    fn into_response(self) -> Response {
        match self {
            Self::NoContent => StatusCode::NO_CONTENT.into_response(),
        }
    }
}

/// `GET /api/accessories`
pub async fn list<A>(State(state): State<AppState<A>>) -> Json<Vec<AccessoryDto>>
where
    A: RemoteApi + 'static,
{
    let accessories = state
        .bridge
        .accessories()
        .iter()
        .map(|projection| AccessoryDto::from(projection.as_ref()))
        .collect();
    Json(accessories)
}

/// `GET /api/accessories/:name`
pub async fn get<A>(
    State(state): State<AppState<A>>,
    Path(name): Path<String>,
) -> Result<Json<AccessoryDto>, ApiError>
where
    A: RemoteApi + 'static,
{
    let projection = state
        .bridge
        .find(&name)
        .ok_or_else(|| ApiError::UnknownAccessory(name.clone()))?;
    Ok(Json(AccessoryDto::from(projection.as_ref())))
}

/// `PUT /api/accessories/:name/characteristics/:kind`
///
/// Dispatches the value into the projection. Remote command failures are
/// absorbed below this layer; the errors that surface here are contract
/// violations (unknown tag, read-only target, mistyped or out-of-domain
/// value) and map to client-error statuses.
pub async fn write_characteristic<A>(
    State(state): State<AppState<A>>,
    Path((name, kind)): Path<(String, String)>,
    Json(request): Json<WriteRequest>,
) -> Result<WriteResponse, ApiError>
where
    A: RemoteApi + 'static,
{
    let projection = state
        .bridge
        .find(&name)
        .ok_or_else(|| ApiError::UnknownAccessory(name.clone()))?;
    projection.write(&kind, &request.value).await?;
    Ok(WriteResponse::NoContent)
}
