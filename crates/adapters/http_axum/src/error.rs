//! HTTP error response mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use remobridge_domain::error::{BridgeError, WriteError};

/// JSON error body returned by API endpoints.
#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// Maps bridge failures to an HTTP response with appropriate status code.
pub enum ApiError {
    /// No accessory with the requested name.
    UnknownAccessory(String),
    /// A projection call failed.
    Bridge(BridgeError),
}

impl From<BridgeError> for ApiError {
    fn from(err: BridgeError) -> Self {
        Self::Bridge(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::UnknownAccessory(name) => (
                StatusCode::NOT_FOUND,
                format!("unknown accessory '{name}'"),
            ),
            Self::Bridge(BridgeError::Write(err @ WriteError::UnknownCharacteristic { .. })) => {
                (StatusCode::NOT_FOUND, err.to_string())
            }
            Self::Bridge(BridgeError::Write(err)) => (StatusCode::BAD_REQUEST, err.to_string()),
            Self::Bridge(BridgeError::Mapping(err)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, err.to_string())
            }
            Self::Bridge(BridgeError::Remote(err)) => {
                tracing::error!(%err, "remote API error");
                (StatusCode::BAD_GATEWAY, "remote API error".to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
