//! Cloud adapter error types.

use remobridge_domain::error::RemoteError;

/// Errors specific to the cloud HTTP adapter.
#[derive(Debug, thiserror::Error)]
pub enum CloudError {
    /// The request never produced a response (connect, DNS, timeout).
    #[error("cloud request failed")]
    Transport(#[source] reqwest::Error),

    /// The cloud answered with a non-success status.
    #[error("cloud rejected the request (HTTP {status})")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, truncated.
        body: String,
    },

    /// The response body could not be decoded.
    #[error("cloud returned a malformed payload")]
    Decode(#[source] reqwest::Error),

    /// The configured base URL is invalid.
    #[error("invalid cloud base URL")]
    Url(#[from] url::ParseError),
}

impl CloudError {
    /// Convert into a [`RemoteError`] for propagation across the port
    /// boundary.
    #[must_use]
    pub fn into_remote(self) -> RemoteError {
        match self {
            Self::Status { status, body } => RemoteError::Api {
                status,
                message: body,
            },
            Self::Decode(err) => RemoteError::Decode(Box::new(err)),
            other => RemoteError::Transport(Box::new(other)),
        }
    }
}

impl From<CloudError> for RemoteError {
    fn from(err: CloudError) -> Self {
        err.into_remote()
    }
}
