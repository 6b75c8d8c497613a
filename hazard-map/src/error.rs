//! Error types used by the crate.

use bytes::Bytes;
use hazard_map_types::error::HazardMapTypesError;
use thiserror::Error;

/// Hazard map error type.
#[derive(Debug, Error)]
pub enum HazardMapError {
    /// I/O error (network failure, connection refused, etc).
    #[error("failed to load data")]
    IO,
    /// The server responded with a non-OK status.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, if any.
        body: Bytes,
    },
    /// Error decoding data.
    #[error("failed to decode data: {0}")]
    Decoding(String),
    /// Invalid feature geometry.
    #[error(transparent)]
    Geometry(#[from] HazardMapTypesError),
    /// Error interacting with WASM runtime.
    #[error("wasm error: {0:?}")]
    Wasm(Option<String>),
    /// User input did not pass validation. The message is meant to be shown to the user as is.
    #[error("{0}")]
    Validation(String),
    /// An upload was submitted while another one is still in progress.
    #[error("an upload is already in progress")]
    UploadInProgress,
    /// An upload was submitted before the result of the previous one was dismissed.
    #[error("the result of the previous upload must be dismissed first")]
    UploadNotDismissed,
}

impl HazardMapError {
    /// Extracts the `error` message from a JSON error body returned by the server, if there is one.
    pub fn server_message(&self) -> Option<String> {
        let Self::Status { body, .. } = self else {
            return None;
        };

        let value: serde_json::Value = serde_json::from_slice(body).ok()?;
        value.get("error")?.as_str().map(str::to_string)
    }
}

impl From<serde_json::Error> for HazardMapError {
    fn from(value: serde_json::Error) -> Self {
        Self::Decoding(value.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl From<reqwest::Error> for HazardMapError {
    fn from(value: reqwest::Error) -> Self {
        log::debug!("HTTP client error: {value}");
        Self::IO
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for HazardMapError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        HazardMapError::Wasm(Some(format!("{value:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_is_read_from_body() {
        let error = HazardMapError::Status {
            status: 400,
            body: Bytes::from_static(br#"{"error": "bad format"}"#),
        };
        assert_eq!(error.server_message().as_deref(), Some("bad format"));

        let error = HazardMapError::Status {
            status: 502,
            body: Bytes::from_static(b"<html>Bad gateway</html>"),
        };
        assert_eq!(error.server_message(), None);
        assert_eq!(HazardMapError::IO.server_message(), None);
    }
}
