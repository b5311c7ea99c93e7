//! Common error types used across all telemetry viewer crates
//! Provides consistent error handling and reporting

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Base error type for all viewer operations
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "details")]
pub enum ViewerError {
    // Configuration errors, surfaced before any request is made
    #[error("Please enter an API URL")]
    MissingEndpoint,

    #[error("Please select at least one tag to monitor")]
    NoTagsSelected,

    #[error("Invalid configuration for {field}: {message}")]
    InvalidConfig { field: String, message: String },

    // Transport errors
    #[error("HTTP {status}: {status_text}")]
    Http { status: u16, status_text: String },

    #[error("Network request failed: {message}")]
    Network { message: String },

    // Data errors
    #[error("Invalid JSON response: {message}")]
    InvalidJson { message: String },

    #[error("Invalid data format: expected {expected} but got {actual}")]
    InvalidFormat { expected: String, actual: String },

    // Host errors
    #[error("Chart error: {message}")]
    Chart { message: String },

    #[error("JavaScript interop error: {message}")]
    JsInterop { message: String },
}

impl ViewerError {
    /// True for errors raised before anything touched the network
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            ViewerError::MissingEndpoint
                | ViewerError::NoTagsSelected
                | ViewerError::InvalidConfig { .. }
        )
    }
}

/// Result type alias for viewer operations
pub type ViewerResult<T> = Result<T, ViewerError>;

impl From<serde_json::Error> for ViewerError {
    fn from(err: serde_json::Error) -> Self {
        ViewerError::InvalidJson {
            message: err.to_string(),
        }
    }
}

#[cfg(feature = "wasm")]
impl From<wasm_bindgen::JsValue> for ViewerError {
    fn from(err: wasm_bindgen::JsValue) -> Self {
        ViewerError::JsInterop {
            message: err.as_string().unwrap_or_else(|| format!("{err:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(
            ViewerError::MissingEndpoint.to_string(),
            "Please enter an API URL"
        );
        let http = ViewerError::Http {
            status: 503,
            status_text: "Service Unavailable".to_string(),
        };
        assert_eq!(http.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_error_serialization() {
        let error = ViewerError::Network {
            message: "connection refused".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("Network"));
        assert!(json.contains("connection refused"));
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<Vec<String>>("not json").unwrap_err();
        let viewer_err: ViewerError = err.into();
        assert!(matches!(viewer_err, ViewerError::InvalidJson { .. }));
        assert!(!viewer_err.is_configuration());
        assert!(ViewerError::NoTagsSelected.is_configuration());
    }
}
