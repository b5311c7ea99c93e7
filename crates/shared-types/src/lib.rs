//! Shared types for the telemetry viewer
//!
//! This crate contains the types that are shared between the data-manager,
//! renderer, system-integration and host crates: tags, samples, colours,
//! connection status, configuration and the common error type.

pub mod config;
pub mod data_types;
pub mod errors;
pub mod status;

pub use config::{ConfigValidationResult, ViewerConfig};
pub use data_types::{Color, Sample, Tag, PALETTE};
pub use errors::{ViewerError, ViewerResult};
pub use status::{ConnectionState, ConnectionStatus};

/// Current wall-clock time in epoch milliseconds.
///
/// Backed by `chrono`, which reads `Date.now()` on wasm32.
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
