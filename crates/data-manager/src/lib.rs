//! Data Manager crate for the telemetry viewer
//! Handles everything between the raw API bodies and the per-tag series:
//! fetching, sample validation, bounded series storage and the tag registry.

pub mod fetcher;
pub mod sample_parser;
pub mod series_store;
pub mod tag_registry;

#[cfg(not(target_arch = "wasm32"))]
pub mod http_client;
#[cfg(target_arch = "wasm32")]
pub mod wasm_fetch;

pub use fetcher::{ApiClient, HttpResponse, HttpTransport};
pub use sample_parser::{parse_sample, SampleRejection};
pub use series_store::{Series, SeriesStore};
pub use tag_registry::TagRegistry;

#[cfg(not(target_arch = "wasm32"))]
pub use http_client::ReqwestTransport;
#[cfg(target_arch = "wasm32")]
pub use wasm_fetch::FetchClient;
