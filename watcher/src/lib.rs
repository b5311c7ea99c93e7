//! Command line host for the telemetry viewer: the same dashboard core as
//! the browser, driven by tokio and reporting through `tracing`.

pub mod config;
pub mod console;
pub mod driver;

pub use config::load_config;
pub use console::{ConsoleCharts, TracingView};
pub use driver::TokioDriver;
