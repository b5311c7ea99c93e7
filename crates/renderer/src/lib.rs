//! Line chart rendering for the telemetry viewer
//!
//! Charts are described as a [`scene::Scene`] of draw commands built from
//! the plotted labels and values. On the web the scene is replayed on a
//! Canvas 2D context; elsewhere it is only built, which is what the tests
//! exercise.

pub mod drawables;
pub mod formatting;
pub mod layout;
pub mod scene;
pub mod style;

#[cfg(target_arch = "wasm32")]
pub mod canvas_chart;

pub use formatting::{format_tick_label, format_tooltip_title, format_value};
pub use scene::{build_scene, ChartModel, DrawCommand, Scene};
pub use style::ChartStyle;

#[cfg(target_arch = "wasm32")]
pub use canvas_chart::CanvasChart;
