//! Dashboard core for the telemetry viewer
//!
//! Ties the data manager and renderer together: selection, chart
//! lifecycle, the poll loop and the status reporter, owned by one
//! [`DashboardSession`] and driven through the [`Dashboard`] handle.
//! Hosts plug in at four seams: the HTTP transport, a [`ChartBackend`],
//! a [`DashboardView`] and a [`PollDriver`].

pub mod chart_lifecycle;
pub mod dashboard;
pub mod poll_loop;
pub mod selection;
pub mod session;
pub mod status_reporter;

pub use chart_lifecycle::{ChartBackend, ChartLifecycle};
pub use dashboard::{Dashboard, DashboardView, TagRefresh};
pub use poll_loop::{PollDriver, PollLoop, TagFailure, TagUpdate, TickFn, TickOutcome};
pub use selection::{SelectionState, Toggle};
pub use session::{DashboardSession, DashboardSnapshot};
pub use status_reporter::{Banner, StatusReporter};
