//! Connection status and the transient error banner

use crate::poll_loop::TickOutcome;
use serde::Serialize;
use shared_types::config::DEFAULT_ERROR_DISPLAY_MS;
use shared_types::{ConnectionStatus, ViewerError};

pub const LABEL_POLLING: &str = "Polling...";
pub const LABEL_ENDPOINT_REQUIRED: &str = "API URL required";
pub const LABEL_NO_TAGS: &str = "No tags selected";
pub const LABEL_CONNECTED: &str = "Connected";
pub const LABEL_CONNECTION_ERROR: &str = "Connection Error";
pub const LABEL_STOPPED: &str = "Stopped";
pub const LABEL_TESTING: &str = "Testing...";
pub const LABEL_TEST_OK: &str = "Connection OK";
pub const LABEL_TEST_FAILED: &str = "Connection Failed";

/// Status for a tick outcome; `None` when the outcome must not touch it
pub fn derive_status(outcome: &TickOutcome) -> Option<ConnectionStatus> {
    match outcome {
        TickOutcome::MissingEndpoint => {
            Some(ConnectionStatus::disconnected(LABEL_ENDPOINT_REQUIRED))
        }
        TickOutcome::Idle => Some(ConnectionStatus::disconnected(LABEL_NO_TAGS)),
        TickOutcome::Healthy { .. } => Some(ConnectionStatus::connected(LABEL_CONNECTED)),
        TickOutcome::Degraded { .. } => {
            Some(ConnectionStatus::disconnected(LABEL_CONNECTION_ERROR))
        }
        TickOutcome::Stale | TickOutcome::NotRunning => None,
    }
}

/// Banner text an outcome raises, if any
pub fn banner_message(outcome: &TickOutcome) -> Option<String> {
    match outcome {
        TickOutcome::MissingEndpoint => Some(ViewerError::MissingEndpoint.to_string()),
        TickOutcome::Degraded { .. } => {
            let names: Vec<&str> = outcome.failed_tags().iter().map(|t| t.as_str()).collect();
            Some(format!("Failed to fetch data for: {}", names.join(", ")))
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub message: String,
    pub raised_at_ms: i64,
    /// Bumped on every raise so a timer for an older banner cannot hide a
    /// newer one
    pub generation: u64,
}

/// How the banner changed after an update
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BannerChange {
    Raised(Banner),
    Cleared,
    Unchanged,
}

#[derive(Debug, Clone)]
pub struct StatusReporter {
    status: ConnectionStatus,
    banner: Option<Banner>,
    generation: u64,
    display_ms: u32,
}

impl Default for StatusReporter {
    fn default() -> Self {
        Self::new(DEFAULT_ERROR_DISPLAY_MS)
    }
}

impl StatusReporter {
    pub fn new(display_ms: u32) -> Self {
        Self {
            status: ConnectionStatus::default(),
            banner: None,
            generation: 0,
            display_ms,
        }
    }

    pub fn status(&self) -> &ConnectionStatus {
        &self.status
    }

    pub fn display_ms(&self) -> u32 {
        self.display_ms
    }

    pub fn set_status(&mut self, status: ConnectionStatus) {
        if status != self.status {
            log::debug!("Status: {} ({})", status.label, status.state.as_str());
        }
        self.status = status;
    }

    /// Show `message`, replacing any current banner and restarting its window
    pub fn raise(&mut self, message: impl Into<String>, now_ms: i64) -> Banner {
        self.generation += 1;
        let banner = Banner {
            message: message.into(),
            raised_at_ms: now_ms,
            generation: self.generation,
        };
        self.banner = Some(banner.clone());
        banner
    }

    /// Returns true if a banner was showing
    pub fn clear(&mut self) -> bool {
        self.banner.take().is_some()
    }

    /// Banner still inside its display window at `now_ms`
    pub fn banner_at(&self, now_ms: i64) -> Option<&Banner> {
        self.banner
            .as_ref()
            .filter(|b| now_ms - b.raised_at_ms < i64::from(self.display_ms))
    }

    /// Apply a tick outcome to status and banner
    pub fn apply_outcome(&mut self, outcome: &TickOutcome, now_ms: i64) -> BannerChange {
        let Some(status) = derive_status(outcome) else {
            return BannerChange::Unchanged;
        };
        self.set_status(status);

        if let Some(message) = banner_message(outcome) {
            return BannerChange::Raised(self.raise(message, now_ms));
        }
        if matches!(outcome, TickOutcome::Healthy { .. }) && self.clear() {
            return BannerChange::Cleared;
        }
        BannerChange::Unchanged
    }
}
