//! Viewer configuration shared by the browser and native hosts

use serde::{Deserialize, Serialize};

/// Default poll period in milliseconds
pub const DEFAULT_POLL_INTERVAL_MS: u32 = 1000;

/// Default number of samples kept per tag
pub const DEFAULT_MAX_POINTS: usize = 100;

/// How long a transient error stays visible
pub const DEFAULT_ERROR_DISPLAY_MS: u32 = 10_000;

/// Intervals below this hammer the API; accepted but warned about
pub const MIN_RECOMMENDED_POLL_INTERVAL_MS: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Root URL of the data API, e.g. `http://localhost:8080`
    pub endpoint: String,
    pub poll_interval_ms: u32,
    pub max_points: usize,
    pub error_display_ms: u32,
    pub log_level: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_points: DEFAULT_MAX_POINTS,
            error_display_ms: DEFAULT_ERROR_DISPLAY_MS,
            log_level: "info".to_string(),
        }
    }
}

/// Config validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ViewerConfig {
    /// Trimmed endpoint without trailing slashes, `None` when blank
    pub fn endpoint_base(&self) -> Option<String> {
        normalize_endpoint(&self.endpoint)
    }

    pub fn set_endpoint(&mut self, endpoint: &str) {
        self.endpoint = endpoint.trim().to_string();
    }

    /// Set the poll interval from user input, falling back to the default
    /// when the input is not a positive integer.
    pub fn set_poll_interval_input(&mut self, input: &str) {
        self.poll_interval_ms = parse_poll_interval(input);
    }

    pub fn validate(&self) -> ConfigValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.endpoint_base().is_none() {
            warnings.push("No API URL configured".to_string());
        } else if !self.endpoint.contains("://") {
            warnings.push(format!(
                "API URL '{}' has no scheme, requests will be relative",
                self.endpoint
            ));
        }

        if self.poll_interval_ms == 0 {
            errors.push("Poll interval must be greater than zero".to_string());
        } else if self.poll_interval_ms < MIN_RECOMMENDED_POLL_INTERVAL_MS {
            warnings.push(format!(
                "Poll interval very small: {} ms (min recommended: {} ms)",
                self.poll_interval_ms, MIN_RECOMMENDED_POLL_INTERVAL_MS
            ));
        }

        if self.max_points == 0 {
            errors.push("max_points must be greater than zero".to_string());
        }

        if self.log_level.parse::<log::LevelFilter>().is_err() {
            errors.push(format!("Unknown log level '{}'", self.log_level));
        }

        ConfigValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Trim the endpoint and drop trailing slashes so `{base}/tags` is well formed.
pub fn normalize_endpoint(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a poll interval typed by the user; zero or garbage means default.
pub fn parse_poll_interval(input: &str) -> u32 {
    match input.trim().parse::<u32>() {
        Ok(ms) if ms > 0 => ms,
        _ => DEFAULT_POLL_INTERVAL_MS,
    }
}
