//! Connection status shown in the status badge

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

impl ConnectionState {
    /// CSS class used on the status dot
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionState::Disconnected => "disconnected",
            ConnectionState::Connecting => "connecting",
            ConnectionState::Connected => "connected",
        }
    }
}

/// Connection state plus the human readable label next to it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStatus {
    pub state: ConnectionState,
    pub label: String,
}

impl ConnectionStatus {
    pub fn new(state: ConnectionState, label: impl Into<String>) -> Self {
        Self {
            state,
            label: label.into(),
        }
    }

    pub fn disconnected(label: impl Into<String>) -> Self {
        Self::new(ConnectionState::Disconnected, label)
    }

    pub fn connecting(label: impl Into<String>) -> Self {
        Self::new(ConnectionState::Connecting, label)
    }

    pub fn connected(label: impl Into<String>) -> Self {
        Self::new(ConnectionState::Connected, label)
    }
}

impl Default for ConnectionStatus {
    fn default() -> Self {
        Self::disconnected("Ready")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_status() {
        let status = ConnectionStatus::default();
        assert_eq!(status.state, ConnectionState::Disconnected);
        assert_eq!(status.label, "Ready");
    }

    #[test]
    fn test_state_serializes_lowercase() {
        let json = serde_json::to_string(&ConnectionStatus::connected("Connected")).unwrap();
        assert_eq!(json, r#"{"state":"connected","label":"Connected"}"#);
    }
}
