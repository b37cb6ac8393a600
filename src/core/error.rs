use std::io;
use thiserror::Error;

/// Unified error type for tmap
#[derive(Error, Debug)]
pub enum TmapError {
    /// Geocoder returned no usable candidate
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// Routing call failed or returned no usable feature
    #[error("Route unavailable: {0}")]
    RouteUnavailable(String),

    /// Transport-level failures, including timeouts
    #[error("Network error: {0}")]
    Network(String),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// User input errors
    #[error("Input error: {0}")]
    Input(String),

    /// IO-related errors
    #[error("IO error: {source}")]
    Io {
        #[from]
        source: io::Error,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl TmapError {
    /// Whether this error came from the transport rather than the service's answer.
    pub fn is_network(&self) -> bool {
        matches!(self, TmapError::Network(_))
    }
}

impl From<reqwest::Error> for TmapError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TmapError::Network(format!("Request timed out: {}", err))
        } else if err.is_connect() {
            TmapError::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            TmapError::Serialization(format!("Unexpected response body: {}", err))
        } else {
            TmapError::Network(format!("Request failed: {}", err))
        }
    }
}

impl From<serde_json::Error> for TmapError {
    fn from(err: serde_json::Error) -> Self {
        TmapError::Serialization(format!("JSON error: {}", err))
    }
}

impl From<serde_yml::Error> for TmapError {
    fn from(err: serde_yml::Error) -> Self {
        TmapError::Serialization(format!("YAML error: {}", err))
    }
}
