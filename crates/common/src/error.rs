use thiserror::Error;

/// Top-level error type for Waypoint operations.
#[derive(Debug, Error)]
pub enum WaypointError {
    /// Invalid expansion or server configuration. Detected before any
    /// backend call is issued and never retried.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The place-index backend call failed (network, auth, quota,
    /// malformed request). Aborts any in-progress radius expansion.
    #[error("Backend error: {0}")]
    Backend(String),

    /// The backend signalled "no such place" rather than a transport
    /// failure.
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl WaypointError {
    /// Whether this error was produced before reaching the backend.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Result type alias for Waypoint operations.
pub type Result<T> = std::result::Result<T, WaypointError>;
