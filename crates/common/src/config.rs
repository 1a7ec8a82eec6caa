use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, WaypointError};

/// Top-level server configuration, deserialized from waypoint.toml.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub backend: BackendConfig,
    #[serde(default)]
    pub search: SearchDefaults,
}

/// Place-index backend endpoint and credentials.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the place-index API, e.g. "https://places.example.com".
    pub base_url: String,
    /// API key. Usually left empty in the file and supplied via the
    /// WAYPOINT_API_KEY environment variable.
    #[serde(default)]
    pub api_key: String,
}

/// Default adaptive-search parameters. Individual tool calls may override
/// them per request.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchDefaults {
    /// Starting search radius in meters.
    pub initial_radius_m: f64,
    /// Radius ceiling in meters. The backend is never queried beyond it.
    pub max_radius_m: f64,
    /// Geometric growth factor applied when a step comes back empty.
    pub expansion_factor: f64,
    /// Default result cap when a call does not specify one.
    pub max_results: u32,
}

impl Default for SearchDefaults {
    fn default() -> Self {
        Self {
            initial_radius_m: 500.0,
            max_radius_m: 50_000.0,
            expansion_factor: 2.0,
            max_results: 5,
        }
    }
}

/// Load and validate configuration from the given TOML file.
///
/// Fails loudly with every violation listed; the server refuses to start
/// on validation failure.
pub fn load_config(path: &Path) -> Result<ServerConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        WaypointError::Config(format!("Failed to read {}: {}", path.display(), e))
    })?;

    let mut config: ServerConfig = toml::from_str(&contents).map_err(|e| {
        WaypointError::Config(format!("Failed to parse {}: {}", path.display(), e))
    })?;

    // Secrets come from the environment when present.
    if let Ok(key) = std::env::var("WAYPOINT_API_KEY") {
        config.backend.api_key = key;
    }

    validate(&config)?;
    Ok(config)
}

/// Validate the complete server configuration, collecting all violations.
pub fn validate(config: &ServerConfig) -> Result<()> {
    let mut errors: Vec<String> = Vec::new();

    if config.backend.base_url.trim().is_empty() {
        errors.push("backend.base_url must not be empty".into());
    }

    let s = &config.search;
    if s.initial_radius_m <= 0.0 {
        errors.push("search.initial_radius_m must be > 0".into());
    }
    if s.max_radius_m < s.initial_radius_m {
        errors.push("search.max_radius_m must be >= search.initial_radius_m".into());
    }
    if s.expansion_factor <= 1.0 {
        errors.push("search.expansion_factor must be > 1.0".into());
    }
    if s.max_results == 0 || s.max_results > 50 {
        errors.push("search.max_results must be in 1..=50".into());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(WaypointError::Config(errors.join("; ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> ServerConfig {
        ServerConfig {
            backend: BackendConfig {
                base_url: "https://places.example.com".into(),
                api_key: String::new(),
            },
            search: SearchDefaults::default(),
        }
    }

    #[test]
    fn test_default_config_validates() {
        assert!(validate(&base_config()).is_ok());
    }

    #[test]
    fn test_validation_collects_all_violations() {
        let mut config = base_config();
        config.backend.base_url = String::new();
        config.search.expansion_factor = 1.0;
        config.search.max_results = 0;

        let err = validate(&config).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("base_url"));
        assert!(msg.contains("expansion_factor"));
        assert!(msg.contains("max_results"));
    }

    #[test]
    fn test_max_radius_below_initial_rejected() {
        let mut config = base_config();
        config.search.initial_radius_m = 1000.0;
        config.search.max_radius_m = 500.0;
        assert!(validate(&config).is_err());
    }
}
