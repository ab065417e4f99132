//! Application configuration
//!
//! Configuration loading for the rating tool: defaults, a TOML file layer,
//! and environment variable overrides, with validation.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

use crate::rating::OutcomePolicy;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub engine: EngineSettings,
    pub ingest: IngestSettings,
}

/// Service-level settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Service name for logging
    pub name: String,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Rating engine settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Outcome encoding for match-result ratings
    pub outcome_policy: OutcomePolicy,
    /// Apply the z-score transform to solved ratings
    pub normalize: bool,
    /// Optional presentation rescale applied after the solve
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
}

/// Ingestion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestSettings {
    /// Path of the JSON match cache; empty disables caching
    pub cache_path: String,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            name: "alliance-rating".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            outcome_policy: OutcomePolicy::MarginRatio,
            normalize: false,
            scale: None,
        }
    }
}

impl Default for IngestSettings {
    fn default() -> Self {
        Self {
            cache_path: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path.display(), e))?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path.display(), e))?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        // Service settings
        if let Ok(name) = env::var("SERVICE_NAME") {
            config.service.name = name;
        }
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            config.service.log_level = log_level;
        }

        // Engine settings
        if let Ok(policy) = env::var("OUTCOME_POLICY") {
            config.engine.outcome_policy = match policy.to_lowercase().as_str() {
                "sign" => OutcomePolicy::Sign,
                "margin_ratio" => OutcomePolicy::MarginRatio,
                _ => return Err(anyhow!("Invalid OUTCOME_POLICY value: {}", policy)),
            };
        }
        if let Ok(normalize) = env::var("NORMALIZE_RATINGS") {
            config.engine.normalize = normalize
                .parse()
                .map_err(|_| anyhow!("Invalid NORMALIZE_RATINGS value: {}", normalize))?;
        }
        if let Ok(scale) = env::var("RATING_SCALE") {
            config.engine.scale = Some(
                scale
                    .parse()
                    .map_err(|_| anyhow!("Invalid RATING_SCALE value: {}", scale))?,
            );
        }

        // Ingestion settings
        if let Ok(cache_path) = env::var("MATCH_CACHE_PATH") {
            config.ingest.cache_path = cache_path;
        }

        validate_config(&config)?;
        Ok(config)
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    if config.service.name.is_empty() {
        return Err(anyhow!("Service name cannot be empty"));
    }

    if let Some(scale) = config.engine.scale {
        if !scale.is_finite() || scale == 0.0 {
            return Err(anyhow!("Rating scale must be finite and nonzero"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.engine.outcome_policy, OutcomePolicy::MarginRatio);
        assert!(!config.engine.normalize);
    }

    #[test]
    fn test_bad_log_level_is_rejected() {
        let mut config = AppConfig::default();
        config.service.log_level = "loud".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_scale_is_rejected() {
        let mut config = AppConfig::default();
        config.engine.scale = Some(0.0);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = AppConfig::default();
        config.engine.normalize = true;
        config.engine.scale = Some(100.0);

        let raw = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&raw).unwrap();
        assert!(parsed.engine.normalize);
        assert_eq!(parsed.engine.scale, Some(100.0));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str("[engine]\nnormalize = true\n").unwrap();
        assert!(parsed.engine.normalize);
        assert_eq!(parsed.service.log_level, "info");
    }
}
