//! Configuration management for the recycling performance predictor

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub artifacts: ArtifactsConfig,
    pub detection: DetectionConfig,
    pub logging: LoggingConfig,
}

/// Locations of the serialized model and reference dataset
#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactsConfig {
    /// Path to the serialized classifier
    pub model_path: String,
    /// Path to the district reference dataset (CSV)
    pub reference_path: String,
}

/// Decision configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DetectionConfig {
    /// Probability threshold for classifying high performance
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.60
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file
    pub fn load() -> Result<Self> {
        Self::load_from_path("config/config.toml")
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            artifacts: ArtifactsConfig {
                model_path: "models_data/recycling_model.json".to_string(),
                reference_path: "models_data/districts.csv".to_string(),
            },
            detection: DetectionConfig { threshold: 0.60 },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}
