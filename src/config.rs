//! YAML configuration file support for the full pipeline.
//!
//! All stage configurations (normalization, index, matcher) live in a single
//! YAML document and are loaded at startup. Example:
//!
//! ```yaml
//! version: "1.0"
//! name: "nightly reconciliation"
//!
//! normalize:
//!   version: 1
//!   abbreviate_street_types: true
//!   abbreviate_directionals: true
//!
//! index:
//!   prefix_len: 10
//!   max_records: 50000000
//!
//! matcher:
//!   fuzzy_threshold: 0.8
//!   phonetic_tiebreak_ratio: 85.0
//!   phonetic_confidence: 0.9
//!   batch_size: 1000
//!   max_write_retries: 3
//!   use_parallel: true
//! ```
//!
//! Every section is optional and falls back to its stage defaults.
//! Validation runs on load, so misconfiguration surfaces at startup rather
//! than mid-run.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use matcher::MatcherConfig;
use normalize::NormalizeConfig;
use registry::IndexConfig;

/// Errors that can occur when loading a pipeline configuration file.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level configuration for a pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddrlinkConfig {
    /// Configuration format version.
    #[serde(default = "default_format_version")]
    pub version: String,

    /// Optional run name, echoed into logs.
    #[serde(default)]
    pub name: Option<String>,

    /// Address normalization settings.
    #[serde(default)]
    pub normalize: NormalizeConfig,

    /// Canonical index settings (prefix length, capacity cap).
    #[serde(default)]
    pub index: IndexConfig,

    /// Matching thresholds and batch write settings.
    #[serde(default)]
    pub matcher: MatcherConfig,
}

impl AddrlinkConfig {
    /// Load a YAML configuration file from the given path.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: AddrlinkConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => {}
            v => return Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }

        if self.normalize.version == 0 {
            return Err(ConfigLoadError::Validation(
                "normalize.version must be >= 1".to_string(),
            ));
        }
        if self.index.prefix_len == 0 {
            return Err(ConfigLoadError::Validation(
                "index.prefix_len must be >= 1".to_string(),
            ));
        }
        self.matcher
            .validate()
            .map_err(|err| ConfigLoadError::Validation(err.to_string()))?;

        Ok(())
    }
}

impl Default for AddrlinkConfig {
    fn default() -> Self {
        Self {
            version: default_format_version(),
            name: None,
            normalize: NormalizeConfig::default(),
            index: IndexConfig::default(),
            matcher: MatcherConfig::default(),
        }
    }
}

fn default_format_version() -> String {
    "1.0".to_string()
}
