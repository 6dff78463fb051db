//! Configuration for the address normalization pipeline.
//!
//! # Versioning
//!
//! The `version` field tracks behavior changes. Any change to tagging or
//! abbreviation behavior (even bug fixes) must bump it, so that normalized
//! strings persisted by older runs can be told apart from newer ones.
//! Version 0 is reserved and rejected.

use serde::{Deserialize, Serialize};

/// Controls how raw address text is tagged and normalized.
///
/// Cheap to clone and serde-friendly so it can live inside larger pipeline
/// configuration files.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizeConfig {
    /// Semantic version of the normalization behavior. Must be >= 1.
    #[serde(default = "NormalizeConfig::default_version")]
    pub version: u32,

    /// Map full street types to USPS abbreviations (STREET -> ST,
    /// AVENUE -> AVE, ...). Unknown street types are kept verbatim.
    ///
    /// Default: `true`
    #[serde(default = "NormalizeConfig::default_true")]
    pub abbreviate_street_types: bool,

    /// Map full directionals to abbreviations (NORTH -> N, SOUTHWEST -> SW).
    ///
    /// Default: `true`
    #[serde(default = "NormalizeConfig::default_true")]
    pub abbreviate_directionals: bool,
}

impl NormalizeConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_true() -> bool {
        true
    }
}

impl Default for NormalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            abbreviate_street_types: true,
            abbreviate_directionals: true,
        }
    }
}
