use normalize::{AddressComponents, NormalizeError};
use serde::{Deserialize, Serialize};
use store::{MatchMethod, MatchOutcome, StoreError};
use thiserror::Error;

/// Tunables for the three matching stages and the batch write path.
///
/// Cheap to clone and serde-friendly so it can be embedded in pipeline-level
/// configuration files.
///
/// The phonetic stage carries two thresholds on different scales: the
/// tie-break ratio (0–100, applied to the edit-distance ratio that picks the
/// best candidate inside a block) and the confidence threshold (0–1, applied
/// to the normalized score before the match is labeled). They are
/// independent tunables; neither implies the other, and [`validate`]
/// deliberately only range-checks each one.
///
/// [`validate`]: MatcherConfig::validate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Configuration schema version. Must be >= 1.
    #[serde(default = "MatcherConfig::default_version")]
    pub version: u32,

    /// Minimum trigram similarity for the fuzzy stage to accept its best
    /// candidate. Range [0, 1]. Default: 0.8.
    #[serde(default = "MatcherConfig::default_fuzzy_threshold")]
    pub fuzzy_threshold: f64,

    /// Minimum edit-distance ratio (0–100) the best phonetic candidate must
    /// reach. Default: 85.0.
    #[serde(default = "MatcherConfig::default_phonetic_tiebreak_ratio")]
    pub phonetic_tiebreak_ratio: f64,

    /// Minimum normalized score (0–1) required before a phonetic match is
    /// labeled. Checked in addition to the tie-break ratio. Default: 0.90.
    #[serde(default = "MatcherConfig::default_phonetic_confidence")]
    pub phonetic_confidence: f64,

    /// Outcome writes are flushed to the store in chunks of this size.
    /// Default: 1000.
    #[serde(default = "MatcherConfig::default_batch_size")]
    pub batch_size: usize,

    /// How many times a failed batch write is retried before the stage
    /// aborts. Default: 3.
    #[serde(default = "MatcherConfig::default_max_write_retries")]
    pub max_write_retries: u32,

    /// Score candidates across worker threads within a stage. Stage order
    /// is unaffected; per-transaction decisions are independent.
    /// Default: false.
    #[serde(default)]
    pub use_parallel: bool,
}

impl MatcherConfig {
    pub(crate) fn default_version() -> u32 {
        1
    }

    pub(crate) fn default_fuzzy_threshold() -> f64 {
        0.8
    }

    pub(crate) fn default_phonetic_tiebreak_ratio() -> f64 {
        85.0
    }

    pub(crate) fn default_phonetic_confidence() -> f64 {
        0.90
    }

    pub(crate) fn default_batch_size() -> usize {
        1000
    }

    pub(crate) fn default_max_write_retries() -> u32 {
        3
    }

    /// Validate ranges. Called by the engine at construction.
    pub fn validate(&self) -> Result<(), MatchError> {
        if self.version == 0 {
            return Err(MatchError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(MatchError::InvalidConfig(
                "fuzzy_threshold must be within [0.0, 1.0]".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.phonetic_tiebreak_ratio) {
            return Err(MatchError::InvalidConfig(
                "phonetic_tiebreak_ratio must be within [0.0, 100.0]".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.phonetic_confidence) {
            return Err(MatchError::InvalidConfig(
                "phonetic_confidence must be within [0.0, 1.0]".into(),
            ));
        }
        if self.batch_size == 0 {
            return Err(MatchError::InvalidConfig(
                "batch_size must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            version: Self::default_version(),
            fuzzy_threshold: Self::default_fuzzy_threshold(),
            phonetic_tiebreak_ratio: Self::default_phonetic_tiebreak_ratio(),
            phonetic_confidence: Self::default_phonetic_confidence(),
            batch_size: Self::default_batch_size(),
            max_write_retries: Self::default_max_write_retries(),
            use_parallel: false,
        }
    }
}

/// Result of the synchronous single-address path: the same outcome contract
/// as the batch waterfall, plus the normalization artifacts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleMatch {
    /// Canonical comparison string derived from the queried address.
    pub normalized: String,
    /// Parsed components of the queried address.
    pub components: AddressComponents,
    /// Terminal outcome: matched (method + confidence + canonical id) or
    /// unmatched with a reason.
    pub outcome: MatchOutcome,
}

/// Errors produced by the matching layer.
#[derive(Debug, Error)]
pub enum MatchError {
    /// Invalid matcher configuration.
    #[error("invalid matcher config: {0}")]
    InvalidConfig(String),

    /// Normalization refused its configuration.
    #[error("normalization error: {0}")]
    Normalize(#[from] NormalizeError),

    /// A store operation failed beyond the retry budget; the named stage
    /// was aborted with its unflushed batch left unapplied.
    #[error("store failure during {stage} stage: {source}")]
    Store {
        stage: MatchMethod,
        #[source]
        source: StoreError,
    },
}
