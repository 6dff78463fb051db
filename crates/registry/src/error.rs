use thiserror::Error;

/// Errors raised while loading or indexing the canonical registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The registry exceeds the configured in-memory cap. Raised before any
    /// index structure is populated so a run halts cleanly instead of
    /// exhausting memory partway through.
    #[error(
        "canonical registry has {count} records, exceeding the configured \
         in-memory cap of {cap}; shard the registry or raise max_records"
    )]
    CapacityExceeded { count: usize, cap: usize },

    /// Normalization of a canonical record failed (configuration problem).
    #[error("normalization failed: {0}")]
    Normalize(#[from] normalize::NormalizeError),
}
