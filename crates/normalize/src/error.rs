use thiserror::Error;

/// Errors that can occur during normalization.
///
/// Malformed address text is never an error; it degrades to the raw-string
/// fallback. Only configuration problems are surfaced here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
