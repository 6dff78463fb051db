use thiserror::Error;

/// Errors surfaced by a [`TransactionStore`](crate::TransactionStore)
/// implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store failed (I/O, lock poisoning, connection loss).
    /// Batch writes that fail this way are retried by the engine.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// An update referenced a transaction id the store has never seen.
    #[error("unknown transaction id {0}")]
    UnknownTransaction(u64),
}

impl StoreError {
    pub fn backend<E: std::fmt::Display>(err: E) -> Self {
        Self::Backend(err.to_string())
    }
}
