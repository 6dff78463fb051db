//! Canonical address registry.
//!
//! This crate owns the reference side of the matching pipeline: the immutable
//! [`CanonicalAddress`] entity and the in-memory [`CanonicalIndex`] built once
//! per run. The index exposes the three lookup surfaces the matchers need:
//!
//! - exact lookup by normalized string,
//! - prefix-block lookup (fuzzy candidate sets),
//! - phonetic-block lookup (union of Metaphone and Soundex postings).
//!
//! The index is an explicitly constructed, explicitly owned value. Callers
//! pass it by reference (or behind an `Arc`) into each matcher; there is no
//! ambient or static registry state, so independent runs and tests never
//! cross-contaminate. After [`CanonicalIndex::build`] returns, the index is
//! read-only and safe to share across worker threads without locking.
//!
//! ## Memory model
//!
//! The whole registry lives in memory. Registries that cannot fit must be
//! capped or sharded by the caller; [`IndexConfig::max_records`] turns the
//! cap into a fail-fast [`RegistryError::CapacityExceeded`] at build time
//! rather than an unpredictable allocation failure mid-run.

mod config;
mod error;
mod index;
mod record;

pub use crate::config::IndexConfig;
pub use crate::error::RegistryError;
pub use crate::index::CanonicalIndex;
pub use crate::record::CanonicalAddress;
