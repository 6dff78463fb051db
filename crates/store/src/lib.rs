//! Transaction records and their persistence surface.
//!
//! The matching engine's only mutable shared resource is transaction match
//! state. This crate models that state as a closed enum ([`MatchOutcome`])
//! so a record can never simultaneously be matched and carry an unmatch
//! reason, and defines the narrow storage contract the engine depends on:
//! bulk read by match state, batched writes of normalized fields and
//! outcomes ([`TransactionStore`]).
//!
//! The actual relational store is an external collaborator; the bundled
//! [`InMemoryStore`] is the reference implementation used by tests, demos,
//! and single-process runs.

mod backend;
mod error;
mod transaction;

pub use crate::backend::{InMemoryStore, TransactionStore};
pub use crate::error::StoreError;
pub use crate::transaction::{MatchMethod, MatchOutcome, Transaction, UnmatchReason};
