use std::collections::BTreeMap;
use std::sync::RwLock;

use normalize::NormalizedAddress;

use crate::error::StoreError;
use crate::transaction::{MatchOutcome, Transaction};

/// Storage contract the matching engine depends on.
///
/// Implementations sit in front of whatever actually holds the transactions
/// (relational store, files, memory). The engine only ever needs:
/// state-filtered bulk reads, and batched writes of normalized fields and
/// outcomes. `Send + Sync` so one shared reference can serve parallel
/// workers inside a stage.
pub trait TransactionStore: Send + Sync {
    /// All transactions still awaiting a decision. This is the formal input
    /// of every stage: "all transactions with no resolved outcome", not
    /// whatever happens to remain in some cursor.
    fn load_unresolved(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Every transaction regardless of state (reporting, verification).
    fn load_all(&self) -> Result<Vec<Transaction>, StoreError>;

    /// Persist normalization results for the given ids in one batch.
    fn write_normalized(&self, updates: &[(u64, NormalizedAddress)]) -> Result<(), StoreError>;

    /// Persist stage outcomes for the given ids in one batch.
    ///
    /// Writes against a transaction that is already resolved must be a
    /// no-op: re-running a stage can never silently overwrite an earlier
    /// decision.
    fn write_outcomes(&self, updates: &[(u64, MatchOutcome)]) -> Result<(), StoreError>;
}

/// Reference in-memory store: a `RwLock` around a `BTreeMap` so bulk reads
/// come back in stable id order.
pub struct InMemoryStore {
    records: RwLock<BTreeMap<u64, Transaction>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
        }
    }

    /// Seed the store with a batch of transactions (ingestion stand-in).
    pub fn seed(transactions: Vec<Transaction>) -> Self {
        let store = Self::new();
        {
            let mut guard = store.records.write().expect("fresh lock");
            for tx in transactions {
                guard.insert(tx.id, tx);
            }
        }
        store
    }

    /// Fetch a single transaction by id.
    pub fn get(&self, id: u64) -> Result<Option<Transaction>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.get(&id).cloned())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionStore for InMemoryStore {
    fn load_unresolved(&self) -> Result<Vec<Transaction>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard
            .values()
            .filter(|tx| !tx.outcome.is_resolved())
            .cloned()
            .collect())
    }

    fn load_all(&self) -> Result<Vec<Transaction>, StoreError> {
        let guard = self
            .records
            .read()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        Ok(guard.values().cloned().collect())
    }

    fn write_normalized(&self, updates: &[(u64, NormalizedAddress)]) -> Result<(), StoreError> {
        // A single write lock covers the whole batch.
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        for (id, parsed) in updates {
            let tx = guard
                .get_mut(id)
                .ok_or(StoreError::UnknownTransaction(*id))?;
            tx.normalized = Some(parsed.normalized.clone());
            tx.components = Some(parsed.components.clone());
        }
        Ok(())
    }

    fn write_outcomes(&self, updates: &[(u64, MatchOutcome)]) -> Result<(), StoreError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| StoreError::backend("poisoned lock"))?;
        for (id, outcome) in updates {
            let tx = guard
                .get_mut(id)
                .ok_or(StoreError::UnknownTransaction(*id))?;
            // Resolved records are immutable; re-runs are no-ops here.
            if tx.outcome.is_resolved() {
                continue;
            }
            tx.outcome = outcome.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::{MatchMethod, UnmatchReason};
    use normalize::{normalize, NormalizeConfig};

    fn seeded() -> InMemoryStore {
        InMemoryStore::seed(vec![
            Transaction::new(1, "123 Main St"),
            Transaction::new(2, "456 Oak Ave"),
            Transaction::new(3, "789 Elm Blvd"),
        ])
    }

    #[test]
    fn unresolved_filter_excludes_decided_records() {
        let store = seeded();
        store
            .write_outcomes(&[(
                2,
                MatchOutcome::Matched {
                    canonical_id: 20,
                    method: MatchMethod::Exact,
                    confidence: 1.0,
                },
            )])
            .expect("write succeeds");

        let pending = store.load_unresolved().expect("load succeeds");
        assert_eq!(pending.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(store.load_all().expect("load all").len(), 3);
    }

    #[test]
    fn normalized_fields_are_persisted() {
        let store = seeded();
        let parsed = normalize("123 Main St", &NormalizeConfig::default()).expect("normalizes");
        store
            .write_normalized(&[(1, parsed)])
            .expect("write succeeds");

        let tx = store.get(1).expect("get succeeds").expect("present");
        assert_eq!(tx.normalized.as_deref(), Some("123 MAIN ST"));
        assert!(tx.components.is_some());
    }

    #[test]
    fn resolved_outcomes_are_never_overwritten() {
        let store = seeded();
        let first = MatchOutcome::Matched {
            canonical_id: 10,
            method: MatchMethod::Exact,
            confidence: 1.0,
        };
        store.write_outcomes(&[(1, first.clone())]).expect("first write");

        // A second write against the same id must leave the decision alone.
        store
            .write_outcomes(&[(
                1,
                MatchOutcome::Unmatched {
                    reason: UnmatchReason::EmptyPhoneticBlock,
                },
            )])
            .expect("second write succeeds as a no-op");

        let tx = store.get(1).expect("get succeeds").expect("present");
        assert_eq!(tx.outcome, first);
    }

    #[test]
    fn unknown_ids_are_rejected() {
        let store = seeded();
        let err = store
            .write_outcomes(&[(
                99,
                MatchOutcome::Unmatched {
                    reason: UnmatchReason::EmptyAddress,
                },
            )])
            .expect_err("unknown id");
        assert_eq!(err, StoreError::UnknownTransaction(99));
    }
}
