use std::collections::{BTreeSet, HashMap};

use normalize::PhoneticKeys;

use crate::config::IndexConfig;
use crate::error::RegistryError;
use crate::record::CanonicalAddress;

/// Read-only lookup structure over the canonical registry, built once per
/// pipeline run.
///
/// Three auxiliary maps are maintained over the record store: an exact map
/// from normalized string to record, a prefix map feeding the fuzzy stage,
/// and two parallel phonetic maps (one per encoding scheme) whose posting
/// lists are OR-merged per lookup. Keeping the phonetic schemes in separate
/// maps keeps each one swappable and testable in isolation.
///
/// Records are held sorted by ascending id, and every posting list preserves
/// that order, so candidate iteration (and therefore tie-breaking) is
/// deterministic across runs.
#[derive(Debug)]
pub struct CanonicalIndex {
    records: Vec<CanonicalAddress>,
    by_normalized: HashMap<String, usize>,
    by_prefix: HashMap<String, Vec<usize>>,
    by_metaphone: HashMap<String, Vec<usize>>,
    by_soundex: HashMap<String, Vec<usize>>,
    cfg: IndexConfig,
    duplicates: usize,
}

impl CanonicalIndex {
    /// Build the index from the full registry.
    ///
    /// Fails fast with [`RegistryError::CapacityExceeded`] when the registry
    /// is larger than `cfg.max_records`, before any structure is populated.
    ///
    /// Registry rows may carry duplicate normalized strings; the record with
    /// the lowest id wins the exact slot and later duplicates are counted
    /// (see [`duplicate_count`](Self::duplicate_count)) and logged. Records
    /// whose normalized string is empty are unmatchable and are not indexed.
    pub fn build(
        mut records: Vec<CanonicalAddress>,
        cfg: IndexConfig,
    ) -> Result<Self, RegistryError> {
        if let Some(cap) = cfg.max_records {
            if records.len() > cap {
                return Err(RegistryError::CapacityExceeded {
                    count: records.len(),
                    cap,
                });
            }
        }

        // Ascending id order makes every posting list deterministic and
        // gives first-wins exact insertion the lowest-id semantics.
        records.sort_by_key(|r| r.id);

        let mut by_normalized = HashMap::new();
        let mut by_prefix: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_metaphone: HashMap<String, Vec<usize>> = HashMap::new();
        let mut by_soundex: HashMap<String, Vec<usize>> = HashMap::new();
        let mut duplicates = 0usize;
        let mut skipped_empty = 0usize;

        for (pos, record) in records.iter().enumerate() {
            if record.normalized.is_empty() {
                skipped_empty += 1;
                continue;
            }

            // First record (lowest id) wins the exact slot.
            match by_normalized.entry(record.normalized.clone()) {
                std::collections::hash_map::Entry::Occupied(_) => duplicates += 1,
                std::collections::hash_map::Entry::Vacant(slot) => {
                    slot.insert(pos);
                }
            }

            by_prefix
                .entry(prefix_of(&record.normalized, cfg.prefix_len))
                .or_default()
                .push(pos);

            if !record.phonetic.metaphone.is_empty() {
                by_metaphone
                    .entry(record.phonetic.metaphone.clone())
                    .or_default()
                    .push(pos);
            }
            if !record.phonetic.soundex.is_empty() {
                by_soundex
                    .entry(record.phonetic.soundex.clone())
                    .or_default()
                    .push(pos);
            }
        }

        if duplicates > 0 {
            tracing::warn!(
                duplicates,
                "registry contains duplicate normalized addresses; first (lowest id) kept"
            );
        }
        if skipped_empty > 0 {
            tracing::warn!(skipped_empty, "registry records with empty normalized string skipped");
        }
        tracing::info!(
            records = records.len(),
            prefix_blocks = by_prefix.len(),
            metaphone_keys = by_metaphone.len(),
            soundex_keys = by_soundex.len(),
            "canonical index built"
        );

        Ok(Self {
            records,
            by_normalized,
            by_prefix,
            by_metaphone,
            by_soundex,
            cfg,
            duplicates,
        })
    }

    /// Exact lookup by normalized string. Empty strings never match.
    pub fn exact(&self, normalized: &str) -> Option<&CanonicalAddress> {
        if normalized.is_empty() {
            return None;
        }
        self.by_normalized
            .get(normalized)
            .map(|&pos| &self.records[pos])
    }

    /// All records whose normalized string shares the configured leading
    /// prefix with `normalized`, in ascending id order.
    pub fn prefix_block(&self, normalized: &str) -> Vec<&CanonicalAddress> {
        if normalized.is_empty() {
            return Vec::new();
        }
        let key = prefix_of(normalized, self.cfg.prefix_len);
        match self.by_prefix.get(&key) {
            Some(positions) => positions.iter().map(|&pos| &self.records[pos]).collect(),
            None => Vec::new(),
        }
    }

    /// Union of the metaphone and soundex posting lists for the given key
    /// pair, deduplicated, in ascending id order. A record reached by either
    /// scheme appears exactly once.
    pub fn phonetic_block(&self, keys: &PhoneticKeys) -> Vec<&CanonicalAddress> {
        let mut positions: BTreeSet<usize> = BTreeSet::new();
        if !keys.metaphone.is_empty() {
            if let Some(list) = self.by_metaphone.get(&keys.metaphone) {
                positions.extend(list.iter().copied());
            }
        }
        if !keys.soundex.is_empty() {
            if let Some(list) = self.by_soundex.get(&keys.soundex) {
                positions.extend(list.iter().copied());
            }
        }
        positions.into_iter().map(|pos| &self.records[pos]).collect()
    }

    /// Number of records held by the index.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// How many registry rows lost the exact slot to a lower-id duplicate.
    pub fn duplicate_count(&self) -> usize {
        self.duplicates
    }

    /// The configured prefix length, exposed so callers can reason about
    /// block membership.
    pub fn prefix_len(&self) -> usize {
        self.cfg.prefix_len
    }
}

/// First `len` characters of a normalized string (whole string when shorter).
fn prefix_of(normalized: &str, len: usize) -> String {
    normalized.chars().take(len).collect()
}
