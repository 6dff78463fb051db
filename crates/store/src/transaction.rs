use std::fmt;

use normalize::AddressComponents;
use serde::{Deserialize, Serialize};

/// Which waterfall stage produced a match.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MatchMethod {
    Exact,
    Fuzzy,
    Phonetic,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMethod::Exact => write!(f, "exact"),
            MatchMethod::Fuzzy => write!(f, "fuzzy"),
            MatchMethod::Phonetic => write!(f, "phonetic"),
        }
    }
}

/// Why the terminal stage left a transaction unmatched. The variants are
/// deliberately distinct so reports can tell an empty candidate block apart
/// from candidates that existed but scored below threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum UnmatchReason {
    /// The raw address normalized to an empty string; no stage could act.
    EmptyAddress,
    /// Neither phonetic key retrieved any canonical candidate.
    EmptyPhoneticBlock,
    /// Candidates existed but none cleared both phonetic thresholds.
    BelowPhoneticThreshold,
}

impl fmt::Display for UnmatchReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnmatchReason::EmptyAddress => write!(f, "address empty after normalization"),
            UnmatchReason::EmptyPhoneticBlock => write!(f, "empty phonetic block"),
            UnmatchReason::BelowPhoneticThreshold => {
                write!(f, "no phonetic candidate met confidence threshold")
            }
        }
    }
}

/// Match state of a transaction.
///
/// Modeled as a closed enum so the core invariant holds by construction:
/// a matched canonical id exists exactly when a method and confidence do,
/// and never together with an unmatch reason.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MatchOutcome {
    /// Not yet visited by a deciding stage; the waterfall's working set.
    #[default]
    Unresolved,
    /// Terminally matched to a canonical record.
    Matched {
        canonical_id: u64,
        method: MatchMethod,
        /// 0.0–1.0; fixed at 1.0 for exact matches, the similarity score
        /// otherwise.
        confidence: f64,
    },
    /// Terminally unmatched with an observable reason.
    Unmatched { reason: UnmatchReason },
}

impl MatchOutcome {
    /// Terminal states are never revisited by later stages.
    pub fn is_resolved(&self) -> bool {
        !matches!(self, MatchOutcome::Unresolved)
    }

    pub fn is_matched(&self) -> bool {
        matches!(self, MatchOutcome::Matched { .. })
    }

    pub fn canonical_id(&self) -> Option<u64> {
        match self {
            MatchOutcome::Matched { canonical_id, .. } => Some(*canonical_id),
            _ => None,
        }
    }
}

/// One inbound record to reconcile against the registry.
///
/// Lifecycle: created from raw text, normalized once (the `components` and
/// `normalized` fields are written by the normalizer and then stable), then
/// visited by at most one deciding stage that moves `outcome` out of
/// `Unresolved`. Stages only ever read the unresolved subset, so a resolved
/// transaction is never reprocessed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: u64,
    /// Address text as supplied by the source system.
    pub raw_address: String,
    /// Parsed components, present once normalization has run.
    pub components: Option<AddressComponents>,
    /// Canonical comparison string, present once normalization has run.
    pub normalized: Option<String>,
    pub outcome: MatchOutcome,
}

impl Transaction {
    pub fn new(id: u64, raw_address: impl Into<String>) -> Self {
        Self {
            id,
            raw_address: raw_address.into(),
            components: None,
            normalized: None,
            outcome: MatchOutcome::Unresolved,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_states_are_mutually_exclusive() {
        let matched = MatchOutcome::Matched {
            canonical_id: 9,
            method: MatchMethod::Fuzzy,
            confidence: 0.85,
        };
        assert!(matched.is_resolved());
        assert!(matched.is_matched());
        assert_eq!(matched.canonical_id(), Some(9));

        let unmatched = MatchOutcome::Unmatched {
            reason: UnmatchReason::EmptyPhoneticBlock,
        };
        assert!(unmatched.is_resolved());
        assert!(!unmatched.is_matched());
        assert_eq!(unmatched.canonical_id(), None);

        assert!(!MatchOutcome::Unresolved.is_resolved());
    }

    #[test]
    fn unmatch_reasons_render_distinct_labels() {
        let labels = [
            UnmatchReason::EmptyAddress.to_string(),
            UnmatchReason::EmptyPhoneticBlock.to_string(),
            UnmatchReason::BelowPhoneticThreshold.to_string(),
        ];
        assert_eq!(
            labels.iter().collect::<std::collections::HashSet<_>>().len(),
            labels.len()
        );
    }

    #[test]
    fn new_transaction_starts_unresolved() {
        let tx = Transaction::new(1, "123 Main St");
        assert_eq!(tx.outcome, MatchOutcome::Unresolved);
        assert!(tx.normalized.is_none());
    }
}
