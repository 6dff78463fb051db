use registry::CanonicalIndex;
use store::{MatchMethod, MatchOutcome};

/// Stage 1: equality lookup of the normalized string against the registry.
///
/// Deterministic and ordering-free: each transaction is decided purely by
/// its own normalized string. A miss leaves the transaction untouched for
/// the later stages; no reason is written, because fuzzy or phonetic may
/// still succeed.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExactMatcher;

impl ExactMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Decide one normalized address. `Some` on a hit (confidence fixed at
    /// 1.0), `None` on a miss.
    pub fn match_one(&self, index: &CanonicalIndex, normalized: &str) -> Option<MatchOutcome> {
        index.exact(normalized).map(|record| MatchOutcome::Matched {
            canonical_id: record.id,
            method: MatchMethod::Exact,
            confidence: 1.0,
        })
    }
}
