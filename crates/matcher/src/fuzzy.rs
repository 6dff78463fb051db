use registry::CanonicalIndex;
use store::{MatchMethod, MatchOutcome};

use crate::similarity::trigram_similarity;

/// Stage 2: trigram similarity over the prefix block.
///
/// Blocking bounds the comparison cost: only canonical records sharing the
/// configured leading prefix are scored, which trades recall (a typo inside
/// the prefix hides the true match) for tractable runtime on large
/// registries. Missed records get another chance at the phonetic stage.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyMatcher {
    threshold: f64,
}

impl FuzzyMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    /// Decide one normalized address. `Some` when the best candidate in the
    /// prefix block scores at or above the threshold; the similarity score
    /// becomes the confidence. `None` when the block is empty or nothing
    /// clears the threshold; the transaction passes to the next stage.
    ///
    /// Ties on the maximum score keep the lowest canonical id: blocks are
    /// id-ordered and only a strictly greater score displaces the best.
    pub fn match_one(&self, index: &CanonicalIndex, normalized: &str) -> Option<MatchOutcome> {
        let mut best: Option<(u64, f64)> = None;

        for record in index.prefix_block(normalized) {
            let score = trigram_similarity(normalized, &record.normalized);
            let better = match best {
                None => true,
                Some((_, best_score)) => score > best_score,
            };
            if better {
                best = Some((record.id, score));
            }
        }

        match best {
            Some((canonical_id, score)) if score >= self.threshold => {
                Some(MatchOutcome::Matched {
                    canonical_id,
                    method: MatchMethod::Fuzzy,
                    confidence: score,
                })
            }
            _ => None,
        }
    }
}
