use normalize::phonetic_keys;
use registry::CanonicalIndex;
use store::{MatchMethod, MatchOutcome, UnmatchReason};

use crate::similarity::edit_ratio;

/// Stage 3 (terminal): similarity inside the phonetic block.
///
/// Candidates are the union of the Metaphone and Soundex postings for the
/// transaction's own key pair; a record sounding alike under either scheme
/// is in play. The best candidate by edit-distance ratio must clear two
/// gates before the match is labeled: the tie-break ratio (0–100 scale) and
/// the separate confidence threshold (0–1 scale, applied to ratio / 100).
///
/// This stage always resolves: every input leaves either matched or carrying
/// a distinct, observable unmatch reason.
#[derive(Debug, Clone, Copy)]
pub struct PhoneticMatcher {
    tiebreak_ratio: f64,
    confidence_threshold: f64,
}

impl PhoneticMatcher {
    pub fn new(tiebreak_ratio: f64, confidence_threshold: f64) -> Self {
        Self {
            tiebreak_ratio,
            confidence_threshold,
        }
    }

    /// Decide one normalized address, terminally.
    pub fn match_one(&self, index: &CanonicalIndex, normalized: &str) -> MatchOutcome {
        if normalized.is_empty() {
            return MatchOutcome::Unmatched {
                reason: UnmatchReason::EmptyAddress,
            };
        }

        let keys = phonetic_keys(normalized);
        let block = index.phonetic_block(&keys);
        if block.is_empty() {
            return MatchOutcome::Unmatched {
                reason: UnmatchReason::EmptyPhoneticBlock,
            };
        }

        // Ties keep the lowest canonical id: the block is id-ordered and
        // only a strictly greater ratio displaces the best.
        let mut best: Option<(u64, f64)> = None;
        for record in block {
            let ratio = edit_ratio(normalized, &record.normalized);
            let better = match best {
                None => true,
                Some((_, best_ratio)) => ratio > best_ratio,
            };
            if better {
                best = Some((record.id, ratio));
            }
        }

        match best {
            Some((canonical_id, ratio))
                if ratio >= self.tiebreak_ratio
                    && ratio / 100.0 >= self.confidence_threshold =>
            {
                MatchOutcome::Matched {
                    canonical_id,
                    method: MatchMethod::Phonetic,
                    confidence: ratio / 100.0,
                }
            }
            _ => MatchOutcome::Unmatched {
                reason: UnmatchReason::BelowPhoneticThreshold,
            },
        }
    }
}
