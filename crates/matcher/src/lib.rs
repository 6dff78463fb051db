//! Matching layer: three progressively looser strategies over a canonical
//! address index, plus the batch engine that runs them as a waterfall.
//!
//! ## Stages
//!
//! 1. [`ExactMatcher`]: equality on the normalized string, confidence 1.0.
//! 2. [`FuzzyMatcher`]: trigram similarity over the prefix block.
//! 3. [`PhoneticMatcher`]: edit-ratio tie-break inside the phonetic block;
//!    terminal, so every record leaves matched or with an unmatch reason.
//!
//! Each matcher is an independently callable unit (`match_one`) so a
//! synchronous one-address lookup and the batch pipeline share the same
//! decision code. [`WaterfallEngine`] sequences the stages over the
//! unresolved subset of a [`TransactionStore`](store::TransactionStore),
//! persisting batches between stages so a run can resume from the last
//! completed stage boundary.

mod engine;
mod exact;
mod fuzzy;
mod phonetic;
mod similarity;
mod types;

pub use crate::engine::{match_single, RunSummary, StageSummary, WaterfallEngine};
pub use crate::exact::ExactMatcher;
pub use crate::fuzzy::FuzzyMatcher;
pub use crate::phonetic::PhoneticMatcher;
pub use crate::similarity::{edit_ratio, trigram_similarity};
pub use crate::types::{MatchError, MatcherConfig, SingleMatch};
