use std::sync::Arc;

use rayon::prelude::*;

use normalize::{normalize, NormalizeConfig};
use registry::CanonicalIndex;
use store::{MatchMethod, MatchOutcome, Transaction, TransactionStore};

use crate::exact::ExactMatcher;
use crate::fuzzy::FuzzyMatcher;
use crate::phonetic::PhoneticMatcher;
use crate::types::{MatchError, MatcherConfig, SingleMatch};


/// Per-stage counters reported by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageSummary {
    pub stage: MatchMethod,
    /// Unresolved transactions the stage examined.
    pub scanned: usize,
    /// Decisions that matched a canonical record.
    pub matched: usize,
    /// Terminal unmatched decisions (only the phonetic stage writes these).
    pub unmatched: usize,
}

/// Counters for a full waterfall run, one entry per executed stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub stages: Vec<StageSummary>,
}

impl RunSummary {
    pub fn total_matched(&self) -> usize {
        self.stages.iter().map(|s| s.matched).sum()
    }

    pub fn total_unmatched(&self) -> usize {
        self.stages.iter().map(|s| s.unmatched).sum()
    }
}

/// Batch waterfall over a transaction store: Exact, then Fuzzy on the
/// leftovers, then Phonetic on what remains.
///
/// Each stage's input is formally "all transactions with no resolved
/// outcome", re-read from the store at stage start, never handed over
/// in memory. That makes stage boundaries durable checkpoints: a crashed
/// run resumes by re-running [`run`](Self::run) (resolved rows are
/// untouched by construction), or stage-by-stage via
/// [`run_stage`](Self::run_stage).
///
/// The canonical index is read-only and shared; transaction state is the
/// only mutable resource and is written in batches with bounded retries.
pub struct WaterfallEngine {
    index: Arc<CanonicalIndex>,
    store: Arc<dyn TransactionStore>,
    normalize_cfg: NormalizeConfig,
    cfg: MatcherConfig,
    exact: ExactMatcher,
    fuzzy: FuzzyMatcher,
    phonetic: PhoneticMatcher,
}

impl WaterfallEngine {
    /// Construct an engine over a shared index and store. Validates the
    /// matcher config up front.
    pub fn new(
        index: Arc<CanonicalIndex>,
        store: Arc<dyn TransactionStore>,
        normalize_cfg: NormalizeConfig,
        cfg: MatcherConfig,
    ) -> Result<Self, MatchError> {
        cfg.validate()?;
        let exact = ExactMatcher::new();
        let fuzzy = FuzzyMatcher::new(cfg.fuzzy_threshold);
        let phonetic = PhoneticMatcher::new(cfg.phonetic_tiebreak_ratio, cfg.phonetic_confidence);
        Ok(Self {
            index,
            store,
            normalize_cfg,
            cfg,
            exact,
            fuzzy,
            phonetic,
        })
    }

    /// Run all three stages in order. Stops at the first stage-level
    /// failure, leaving earlier stages' writes durable.
    pub fn run(&self) -> Result<RunSummary, MatchError> {
        let mut summary = RunSummary::default();
        for stage in [MatchMethod::Exact, MatchMethod::Fuzzy, MatchMethod::Phonetic] {
            summary.stages.push(self.run_stage(stage)?);
        }
        tracing::info!(
            matched = summary.total_matched(),
            unmatched = summary.total_unmatched(),
            "waterfall complete"
        );
        Ok(summary)
    }

    /// Run one stage against current storage state. Public so a run can be
    /// resumed from the last completed stage boundary.
    pub fn run_stage(&self, stage: MatchMethod) -> Result<StageSummary, MatchError> {
        let mut pending = self.store.load_unresolved().map_err(|source| {
            MatchError::Store { stage, source }
        })?;

        self.ensure_normalized(stage, &mut pending)?;

        let decisions: Vec<(u64, Option<MatchOutcome>)> = if self.cfg.use_parallel {
            pending
                .par_iter()
                .map(|tx| (tx.id, self.decide(stage, tx)))
                .collect()
        } else {
            pending
                .iter()
                .map(|tx| (tx.id, self.decide(stage, tx)))
                .collect()
        };

        let updates: Vec<(u64, MatchOutcome)> = decisions
            .into_iter()
            .filter_map(|(id, outcome)| outcome.map(|o| (id, o)))
            .collect();

        let matched = updates.iter().filter(|(_, o)| o.is_matched()).count();
        let unmatched = updates.len() - matched;

        for chunk in updates.chunks(self.cfg.batch_size) {
            self.write_with_retry(stage, || self.store.write_outcomes(chunk))?;
        }

        let summary = StageSummary {
            stage,
            scanned: pending.len(),
            matched,
            unmatched,
        };
        tracing::info!(
            stage = %stage,
            scanned = summary.scanned,
            matched = summary.matched,
            unmatched = summary.unmatched,
            "stage complete"
        );
        Ok(summary)
    }

    /// Resolve one address synchronously through the same waterfall,
    /// without touching any store.
    pub fn match_single(&self, raw_address: &str) -> Result<SingleMatch, MatchError> {
        match_single(raw_address, &self.index, &self.normalize_cfg, &self.cfg)
    }

    fn decide(&self, stage: MatchMethod, tx: &Transaction) -> Option<MatchOutcome> {
        let normalized = tx.normalized.as_deref().unwrap_or("");
        match stage {
            MatchMethod::Exact => self.exact.match_one(&self.index, normalized),
            MatchMethod::Fuzzy => self.fuzzy.match_one(&self.index, normalized),
            MatchMethod::Phonetic => Some(self.phonetic.match_one(&self.index, normalized)),
        }
    }

    /// Normalize transactions that have not been parsed yet and persist the
    /// result, updating the in-memory copies for this stage's scoring.
    fn ensure_normalized(
        &self,
        stage: MatchMethod,
        pending: &mut [Transaction],
    ) -> Result<(), MatchError> {
        let mut writes = Vec::new();
        for tx in pending.iter_mut() {
            if tx.normalized.is_some() {
                continue;
            }
            let parsed = normalize(&tx.raw_address, &self.normalize_cfg)?;
            tx.normalized = Some(parsed.normalized.clone());
            tx.components = Some(parsed.components.clone());
            writes.push((tx.id, parsed));
        }

        if writes.is_empty() {
            return Ok(());
        }
        tracing::info!(stage = %stage, count = writes.len(), "persisting normalized addresses");
        for chunk in writes.chunks(self.cfg.batch_size) {
            self.write_with_retry(stage, || self.store.write_normalized(chunk))?;
        }
        Ok(())
    }

    /// Apply a batch write with bounded retries. On exhaustion the stage
    /// aborts; the failed batch's transactions keep their prior state.
    fn write_with_retry<F>(&self, stage: MatchMethod, mut write: F) -> Result<(), MatchError>
    where
        F: FnMut() -> Result<(), store::StoreError>,
    {
        let mut attempt = 0u32;
        loop {
            match write() {
                Ok(()) => return Ok(()),
                Err(source) => {
                    if attempt >= self.cfg.max_write_retries {
                        tracing::error!(
                            stage = %stage,
                            attempts = attempt + 1,
                            error = %source,
                            "batch write failed, aborting stage"
                        );
                        return Err(MatchError::Store { stage, source });
                    }
                    attempt += 1;
                    tracing::warn!(
                        stage = %stage,
                        attempt,
                        error = %source,
                        "batch write failed, retrying"
                    );
                }
            }
        }
    }
}

/// Resolve one raw address against the index: normalization, then the three
/// matchers in waterfall order. The batch engine and this path share the
/// same matcher implementations, so a synchronous lookup and a pipeline run
/// agree on every decision.
pub fn match_single(
    raw_address: &str,
    index: &CanonicalIndex,
    normalize_cfg: &NormalizeConfig,
    cfg: &MatcherConfig,
) -> Result<SingleMatch, MatchError> {
    cfg.validate()?;
    let parsed = normalize(raw_address, normalize_cfg)?;

    let exact = ExactMatcher::new();
    let fuzzy = FuzzyMatcher::new(cfg.fuzzy_threshold);
    let phonetic = PhoneticMatcher::new(cfg.phonetic_tiebreak_ratio, cfg.phonetic_confidence);

    let outcome = exact
        .match_one(index, &parsed.normalized)
        .or_else(|| fuzzy.match_one(index, &parsed.normalized))
        .unwrap_or_else(|| phonetic.match_one(index, &parsed.normalized));

    Ok(SingleMatch {
        normalized: parsed.normalized,
        components: parsed.components,
        outcome,
    })
}
