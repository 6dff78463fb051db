//! Workspace umbrella crate for the address record-linkage engine.
//!
//! This crate stitches together normalization, registry indexing, and the
//! three-stage match waterfall so callers can run the
//! whole pipeline, or resolve a single address, with one API entry point.

mod config;

pub use config::{AddrlinkConfig, ConfigLoadError};

pub use matcher::{
    match_single, ExactMatcher, FuzzyMatcher, MatchError, MatcherConfig, PhoneticMatcher,
    RunSummary, SingleMatch, StageSummary, WaterfallEngine,
};
pub use normalize::{
    normalize, phonetic_keys, AddressComponents, NormalizeConfig, NormalizeError,
    NormalizedAddress, PhoneticKeys,
};
pub use registry::{CanonicalAddress, CanonicalIndex, IndexConfig, RegistryError};
pub use store::{
    InMemoryStore, MatchMethod, MatchOutcome, StoreError, Transaction, TransactionStore,
    UnmatchReason,
};

use std::sync::Arc;

use thiserror::Error;

/// Errors that can occur while running the pipeline end to end.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("normalization failure: {0}")]
    Normalize(#[from] NormalizeError),
    #[error("registry failure: {0}")]
    Registry(#[from] RegistryError),
    #[error("matching failure: {0}")]
    Match(#[from] MatchError),
    #[error("storage failure: {0}")]
    Store(#[from] StoreError),
}

/// Build canonical records from raw registry rows using the configured
/// normalizer. Rows are `(id, raw address line)` pairs.
pub fn registry_from_raw<I, S>(
    rows: I,
    cfg: &NormalizeConfig,
) -> Result<Vec<CanonicalAddress>, PipelineError>
where
    I: IntoIterator<Item = (u64, S)>,
    S: AsRef<str>,
{
    let mut records = Vec::new();
    for (id, raw) in rows {
        records.push(CanonicalAddress::from_raw(id, raw.as_ref(), cfg)?);
    }
    Ok(records)
}

/// Build the in-memory canonical index for a run.
///
/// Fails fast with [`RegistryError::CapacityExceeded`] when the registry is
/// larger than the configured cap, before any matching starts.
pub fn build_index(
    records: Vec<CanonicalAddress>,
    cfg: &AddrlinkConfig,
) -> Result<CanonicalIndex, PipelineError> {
    Ok(CanonicalIndex::build(records, cfg.index.clone())?)
}

/// Run the full waterfall (exact, fuzzy, phonetic) over the unresolved
/// transactions in `store`, persisting results after each stage.
pub fn run_waterfall(
    index: Arc<CanonicalIndex>,
    store: Arc<dyn TransactionStore>,
    cfg: &AddrlinkConfig,
) -> Result<RunSummary, PipelineError> {
    let engine = WaterfallEngine::new(
        index,
        store,
        cfg.normalize.clone(),
        cfg.matcher.clone(),
    )?;
    Ok(engine.run()?)
}

/// Resolve one raw address synchronously against an existing index, with the
/// same outcome contract as the batch path.
pub fn lookup_address(
    raw_address: &str,
    index: &CanonicalIndex,
    cfg: &AddrlinkConfig,
) -> Result<SingleMatch, PipelineError> {
    Ok(match_single(
        raw_address,
        index,
        &cfg.normalize,
        &cfg.matcher,
    )?)
}
