use std::sync::Arc;

use addrlink::{
    build_index, lookup_address, registry_from_raw, run_waterfall, AddrlinkConfig, InMemoryStore,
    MatchMethod, MatchOutcome, Transaction, TransactionStore, UnmatchReason,
};

fn config() -> AddrlinkConfig {
    AddrlinkConfig::from_yaml(
        r#"
version: "1.0"
name: "integration"
matcher:
  fuzzy_threshold: 0.8
  phonetic_tiebreak_ratio: 85.0
  phonetic_confidence: 0.9
"#,
    )
    .expect("config parses")
}

fn seeded_pipeline() -> (Arc<addrlink::CanonicalIndex>, Arc<InMemoryStore>, AddrlinkConfig) {
    let cfg = config();
    let records = registry_from_raw(
        vec![
            (1, "123 Main St"),
            (2, "1200 Willowbrook Ln"),
            (3, "789 Elm Blvd"),
        ],
        &cfg.normalize,
    )
    .expect("registry builds");
    let index = Arc::new(build_index(records, &cfg).expect("index builds"));

    let store = Arc::new(InMemoryStore::seed(vec![
        Transaction::new(101, "123 Main Street"),
        Transaction::new(102, "1200 Willowbrok Lane"),
        Transaction::new(103, "789 Ellm Boulevard"),
        Transaction::new(104, "999 Nonexistent Rd"),
    ]));

    (index, store, cfg)
}

#[test]
fn waterfall_assigns_the_expected_method_per_transaction() {
    let (index, store, cfg) = seeded_pipeline();

    let summary = run_waterfall(index, store.clone(), &cfg).expect("run succeeds");

    let by_id = |id: u64| {
        store
            .get(id)
            .expect("get succeeds")
            .expect("present")
            .outcome
    };

    // Same normalized string: exact, confidence pinned to 1.0.
    assert_eq!(
        by_id(101),
        MatchOutcome::Matched {
            canonical_id: 1,
            method: MatchMethod::Exact,
            confidence: 1.0,
        }
    );

    // Typo beyond the blocking prefix: fuzzy, similarity as confidence.
    match by_id(102) {
        MatchOutcome::Matched {
            canonical_id: 2,
            method: MatchMethod::Fuzzy,
            confidence,
        } => assert!(confidence >= 0.8),
        other => panic!("transaction 102: {other:?}"),
    }

    // Different prefix but sound-alike: phonetic.
    match by_id(103) {
        MatchOutcome::Matched {
            canonical_id: 3,
            method: MatchMethod::Phonetic,
            confidence,
        } => assert!(confidence >= 0.9),
        other => panic!("transaction 103: {other:?}"),
    }

    // No block anywhere: terminally unmatched with the block-miss reason.
    assert_eq!(
        by_id(104),
        MatchOutcome::Unmatched {
            reason: UnmatchReason::EmptyPhoneticBlock,
        }
    );

    assert_eq!(summary.stages.len(), 3);
    assert_eq!(summary.total_matched(), 3);
    assert_eq!(summary.total_unmatched(), 1);
}

#[test]
fn every_transaction_ends_in_a_terminal_state() {
    let (index, store, cfg) = seeded_pipeline();
    run_waterfall(index, store.clone(), &cfg).expect("run succeeds");

    for tx in store.load_all().expect("load all") {
        match tx.outcome {
            MatchOutcome::Matched {
                confidence,
                canonical_id,
                ..
            } => {
                assert!((0.0..=1.0).contains(&confidence), "tx {}", tx.id);
                assert!(canonical_id > 0, "tx {}", tx.id);
            }
            MatchOutcome::Unmatched { .. } => {}
            MatchOutcome::Unresolved => panic!("transaction {} left unresolved", tx.id),
        }
        // Normalization was persisted for every row the run touched.
        assert!(tx.normalized.is_some(), "tx {}", tx.id);
    }
}

#[test]
fn rerunning_a_finished_pipeline_changes_nothing() {
    let (index, store, cfg) = seeded_pipeline();

    run_waterfall(index.clone(), store.clone(), &cfg).expect("first run");
    let before = store.load_all().expect("snapshot");

    run_waterfall(index, store.clone(), &cfg).expect("second run");
    let after = store.load_all().expect("snapshot");

    assert_eq!(before, after);
}

#[test]
fn single_lookup_contract_matches_the_batch_contract() {
    let (index, store, cfg) = seeded_pipeline();
    run_waterfall(index.clone(), store.clone(), &cfg).expect("run succeeds");

    for (id, raw) in [
        (101, "123 Main Street"),
        (102, "1200 Willowbrok Lane"),
        (103, "789 Ellm Boulevard"),
        (104, "999 Nonexistent Rd"),
    ] {
        let single = lookup_address(raw, &index, &cfg).expect("lookup succeeds");
        let batch = store
            .get(id)
            .expect("get succeeds")
            .expect("present")
            .outcome;
        assert_eq!(single.outcome, batch, "for {raw}");
    }
}

#[test]
fn partially_matched_stores_resume_cleanly() {
    let (index, store, cfg) = seeded_pipeline();

    // Simulate a run that stopped after the exact stage.
    let engine = addrlink::WaterfallEngine::new(
        index.clone(),
        store.clone(),
        cfg.normalize.clone(),
        cfg.matcher.clone(),
    )
    .expect("engine builds");
    engine.run_stage(MatchMethod::Exact).expect("exact stage");

    let resolved_before = store
        .load_all()
        .expect("load")
        .iter()
        .filter(|tx| tx.outcome.is_resolved())
        .count();
    assert_eq!(resolved_before, 1);

    // A full re-run picks up where the stage boundary left off.
    run_waterfall(index, store.clone(), &cfg).expect("resumed run");
    assert!(store.load_unresolved().expect("load").is_empty());
}
