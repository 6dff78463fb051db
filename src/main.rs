use std::error::Error;
use std::sync::Arc;

use addrlink::{
    build_index, lookup_address, registry_from_raw, run_waterfall, AddrlinkConfig, InMemoryStore,
    MatchOutcome, Transaction, TransactionStore,
};

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = AddrlinkConfig::default();

    let records = registry_from_raw(
        vec![
            (1, "123 Main St"),
            (2, "456 Oak Ave"),
            (3, "789 Elm Blvd"),
            (4, "1200 Willowbrook Ln"),
        ],
        &cfg.normalize,
    )?;
    let index = Arc::new(build_index(records, &cfg)?);

    let store = Arc::new(InMemoryStore::seed(vec![
        Transaction::new(101, "123 Main Street"),
        Transaction::new(102, "1200 Willowbrok Lane"),
        Transaction::new(103, "789 Ellm Boulevard"),
        Transaction::new(104, "999 Nonexistent Rd"),
    ]));

    let summary = run_waterfall(index.clone(), store.clone(), &cfg)?;
    println!(
        "waterfall finished: {} matched, {} unmatched",
        summary.total_matched(),
        summary.total_unmatched()
    );

    for tx in store.load_all()? {
        match tx.outcome {
            MatchOutcome::Matched {
                canonical_id,
                method,
                confidence,
            } => println!(
                "  #{} {:<24} -> canonical {} ({}, confidence {:.3})",
                tx.id, tx.raw_address, canonical_id, method, confidence
            ),
            MatchOutcome::Unmatched { reason } => {
                println!("  #{} {:<24} -> unmatched: {}", tx.id, tx.raw_address, reason)
            }
            MatchOutcome::Unresolved => {
                println!("  #{} {:<24} -> unresolved", tx.id, tx.raw_address)
            }
        }
    }

    let single = lookup_address("456 Oak Avenue", &index, &cfg)?;
    println!(
        "single lookup \"456 Oak Avenue\" -> {:?}",
        single.outcome
    );

    Ok(())
}
