use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use financewise::stores::LedgerStore;
use std::fs;
use std::time::Duration;

const NUM_TRANSACTIONS: u64 = 100_000;

/// Writes a ledger file in the on-disk format without going through the
/// store, so setup does not pay for one rewrite per entry.
fn write_ledger(dir: &std::path::Path, username: &str) {
    let entries: Vec<serde_json::Value> = (0..NUM_TRANSACTIONS)
        .map(|i| {
            let tx_type = if i % 3 == 0 { "expense" } else { "income" };
            serde_json::json!({
                "type": tx_type,
                "amount": (i % 500) as f64 + 0.25,
                "description": format!("entry {}", i),
            })
        })
        .collect();
    let path = dir.join(format!("{}_transactions.json", username));
    fs::write(path, serde_json::to_vec(&entries).unwrap()).unwrap();
}

fn load_and_summarize(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(dir.path(), "bench");

    let mut group = c.benchmark_group("throughput");
    group.throughput(Throughput::Elements(NUM_TRANSACTIONS));
    group.measurement_time(Duration::from_secs(20));
    group.sample_size(20);

    group.bench_function("load_100K_transactions", |b| {
        b.iter(|| LedgerStore::open(dir.path(), "bench").unwrap());
    });

    let ledger = LedgerStore::open(dir.path(), "bench").unwrap();
    group.bench_function("summary_100K_transactions", |b| {
        b.iter(|| ledger.summary().unwrap());
    });

    group.finish();
}

criterion_group!(benches, load_and_summarize);
criterion_main!(benches);
