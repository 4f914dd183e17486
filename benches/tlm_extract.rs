use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use tlm_extract::analysis::analyze;
use tlm_extract::tlm::{RawEntry, TestConditions, ValidationOptions};

fn build_entries(n: usize) -> Vec<RawEntry> {
    // R = 40 d + 30 at 5 V, with every tenth field left blank.
    (0..n)
        .map(|i| {
            let d = 2.0 + i as f64 * 0.5;
            let current = (i % 10 != 9).then(|| (5.0e3 / (40.0 * d + 30.0)).to_string());
            RawEntry::new(d, current)
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("tlm_analyze");
    let conditions = TestConditions::new(100.0, 5.0).expect("valid conditions");
    let options = ValidationOptions::default();

    for n in [7, 1_000, 100_000] {
        group.bench_function(BenchmarkId::new("analyze", n), |b| {
            b.iter_batched(
                || build_entries(n),
                |entries| {
                    let _ = analyze(&entries, &conditions, &options);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
