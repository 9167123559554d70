//! Benchmarks for leaderboard ranking
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use trackie::ranking::{compute_score, ActivityRecord, RankingEngine};

fn create_test_records(count: usize) -> Vec<ActivityRecord> {
    (0..count as u64)
        .map(|i| {
            ActivityRecord::new(format!("user{}", i))
                .squats((i * 37) % 500)
                .pushups((i * 11) % 200)
                .jumping_jacks((i * 53) % 300)
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    c.bench_function("compute_score", |b| {
        b.iter(|| compute_score(black_box(120), black_box(45), black_box(300)))
    });
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank");

    for size in [10, 1000, 100000] {
        let records = create_test_records(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("rank_{}", size), |b| {
            b.iter(|| RankingEngine::rank(black_box(&records), Some("user7")))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_score, bench_rank);
criterion_main!(benches);
