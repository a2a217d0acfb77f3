use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::num::NonZeroUsize;
use wordscout::search::{QueryLimits, QueryRecord};
use wordscout::{contains, run_batch, Execution};

fn create_haystack(words: usize) -> Vec<u8> {
    (0..words)
        .flat_map(|i| format!("word{}x{}\n", i, i % 97).into_bytes())
        .collect()
}

fn create_queries(count: usize) -> Vec<QueryRecord> {
    let lines: Vec<String> = (0..count)
        .map(|i| format!("word{}x{} extra", i * 13, (i * 13) % 97))
        .collect();
    QueryRecord::parse_all(lines.iter().map(String::as_str), &QueryLimits::default())
}

fn bench_single_pattern(c: &mut Criterion) {
    let haystack = create_haystack(50_000);
    let patterns: [&[u8]; 3] = [b"word49999x44", b"zzzzzzzzzzzz", b"x"];

    let mut group = c.benchmark_group("Single Pattern");
    for (i, pattern) in patterns.iter().enumerate() {
        group.bench_function(format!("pattern_{}", i), |b| {
            b.iter(|| black_box(contains(&haystack, pattern)));
        });
    }
    group.finish();
}

fn bench_batch_scaling(c: &mut Criterion) {
    let haystack = create_haystack(20_000);
    let queries = create_queries(500);

    let mut group = c.benchmark_group("Batch Scaling");
    group.sample_size(10);
    group.bench_function("sequential", |b| {
        b.iter(|| black_box(run_batch(&haystack, &queries, Execution::Sequential).unwrap()));
    });
    for threads in [2, 4, 8] {
        let execution = Execution::Parallel {
            threads: NonZeroUsize::new(threads).unwrap(),
        };
        group.bench_with_input(BenchmarkId::new("parallel", threads), &execution, |b, &e| {
            b.iter(|| black_box(run_batch(&haystack, &queries, e).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_single_pattern, bench_batch_scaling);
criterion_main!(benches);
