//! Benchmarks for range splitting and filter compilation
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use querysplit::split::RangeChunker;
use querysplit::traceql::{compile, FilterDescriptor, FilterKind, ValueType};

fn create_test_filters(count: usize) -> Vec<FilterDescriptor> {
    (0..count)
        .map(|i| {
            let filter = FilterDescriptor::new(format!("f{}", i), FilterKind::Dynamic)
                .with_tag(format!("tag{}", i))
                .with_operator("=");
            // every third row is still being edited
            if i % 3 == 0 {
                filter
            } else {
                filter
                    .with_value(i.to_string())
                    .with_value_type(ValueType::Integer)
            }
        })
        .collect()
}

fn bench_chunker(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunker");
    let chunker = RangeChunker::default();

    group.bench_function("metric_day_at_1m_step", |b| {
        b.iter(|| {
            chunker.chunk(
                black_box(1_644_105_600_003),
                black_box(1_644_192_000_003),
                black_box(60_000),
                black_box(3_600_000),
            )
        })
    });

    group.bench_function("metric_over_cap", |b| {
        b.iter(|| chunker.chunk(black_box(0), black_box(86_400_000), black_box(10_000), black_box(20_000)))
    });

    group.bench_function("logs_day_hourly", |b| {
        b.iter(|| chunker.log_chunks(black_box(0), black_box(86_400_000), black_box(3_600_000)))
    });

    group.finish();
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("traceql");

    for size in [1, 10, 100] {
        let filters = create_test_filters(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("compile_{}", size), |b| {
            b.iter(|| compile(black_box(&filters)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_chunker, bench_compile);
criterion_main!(benches);
