use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scoreline_soccer::scoregrid::{compute, Detail, DEFAULT_MAX_GOALS, LEGACY_MAX_GOALS};

fn criterion_benchmark(c: &mut Criterion) {
    // sanity check
    let distribution = compute(1.6, 1.1, DEFAULT_MAX_GOALS, Detail::Summary);
    assert!(distribution.probs.booksum() > 0.99);

    c.bench_function("cri_scoregrid_summary_6", |b| {
        b.iter(|| compute(black_box(1.6), black_box(1.1), DEFAULT_MAX_GOALS, Detail::Summary));
    });

    c.bench_function("cri_scoregrid_full_6", |b| {
        b.iter(|| compute(black_box(1.6), black_box(1.1), DEFAULT_MAX_GOALS, Detail::Full));
    });

    c.bench_function("cri_scoregrid_summary_10", |b| {
        b.iter(|| compute(black_box(1.6), black_box(1.1), LEGACY_MAX_GOALS, Detail::Summary));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
