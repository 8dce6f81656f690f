use criterion::{black_box, criterion_group, criterion_main, Criterion};

use scoreline::poisson;

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("cri_poisson_univariate_0_to_10", |b| {
        b.iter(|| {
            let mut sum = 0.0;
            for k in 0..=10 {
                sum += poisson::univariate(black_box(k), black_box(1.65));
            }
            sum
        });
    });

    c.bench_function("cri_poisson_series_10", |b| {
        b.iter(|| poisson::univariate_series(black_box(1.65), 10));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
