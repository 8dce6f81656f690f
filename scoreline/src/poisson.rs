//! Point probabilities of the Poisson distribution.

/// Probability of observing exactly `k` events from a Poisson process with mean `lambda`.
///
/// A negative `k` is an impossible count and has zero probability. A zero `lambda` is the
/// degenerate distribution that places all of its mass on `k = 0`.
///
/// The product `e^(-λ) · λ^k / k!` is accumulated one factor at a time, which keeps the
/// intermediate terms bounded where a separate `λ^k` and `k!` would overflow.
#[inline]
pub fn univariate(k: i16, lambda: f64) -> f64 {
    if k < 0 {
        return 0.0;
    }
    if lambda == 0.0 {
        return if k == 0 { 1.0 } else { 0.0 };
    }

    let mut prob = f64::exp(-lambda);
    for i in 1..=k {
        prob *= lambda / i as f64;
    }
    prob
}

/// Probabilities for `k = 0..=max_k`, each term derived from its predecessor. Agrees with
/// [univariate] term by term.
pub fn univariate_series(lambda: f64, max_k: u8) -> Vec<f64> {
    let mut series = Vec::with_capacity(max_k as usize + 1);
    if lambda == 0.0 {
        series.push(1.0);
        series.resize(max_k as usize + 1, 0.0);
        return series;
    }

    let mut prob = f64::exp(-lambda);
    series.push(prob);
    for i in 1..=max_k {
        prob *= lambda / i as f64;
        series.push(prob);
    }
    series
}
