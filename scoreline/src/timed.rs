//! Timing of computations.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq)]
pub struct Timed<V> {
    pub value: V,
    pub elapsed: Duration,
}
impl<V> Timed<V> {
    pub fn value(f: impl FnOnce() -> V) -> Timed<V> {
        let start_time = Instant::now();
        let value = f();
        Timed {
            value,
            elapsed: start_time.elapsed(),
        }
    }

    pub fn result<E>(f: impl FnOnce() -> Result<V, E>) -> Result<Timed<V>, E> {
        let start_time = Instant::now();
        f().map(|value| Timed {
            value,
            elapsed: start_time.elapsed(),
        })
    }

    pub async fn future<F>(f: F) -> Timed<V>
    where
        F: std::future::Future<Output = V>,
    {
        let start_time = Instant::now();
        let value = f.await;
        Timed {
            value,
            elapsed: start_time.elapsed(),
        }
    }
}
