//! Utilities for working with probabilities.

pub trait SliceExt {
    fn sum(&self) -> f64;

    /// The arithmetic mean, or `None` for an empty slice.
    fn mean(&self) -> Option<f64>;
}
impl SliceExt for [f64] {
    fn sum(&self) -> f64 {
        self.iter().sum()
    }

    fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum() / self.len() as f64)
        }
    }
}
