//! Testing helpers.

use assert_float_eq::*;

/// Asserts that two slices are of equal length and that each pair of elements lies within
/// `distance` ULPs of one another.
pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

/// Asserts that two slices are of equal length and that each pair of elements agrees to within
/// a relative `epsilon`.
pub fn assert_slice_f64_relative(expected: &[f64], actual: &[f64], epsilon: f64) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_float_relative_eq!(expected, actual, epsilon);
        }
    }
}

/// Asserts that every element of `actual` is finite and non-negative.
pub fn assert_slice_f64_non_negative(actual: &[f64]) {
    for (index, &value) in actual.iter().enumerate() {
        assert!(
            value.is_finite() && value >= 0.0,
            "element {index} is not a finite non-negative number: {value}"
        );
    }
}
