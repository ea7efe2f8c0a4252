//! Level helpers for integration tests
//!
//! Computed independently of the library so assertions do not reuse the code
//! they check.

#![allow(dead_code)]

/// RMS of all samples in dBFS (-inf for silence)
pub fn rms_db(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return f64::NEG_INFINITY;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64).powi(2)).sum();
    20.0 * (sum / samples.len() as f64).sqrt().log10()
}

/// Assert `actual` is within `tolerance` of `expected`
#[track_caller]
pub fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() <= tolerance,
        "expected {} ± {}, got {}",
        expected,
        tolerance,
        actual
    );
}
