//! Level conversion and gain
//!
//! dBFS values are floored at [`DBFS_FLOOR`] so digital silence stays finite
//! and serializable.

use crate::audio::types::AudioBuffer;
use tracing::debug;

/// Lowest level reported, used for digital silence
pub const DBFS_FLOOR: f64 = -120.0;

/// Peak level after normalization
pub const NORMALIZE_HEADROOM_DBFS: f64 = -0.1;

/// Convert a linear amplitude to dBFS, floored at [`DBFS_FLOOR`]
pub fn linear_to_dbfs(amplitude: f64) -> f64 {
    if amplitude <= 0.0 || !amplitude.is_finite() {
        return DBFS_FLOOR;
    }
    (20.0 * amplitude.log10()).max(DBFS_FLOOR)
}

pub fn db_to_linear(db: f64) -> f64 {
    10f64.powf(db / 20.0)
}

/// Root mean square over every sample (all channels)
pub fn rms(samples: &[f32]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / samples.len() as f64).sqrt()
}

/// Largest absolute sample value
pub fn peak(samples: &[f32]) -> f64 {
    samples
        .iter()
        .fold(0.0f32, |acc, &s| acc.max(s.abs()))
        .into()
}

/// Multiply every sample by `factor`, clamping to full scale
pub fn apply_linear_gain(samples: &mut [f32], factor: f64) {
    let factor = factor as f32;
    for sample in samples {
        *sample = (*sample * factor).clamp(-1.0, 1.0);
    }
}

/// Apply `gain_db` decibels of gain, clamping to full scale
pub fn apply_gain_db(samples: &mut [f32], gain_db: f64) {
    apply_linear_gain(samples, db_to_linear(gain_db));
}

/// Scale the buffer so its peak sits at `target_dbfs`
///
/// Returns the applied gain in dB, or `None` for a silent buffer, which is
/// left untouched.
pub fn peak_normalize(buffer: &mut AudioBuffer, target_dbfs: f64) -> Option<f64> {
    let current = peak(buffer.samples());
    if current <= 0.0 {
        debug!("Skipping normalization of silent buffer");
        return None;
    }

    let factor = db_to_linear(target_dbfs) / current;
    apply_linear_gain(buffer.samples_mut(), factor);

    let gain_db = 20.0 * factor.log10();
    debug!(
        "Peak normalized from {:.2} dBFS to {:.2} dBFS ({:+.2} dB)",
        linear_to_dbfs(current),
        target_dbfs,
        gain_db
    );
    Some(gain_db)
}
