//! Loudness matching between two tracks
//!
//! When the RMS levels of two tracks differ by more than a tolerance, the
//! quieter one is boosted by the difference, capped at [`MAX_GAIN_DB`]. The
//! louder track is never touched.

use crate::analysis::rms_dbfs;
use crate::audio::gain::apply_gain_db;
use crate::audio::types::Track;
use crate::error::{Error, Result};
use serde::Serialize;
use tracing::{debug, info};

/// Largest boost applied to the quieter track
pub const MAX_GAIN_DB: f64 = 6.0;

/// Which of the two tracks a gain applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackSide {
    A,
    B,
}

/// Gain to apply to one track
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GainAdjustment {
    pub target: TrackSide,
    pub gain_db: f64,
}

/// Decide whether and how much to boost the quieter track
pub fn plan_gain(rms_a: f64, rms_b: f64, max_diff_db: f64) -> Option<GainAdjustment> {
    let diff = (rms_a - rms_b).abs();
    if diff <= max_diff_db {
        return None;
    }

    let target = if rms_a < rms_b { TrackSide::A } else { TrackSide::B };
    Some(GainAdjustment {
        target,
        gain_db: diff.min(MAX_GAIN_DB),
    })
}

/// Return both tracks with the quieter one boosted when they differ by more
/// than `max_diff_db`
///
/// Within tolerance both tracks come back exactly as given.
pub fn match_volume(a: Track, b: Track, max_diff_db: f64) -> Result<(Track, Track)> {
    if !max_diff_db.is_finite() || max_diff_db < 0.0 {
        return Err(Error::Config(format!(
            "max_diff_db must be a non-negative number, got {}",
            max_diff_db
        )));
    }

    let rms_a = rms_dbfs(a.buffer().samples());
    let rms_b = rms_dbfs(b.buffer().samples());

    let Some(adjustment) = plan_gain(rms_a, rms_b, max_diff_db) else {
        debug!(
            "Levels within {:.2} dB ({:.2} vs {:.2} dBFS), no adjustment",
            max_diff_db, rms_a, rms_b
        );
        return Ok((a, b));
    };

    info!(
        "Boosting track {:?} by {:.2} dB ({:.2} vs {:.2} dBFS)",
        adjustment.target, adjustment.gain_db, rms_a, rms_b
    );

    Ok(match adjustment.target {
        TrackSide::A => (boost(a, adjustment.gain_db), b),
        TrackSide::B => (a, boost(b, adjustment.gain_db)),
    })
}

fn boost(track: Track, gain_db: f64) -> Track {
    let mut buffer = track.into_buffer();
    apply_gain_db(buffer.samples_mut(), gain_db);
    Track::new(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_within_tolerance() {
        assert_eq!(plan_gain(-20.0, -21.0, 1.5), None);
        assert_eq!(plan_gain(-20.0, -21.5, 1.5), None);
    }

    #[test]
    fn test_plan_boosts_quieter() {
        assert_eq!(
            plan_gain(-20.0, -23.0, 1.5),
            Some(GainAdjustment {
                target: TrackSide::B,
                gain_db: 3.0
            })
        );
        assert_eq!(
            plan_gain(-30.0, -20.0, 1.5),
            Some(GainAdjustment {
                target: TrackSide::A,
                gain_db: MAX_GAIN_DB
            })
        );
    }

    #[test]
    fn test_zero_tolerance() {
        assert!(plan_gain(-20.0, -20.0, 0.0).is_none());
        assert!(plan_gain(-20.0, -20.1, 0.0).is_some());
    }
}
