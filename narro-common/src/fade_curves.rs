//! Fade curves for chunk edges and crossfades
//!
//! Gains are evaluated at a normalized position `t` in `[0.0, 1.0]` through the
//! fade. Fade-in rises from 0.0 to 1.0, fade-out falls from 1.0 to 0.0.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::fmt;
use std::str::FromStr;

/// Shape of a gain ramp
///
/// - Linear: constant rate of change, `v(t) = t`
/// - SCurve: smooth start and finish, `v(t) = 0.5 × (1 - cos(π × t))`
/// - EqualPower: `v(t) = sin(t × π/2)`; a fade-in/fade-out pair keeps the summed
///   power constant, which avoids the loudness dip of a linear crossfade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    Linear,
    SCurve,
    EqualPower,
}

impl FadeCurve {
    /// Fade-in gain at `position` (clamped to `[0.0, 1.0]`)
    pub fn fade_in_gain(&self, position: f32) -> f32 {
        let t = position.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => t,
            FadeCurve::SCurve => 0.5 * (1.0 - (PI * t).cos()),
            FadeCurve::EqualPower => (t * FRAC_PI_2).sin(),
        }
    }

    /// Fade-out gain at `position` (clamped to `[0.0, 1.0]`)
    pub fn fade_out_gain(&self, position: f32) -> f32 {
        let t = position.clamp(0.0, 1.0);

        match self {
            FadeCurve::Linear => 1.0 - t,
            FadeCurve::SCurve => 0.5 * (1.0 + (PI * t).cos()),
            FadeCurve::EqualPower => (t * FRAC_PI_2).cos(),
        }
    }

    /// Configuration string for this curve
    pub fn as_str(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "linear",
            FadeCurve::SCurve => "s_curve",
            FadeCurve::EqualPower => "equal_power",
        }
    }

    pub fn all_variants() -> &'static [FadeCurve] {
        &[FadeCurve::Linear, FadeCurve::SCurve, FadeCurve::EqualPower]
    }
}

impl Default for FadeCurve {
    fn default() -> Self {
        FadeCurve::Linear
    }
}

impl FromStr for FadeCurve {
    type Err = Error;

    /// Accepts `linear`, `s_curve` (also `scurve`, `s-curve`, `cosine`) and
    /// `equal_power` (also `equalpower`), case-insensitive
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "linear" => Ok(FadeCurve::Linear),
            "s_curve" | "scurve" | "s-curve" | "cosine" => Ok(FadeCurve::SCurve),
            "equal_power" | "equalpower" => Ok(FadeCurve::EqualPower),
            other => Err(Error::Config(format!("unknown fade curve '{}'", other))),
        }
    }
}

impl fmt::Display for FadeCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
