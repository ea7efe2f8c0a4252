//! Per-chunk fade processing
//!
//! Applies a fade-in at the head and a fade-out at the tail of a chunk so that
//! synthesized speech does not start or stop with a click. Both fades are
//! applied independently; on a chunk shorter than two fades they overlap.

use crate::audio::types::AudioBuffer;
use narro_common::FadeCurve;
use tracing::debug;

/// Fade the first `fade_frames` frames in (clamped to the buffer length)
pub fn apply_fade_in(buffer: &mut AudioBuffer, fade_frames: usize, curve: FadeCurve) {
    let frames = fade_frames.min(buffer.frame_count());
    if frames == 0 {
        return;
    }

    let channels = buffer.channels() as usize;
    for (frame_idx, frame) in buffer
        .samples_mut()
        .chunks_exact_mut(channels)
        .take(frames)
        .enumerate()
    {
        let gain = curve.fade_in_gain(frame_idx as f32 / frames as f32);
        for sample in frame {
            *sample *= gain;
        }
    }
}

/// Fade the last `fade_frames` frames out (clamped to the buffer length)
///
/// The final frame reaches the curve's end gain.
pub fn apply_fade_out(buffer: &mut AudioBuffer, fade_frames: usize, curve: FadeCurve) {
    let total = buffer.frame_count();
    let frames = fade_frames.min(total);
    if frames == 0 {
        return;
    }

    let channels = buffer.channels() as usize;
    let start = total - frames;
    for (offset, frame) in buffer.samples_mut()[start * channels..]
        .chunks_exact_mut(channels)
        .enumerate()
    {
        let gain = curve.fade_out_gain((offset + 1) as f32 / frames as f32);
        for sample in frame {
            *sample *= gain;
        }
    }
}

/// Fade both edges of a chunk by `fade_ms`; `0` leaves the chunk untouched
pub fn apply_edge_fades(buffer: &mut AudioBuffer, fade_ms: u32, curve: FadeCurve) {
    if fade_ms == 0 || buffer.is_empty() {
        return;
    }

    let requested = buffer.format().ms_to_frames(fade_ms);
    let frames = requested.min(buffer.frame_count());
    if frames < requested {
        debug!(
            "Fade of {}ms clamped to chunk length ({} frames)",
            fade_ms, frames
        );
    }

    apply_fade_in(buffer, frames, curve);
    apply_fade_out(buffer, frames, curve);
}
