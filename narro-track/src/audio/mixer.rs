//! Joining chunks into a track
//!
//! Two ways to append the next chunk to the accumulated samples: an
//! overlapping crossfade, or a silence gap followed by the chunk.

use narro_common::FadeCurve;

/// Append `next` so that its head overlaps the tail of `track` for
/// `overlap_frames` frames.
///
/// The overlap is clamped to both lengths. In the overlap the track is faded
/// out and `next` faded in with the same curve; the mix is clamped to full
/// scale. Returns the number of frames actually overlapped.
pub fn append_with_crossfade(
    track: &mut Vec<f32>,
    next: &[f32],
    channels: usize,
    overlap_frames: usize,
    curve: FadeCurve,
) -> usize {
    let track_frames = track.len() / channels;
    let next_frames = next.len() / channels;
    let overlap = overlap_frames.min(track_frames).min(next_frames);

    if overlap > 0 {
        let tail_start = (track_frames - overlap) * channels;
        for (frame_idx, (out, incoming)) in track[tail_start..]
            .chunks_exact_mut(channels)
            .zip(next.chunks_exact(channels))
            .enumerate()
        {
            let progress = (frame_idx + 1) as f32 / (overlap + 1) as f32;
            let out_gain = curve.fade_out_gain(progress);
            let in_gain = curve.fade_in_gain(progress);

            for (current, incoming) in out.iter_mut().zip(incoming) {
                *current = (*current * out_gain + *incoming * in_gain).clamp(-1.0, 1.0);
            }
        }
    }

    track.extend_from_slice(&next[overlap * channels..]);
    overlap
}

/// Append `gap_frames` frames of silence and then `next`
pub fn append_with_gap(track: &mut Vec<f32>, next: &[f32], channels: usize, gap_frames: usize) {
    track.reserve(gap_frames * channels + next.len());
    track.resize(track.len() + gap_frames * channels, 0.0);
    track.extend_from_slice(next);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gap_inserts_silence() {
        let mut track = vec![1.0, 1.0];
        append_with_gap(&mut track, &[0.5, 0.5], 2, 2);
        assert_eq!(track, vec![1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_zero_gap_concatenates() {
        let mut track = vec![1.0];
        append_with_gap(&mut track, &[2.0, 3.0], 1, 0);
        assert_eq!(track, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_crossfade_shortens_by_overlap() {
        let mut track = vec![0.5; 100];
        let overlapped = append_with_crossfade(&mut track, &[0.5; 100], 1, 20, FadeCurve::Linear);
        assert_eq!(overlapped, 20);
        assert_eq!(track.len(), 180);
    }

    #[test]
    fn test_linear_crossfade_of_equal_signals_is_flat() {
        let mut track = vec![0.5; 50];
        append_with_crossfade(&mut track, &[0.5; 50], 1, 10, FadeCurve::Linear);
        assert!(track.iter().all(|s| (s - 0.5).abs() < 1e-6));
    }

    #[test]
    fn test_crossfade_clamped_to_next_chunk() {
        let mut track = vec![0.2; 100];
        let overlapped = append_with_crossfade(&mut track, &[0.2; 5], 1, 20, FadeCurve::EqualPower);
        assert_eq!(overlapped, 5);
        assert_eq!(track.len(), 100);
    }

    #[test]
    fn test_crossfade_stereo_mix_is_clamped() {
        let mut track = vec![1.0; 20];
        append_with_crossfade(&mut track, &[1.0; 20], 2, 10, FadeCurve::EqualPower);
        assert_eq!(track.len(), 20);
        assert!(track.iter().all(|s| *s <= 1.0));
    }
}
