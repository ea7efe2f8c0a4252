//! Track assembly
//!
//! Joins independently synthesized chunk buffers into one track:
//!
//! 1. Check every chunk against the first chunk's format
//! 2. Fade each chunk's edges by `fade_ms`
//! 3. Join chunk `i` to the track with a crossfade of `crossfade_ms` when the
//!    track is already that long, otherwise with the pause after chunk `i - 1`
//! 4. Change speed by resampling when `speed` differs from 1.0
//! 5. Peak-normalize to -0.1 dBFS when requested
//!
//! A build either returns a complete [`Track`] or an error; nothing partial is
//! ever handed back.

use crate::audio::fade::apply_edge_fades;
use crate::audio::gain::{peak_normalize, NORMALIZE_HEADROOM_DBFS};
use crate::audio::mixer::{append_with_crossfade, append_with_gap};
use crate::audio::resampler::{change_speed, needs_speed_change};
use crate::audio::types::{AudioBuffer, AudioFormat, Track};
use crate::error::{Error, Result};
use narro_common::{PauseTag, TrackOptions};
use tracing::{debug, info};

/// Assembles chunk buffers into a track with validated options
#[derive(Debug, Clone)]
pub struct TrackBuilder {
    options: TrackOptions,
}

impl TrackBuilder {
    /// Validate `options` up front so a build never starts with bad settings
    pub fn new(options: TrackOptions) -> Result<Self> {
        options.validate()?;
        Ok(Self { options })
    }

    pub fn options(&self) -> &TrackOptions {
        &self.options
    }

    /// Build a track from chunks in playback order
    ///
    /// `pause_plan[i]` is the pause after chunk `i` and must have one entry per
    /// chunk. An empty chunk list yields a zero-length track.
    pub fn build(&self, chunks: Vec<AudioBuffer>, pause_plan: &[PauseTag]) -> Result<Track> {
        if pause_plan.len() != chunks.len() {
            return Err(Error::Config(format!(
                "pause plan has {} entries for {} chunks",
                pause_plan.len(),
                chunks.len()
            )));
        }

        let Some(first) = chunks.first() else {
            debug!("No chunks to build, returning empty track");
            return Ok(Track::new(AudioBuffer::empty(AudioFormat::default())));
        };
        let format = first.format();

        for (i, chunk) in chunks.iter().enumerate() {
            if chunk.format() != format {
                return Err(Error::Build {
                    index: i + 1,
                    reason: format!(
                        "format {} differs from first chunk {}",
                        chunk.format(),
                        format
                    ),
                });
            }
        }

        let channels = format.channels as usize;
        let crossfade_frames = format.ms_to_frames(self.options.crossfade_ms);
        let chunk_count = chunks.len();
        let mut track: Vec<f32> = Vec::new();
        let mut crossfades = 0usize;

        for (i, mut chunk) in chunks.into_iter().enumerate() {
            apply_edge_fades(&mut chunk, self.options.fade_ms, self.options.fade_curve);

            if i == 0 {
                track = chunk.into_samples();
                continue;
            }

            let track_frames = track.len() / channels;
            if self.options.crossfade_ms > 0 && track_frames >= crossfade_frames {
                let overlap = append_with_crossfade(
                    &mut track,
                    chunk.samples(),
                    channels,
                    crossfade_frames,
                    self.options.crossfade_curve,
                );
                crossfades += 1;
                debug!("Chunk {}: crossfaded over {} frames", i + 1, overlap);
            } else {
                let pause = pause_plan[i - 1];
                let seconds = self.options.pause_profile.seconds_for(pause);
                let gap_frames = format.seconds_to_frames(seconds);
                append_with_gap(&mut track, chunk.samples(), channels, gap_frames);
                debug!("Chunk {}: {} pause of {:.2}s", i + 1, pause, seconds);
            }
        }

        let mut buffer = AudioBuffer::new(track, format)?;

        if needs_speed_change(self.options.speed) {
            buffer = change_speed(buffer, self.options.speed)?;
        }

        if self.options.normalize {
            peak_normalize(&mut buffer, NORMALIZE_HEADROOM_DBFS);
        }

        let track = Track::new(buffer);
        info!(
            "Built track from {} chunks: {:.2}s ({} crossfades, speed {:.3}, normalize={})",
            chunk_count,
            track.duration_seconds(),
            crossfades,
            self.options.speed,
            self.options.normalize
        );
        Ok(track)
    }
}

/// One-shot build with the given options
pub fn build_track(
    chunks: Vec<AudioBuffer>,
    pause_plan: &[PauseTag],
    options: TrackOptions,
) -> Result<Track> {
    TrackBuilder::new(options)?.build(chunks, pause_plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use narro_common::PauseProfile;

    fn format() -> AudioFormat {
        AudioFormat::new(1000, 1, 16).unwrap()
    }

    fn constant(frames: usize, value: f32) -> AudioBuffer {
        AudioBuffer::new(vec![value; frames], format()).unwrap()
    }

    fn plain_options() -> TrackOptions {
        TrackOptions {
            pause_profile: PauseProfile::new(0.1, 0.2, 0.5).unwrap(),
            fade_ms: 0,
            crossfade_ms: 0,
            speed: 1.0,
            normalize: false,
            ..TrackOptions::default()
        }
    }

    #[test]
    fn test_invalid_speed_fails_fast() {
        let options = TrackOptions {
            speed: 0.0,
            ..TrackOptions::default()
        };
        assert!(matches!(TrackBuilder::new(options), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_build() {
        let track = build_track(Vec::new(), &[], TrackOptions::default()).unwrap();
        assert!(track.is_empty());
        assert_eq!(track.duration_seconds(), 0.0);
    }

    #[test]
    fn test_pause_plan_length_must_match() {
        let result = build_track(vec![constant(10, 0.5)], &[], plain_options());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_pauses_follow_plan() {
        let chunks = vec![constant(100, 0.5), constant(100, 0.5), constant(100, 0.5)];
        let plan = [PauseTag::Short, PauseTag::Long, PauseTag::None];
        let track = build_track(chunks, &plan, plain_options()).unwrap();

        // 300 frames of audio + 100 (short) + 500 (long)
        assert_eq!(track.buffer().frame_count(), 900);
        let samples = track.buffer().samples();
        assert!(samples[100..200].iter().all(|&s| s == 0.0));
        assert_eq!(samples[200], 0.5);
        assert!(samples[300..800].iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_none_pause_concatenates() {
        let chunks = vec![constant(10, 0.1), constant(10, 0.2)];
        let track = build_track(chunks, &[PauseTag::None, PauseTag::None], plain_options()).unwrap();
        assert_eq!(track.buffer().frame_count(), 20);
    }

    #[test]
    fn test_crossfade_replaces_pause() {
        let options = TrackOptions {
            crossfade_ms: 20,
            ..plain_options()
        };
        let chunks = vec![constant(100, 0.5), constant(100, 0.5)];
        let track = build_track(chunks, &[PauseTag::Long, PauseTag::None], options).unwrap();
        assert_eq!(track.buffer().frame_count(), 180);
    }

    #[test]
    fn test_short_track_falls_back_to_pause() {
        let options = TrackOptions {
            crossfade_ms: 50,
            ..plain_options()
        };
        // first chunk is 30ms, shorter than the crossfade
        let chunks = vec![constant(30, 0.5), constant(100, 0.5)];
        let track = build_track(chunks, &[PauseTag::Short, PauseTag::None], options).unwrap();
        assert_eq!(track.buffer().frame_count(), 30 + 100 + 100);
    }

    #[test]
    fn test_format_mismatch_reports_chunk_index() {
        let other = AudioBuffer::new(vec![0.0; 10], AudioFormat::new(2000, 1, 16).unwrap()).unwrap();
        let chunks = vec![constant(10, 0.5), constant(10, 0.5), other];
        let plan = [PauseTag::None; 3];
        match build_track(chunks, &plan, plain_options()) {
            Err(Error::Build { index, reason }) => {
                assert_eq!(index, 3);
                assert!(reason.contains("2000Hz"));
            }
            other => panic!("expected build error, got {:?}", other),
        }
    }

    #[test]
    fn test_bit_depth_mismatch_is_rejected() {
        let other = AudioBuffer::new(vec![0.0; 10], AudioFormat::new(1000, 1, 24).unwrap()).unwrap();
        let result = build_track(vec![constant(10, 0.5), other], &[PauseTag::None; 2], plain_options());
        assert!(matches!(result, Err(Error::Build { index: 2, .. })));
    }

    #[test]
    fn test_normalize_is_last_step() {
        let options = TrackOptions {
            normalize: true,
            fade_ms: 5,
            ..plain_options()
        };
        let track = build_track(vec![constant(100, 0.1)], &[PauseTag::None], options).unwrap();
        let peak = track
            .buffer()
            .samples()
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        assert!((peak - 0.98855).abs() < 1e-3);
    }

    #[test]
    fn test_fades_applied_per_chunk() {
        let options = TrackOptions {
            fade_ms: 10,
            ..plain_options()
        };
        let chunks = vec![constant(100, 0.5), constant(100, 0.5)];
        let track = build_track(chunks, &[PauseTag::None, PauseTag::None], options).unwrap();
        let samples = track.buffer().samples();
        assert_eq!(samples[0], 0.0);
        assert!(samples[99].abs() < 1e-6);
        assert_eq!(samples[100], 0.0);
        assert_eq!(samples[50], 0.5);
    }
}
