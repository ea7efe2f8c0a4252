//! WAV file I/O using hound
//!
//! Reads 8/16/24/32-bit integer and 32-bit float PCM into f32 samples, and
//! writes at the buffer's declared bit depth (32-bit is written as float).

use crate::audio::types::{AudioBuffer, AudioFormat};
use crate::error::{Error, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::Path;
use tracing::debug;

/// Read a WAV file into an [`AudioBuffer`]
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioBuffer> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)?;
    let spec = reader.spec();

    let samples: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (SampleFormat::Float, 32) => reader.samples::<f32>().collect::<std::result::Result<_, _>>()?,
        (SampleFormat::Int, bits @ (8 | 16 | 24 | 32)) => {
            let scale = int_scale(bits);
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| (v as f64 / scale) as f32))
                .collect::<std::result::Result<_, _>>()?
        }
        (format, bits) => {
            return Err(Error::FormatMismatch(format!(
                "{}: unsupported WAV encoding {:?} {}-bit",
                path.display(),
                format,
                bits
            )))
        }
    };

    let format = AudioFormat::new(spec.sample_rate, spec.channels, spec.bits_per_sample)?;
    let buffer = AudioBuffer::new(samples, format)?;
    debug!(
        "Read {} ({}, {:.3}s)",
        path.display(),
        format,
        buffer.duration_seconds()
    );
    Ok(buffer)
}

/// Write an [`AudioBuffer`] as a WAV file at its declared bit depth
pub fn write_wav<P: AsRef<Path>>(path: P, buffer: &AudioBuffer) -> Result<()> {
    let path = path.as_ref();
    let format = buffer.format();
    let spec = WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bits_per_sample,
        sample_format: if format.bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };

    let mut writer = WavWriter::create(path, spec)?;
    if spec.sample_format == SampleFormat::Float {
        for &sample in buffer.samples() {
            writer.write_sample(sample.clamp(-1.0, 1.0))?;
        }
    } else {
        let max = int_scale(format.bits_per_sample) - 1.0;
        for &sample in buffer.samples() {
            let value = (sample.clamp(-1.0, 1.0) as f64 * max).round() as i32;
            writer.write_sample(value)?;
        }
    }
    writer.finalize()?;

    debug!(
        "Wrote {} ({}, {:.3}s)",
        path.display(),
        format,
        buffer.duration_seconds()
    );
    Ok(())
}

/// Full-scale magnitude for signed integer samples of `bits` bits
fn int_scale(bits: u16) -> f64 {
    2f64.powi(bits as i32 - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ramp(format: AudioFormat, frames: usize) -> AudioBuffer {
        let samples = (0..frames * format.channels as usize)
            .map(|i| ((i % 200) as f32 / 100.0) - 1.0)
            .collect();
        AudioBuffer::new(samples, format).unwrap()
    }

    #[test]
    fn test_16bit_keeps_format_and_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("ramp16.wav");
        let format = AudioFormat::new(22050, 2, 16).unwrap();
        let original = ramp(format, 1000);

        write_wav(&path, &original).unwrap();
        let loaded = read_wav(&path).unwrap();

        assert_eq!(loaded.format(), format);
        assert_eq!(loaded.frame_count(), 1000);
        for (a, b) in original.samples().iter().zip(loaded.samples()) {
            assert!((a - b).abs() < 1e-3, "{} vs {}", a, b);
        }
    }

    #[test]
    fn test_32bit_written_as_float() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("float.wav");
        let format = AudioFormat::new(48000, 1, 32).unwrap();
        let original = AudioBuffer::new(vec![0.25, -0.5, 0.125], format).unwrap();

        write_wav(&path, &original).unwrap();
        let spec = WavReader::open(&path).unwrap().spec();
        assert_eq!(spec.sample_format, SampleFormat::Float);

        assert_eq!(read_wav(&path).unwrap(), original);
    }

    #[test]
    fn test_8bit_and_24bit() {
        let temp_dir = TempDir::new().unwrap();
        for bits in [8u16, 24] {
            let path = temp_dir.path().join(format!("ramp{}.wav", bits));
            let format = AudioFormat::new(16000, 1, bits).unwrap();
            let original = ramp(format, 400);

            write_wav(&path, &original).unwrap();
            let loaded = read_wav(&path).unwrap();
            assert_eq!(loaded.bits_per_sample(), bits);
            let tolerance = if bits == 8 { 0.02 } else { 1e-4 };
            for (a, b) in original.samples().iter().zip(loaded.samples()) {
                assert!((a - b).abs() < tolerance);
            }
        }
    }

    #[test]
    fn test_missing_file_is_error() {
        let temp_dir = TempDir::new().unwrap();
        assert!(read_wav(temp_dir.path().join("absent.wav")).is_err());
    }
}
