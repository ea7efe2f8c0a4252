//! Integration tests for config file loading and resolution
//!
//! Tests:
//! - Loading a TOML file from disk
//! - Missing and malformed files surface as errors, not defaults
//! - Resolution priority: overrides > preset > TOML > defaults
//! - Invalid pause values fail before anything else runs

use narro_common::config::{
    default_config_path, load_toml_config, ConfigOverrides, PipelineConfig,
};
use narro_common::{Error, FadeCurve, PauseProfile, SegmentMode};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(content.as_bytes()).expect("write temp config");
    file
}

#[test]
fn test_load_full_config_file() {
    let file = write_config(
        r#"
        [segment]
        max_chars = 500
        mode = "paragraph"
        min_chars = 10
        abbreviations = ["Approx", "Dept"]

        [track]
        pause_profile = "tight"
        fade_ms = 15
        crossfade_ms = 0
        speed = 1.03
        normalize = false
        fade_curve = "s_curve"

        [volume]
        max_diff_db = 2.0

        [presets.slow]
        pause_profile = "broadcast"
        speed = 0.96
        description = "Slow and deliberate"
        "#,
    );

    let toml = load_toml_config(file.path()).unwrap();
    assert!(toml.presets.contains_key("slow"));

    let config = PipelineConfig::resolve(Some(&toml), None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config.segment.max_chars, 500);
    assert_eq!(config.segment.mode, SegmentMode::Paragraph);
    assert_eq!(config.segment.min_chars, 10);
    assert_eq!(config.segment.extra_abbreviations.len(), 2);
    assert_eq!(config.track.pause_profile, PauseProfile::named("tight").unwrap());
    assert_eq!(config.track.fade_ms, 15);
    assert_eq!(config.track.crossfade_ms, 0);
    assert_eq!(config.track.speed, 1.03);
    assert!(!config.track.normalize);
    assert_eq!(config.track.fade_curve, FadeCurve::SCurve);
    assert_eq!(config.volume.max_diff_db, 2.0);

    let slow = PipelineConfig::resolve(Some(&toml), Some("slow"), &ConfigOverrides::default())
        .unwrap();
    assert_eq!(slow.track.speed, 0.96);
    assert_eq!(slow.track.pause_profile, PauseProfile::named("broadcast").unwrap());
    // values the preset leaves out still come from the file
    assert_eq!(slow.track.fade_ms, 15);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_toml_config(&dir.path().join("absent.toml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_malformed_file_is_parse_error() {
    let file = write_config("[track\nspeed = ");
    let result = load_toml_config(file.path());
    assert!(matches!(result, Err(Error::Toml(_))));
}

#[test]
fn test_empty_file_gives_defaults() {
    let file = write_config("");
    let toml = load_toml_config(file.path()).unwrap();
    let config = PipelineConfig::resolve(Some(&toml), None, &ConfigOverrides::default()).unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
fn test_out_of_range_pause_in_file() {
    let file = write_config(
        r#"
        [track.pause]
        short = 0.2
        medium = 0.5
        long = 3.5
        "#,
    );
    let toml = load_toml_config(file.path()).unwrap();
    let err = PipelineConfig::resolve(Some(&toml), None, &ConfigOverrides::default()).unwrap_err();
    assert!(err.to_string().contains("pause.long"), "unexpected error: {}", err);
}

#[test]
fn test_overrides_clear_explicit_pause_table() {
    let file = write_config(
        r#"
        [track.pause]
        short = 0.05
        "#,
    );
    let toml = load_toml_config(file.path()).unwrap();

    let from_file =
        PipelineConfig::resolve(Some(&toml), None, &ConfigOverrides::default()).unwrap();
    assert_eq!(from_file.track.pause_profile.short(), 0.05);

    let overrides = ConfigOverrides {
        pause_profile: Some("broadcast".to_string()),
        ..Default::default()
    };
    let overridden = PipelineConfig::resolve(Some(&toml), None, &overrides).unwrap();
    assert_eq!(overridden.track.pause_profile, PauseProfile::named("broadcast").unwrap());
}

#[test]
fn test_default_config_path_shape() {
    if let Some(path) = default_config_path() {
        assert!(path.ends_with("narro/config.toml"));
    }
}
