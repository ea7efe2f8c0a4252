//! Config file discovery and resolution

use anyhow::{Context, Result};
use narro_common::config::{
    default_config_path, load_toml_config, ConfigOverrides, PipelineConfig, TomlConfig,
};
use std::path::Path;
use tracing::{debug, info};

/// Load the TOML config
///
/// An explicit path must exist. Without one, the per-user config file is used
/// when present.
pub fn load_toml(explicit: Option<&Path>) -> Result<Option<TomlConfig>> {
    if let Some(path) = explicit {
        let config = load_toml_config(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?;
        info!("Using config file {}", path.display());
        return Ok(Some(config));
    }

    match default_config_path() {
        Some(path) if path.exists() => {
            let config = load_toml_config(&path)
                .with_context(|| format!("Failed to load config file {}", path.display()))?;
            info!("Using config file {}", path.display());
            Ok(Some(config))
        }
        _ => {
            debug!("No config file, using built-in defaults");
            Ok(None)
        }
    }
}

/// Resolve every configuration source into one validated config
pub fn resolve(
    toml: Option<&TomlConfig>,
    preset: Option<&str>,
    overrides: &ConfigOverrides,
) -> Result<PipelineConfig> {
    PipelineConfig::resolve(toml, preset, overrides).context("Invalid configuration")
}
