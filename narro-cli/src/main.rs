//! narro command-line interface
//!
//! Segments narration text into a chunk manifest, assembles synthesized chunk
//! WAV files into one track, and measures or compares finished tracks.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use narro_common::config::ConfigOverrides;
use narro_common::SegmentMode;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod settings;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "narro")]
#[command(author, version, about = "Narration segmentation and track assembly", long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, env = "NARRO_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Split text into a JSONL chunk manifest
    Segment {
        /// Input text file ("-" reads stdin)
        input: PathBuf,

        /// Write the manifest here instead of stdout
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Maximum characters per chunk
        #[arg(long)]
        max_chars: Option<usize>,

        /// Segmentation mode (sentence or paragraph)
        #[arg(long)]
        mode: Option<SegmentMode>,

        /// Drop chunks shorter than this many characters
        #[arg(long)]
        min_chars: Option<usize>,

        /// Style instruction prepended to the text as its own paragraph
        #[arg(long)]
        style_prefix: Option<String>,
    },

    /// Assemble chunk WAV files into one track
    Assemble {
        /// Manifest written by `narro segment`
        #[arg(long)]
        manifest: PathBuf,

        /// Directory holding chunk_0001.wav, chunk_0002.wav, ...
        #[arg(long)]
        chunks: PathBuf,

        /// Output WAV file
        #[arg(short, long)]
        output: PathBuf,

        /// Write metrics JSON here instead of stdout
        #[arg(long)]
        metrics: Option<PathBuf>,

        /// Named narration preset
        #[arg(long)]
        preset: Option<String>,

        /// Pause profile (natural, broadcast, tight)
        #[arg(long)]
        pause_profile: Option<String>,

        /// Edge fade per chunk in milliseconds
        #[arg(long)]
        fade_ms: Option<u32>,

        /// Crossfade between chunks in milliseconds (0 uses pauses only)
        #[arg(long)]
        crossfade_ms: Option<u32>,

        /// Speed factor (recommended 0.95 to 1.05)
        #[arg(long)]
        speed: Option<f64>,

        /// Skip peak normalization
        #[arg(long)]
        no_normalize: bool,
    },

    /// Print metrics of a WAV file as JSON
    Measure {
        /// WAV file to measure
        input: PathBuf,
    },

    /// Compare two renderings of the same text
    Compare {
        /// Track from engine A
        a: PathBuf,

        /// Track from engine B
        b: PathBuf,

        /// Output directory for matched tracks and the report
        #[arg(long)]
        outdir: PathBuf,

        #[arg(long, default_value = "a")]
        label_a: String,

        #[arg(long, default_value = "b")]
        label_b: String,

        /// Loudness difference tolerated before gain is applied
        #[arg(long)]
        max_diff_db: Option<f64>,

        /// Also write an A/B mix alternating every N seconds
        #[arg(long)]
        ab_swap_sec: Option<f64>,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so manifests and metrics can be piped from stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "narro_cli=info,narro_track=info,narro_seg=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let toml = settings::load_toml(cli.config.as_deref())?;

    match cli.command {
        Commands::Segment {
            input,
            manifest,
            max_chars,
            mode,
            min_chars,
            style_prefix,
        } => {
            let overrides = ConfigOverrides {
                max_chars,
                mode,
                min_chars,
                ..ConfigOverrides::default()
            };
            let config = settings::resolve(toml.as_ref(), None, &overrides)?;
            commands::segment::run(
                &config,
                &input,
                manifest.as_deref(),
                style_prefix.as_deref(),
            )
            .context("Segmentation failed")?;
        }

        Commands::Assemble {
            manifest,
            chunks,
            output,
            metrics,
            preset,
            pause_profile,
            fade_ms,
            crossfade_ms,
            speed,
            no_normalize,
        } => {
            let overrides = ConfigOverrides {
                pause_profile,
                fade_ms,
                crossfade_ms,
                speed,
                normalize: no_normalize.then_some(false),
                ..ConfigOverrides::default()
            };
            let config = settings::resolve(toml.as_ref(), preset.as_deref(), &overrides)?;
            commands::assemble::run(&config, &manifest, &chunks, &output, metrics.as_deref())
                .context("Assembly failed")?;
        }

        Commands::Measure { input } => {
            commands::measure::run(&input).context("Measurement failed")?;
        }

        Commands::Compare {
            a,
            b,
            outdir,
            label_a,
            label_b,
            max_diff_db,
            ab_swap_sec,
        } => {
            let overrides = ConfigOverrides {
                max_diff_db,
                ..ConfigOverrides::default()
            };
            let config = settings::resolve(toml.as_ref(), None, &overrides)?;
            let request = commands::compare::CompareRequest {
                a: &a,
                b: &b,
                label_a: &label_a,
                label_b: &label_b,
                outdir: &outdir,
                ab_swap_sec,
            };
            commands::compare::run(&config, &request).context("Comparison failed")?;
        }
    }

    info!("Done");
    Ok(())
}
