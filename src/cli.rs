use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Barometric and Earth-tide response analysis of groundwater heads.
#[derive(Parser)]
#[command(
    name = "geotide",
    version,
    about = "Barometric and Earth-tide response analysis of groundwater heads"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Separate barometric and Earth-tide effects by regression-deconvolution.
    Deconvolve(DeconvolveArgs),
    /// Extract tidal components of each channel.
    Harmonics(HarmonicsArgs),
    /// Estimate barometric efficiency.
    Efficiency(EfficiencyArgs),
    /// Estimate hydraulic conductivity and specific storage.
    Properties(RecordArgs),
}

/// Input, config and output paths shared by every subcommand.
#[derive(clap::Args)]
pub struct RecordArgs {
    /// Path to TOML configuration file (defaults apply when omitted).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override input JSON record path from config.
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Override output JSON path from config (stdout when neither is set).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `deconvolve` subcommand.
#[derive(clap::Args)]
pub struct DeconvolveArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Override response window length (hours).
    #[arg(long = "lag-hours")]
    pub lag_hours: Option<f64>,
}

/// Arguments for the `harmonics` subcommand.
#[derive(clap::Args)]
pub struct HarmonicsArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Override extraction method (`hals` or `fft`).
    #[arg(short, long)]
    pub method: Option<String>,
}

/// Arguments for the `efficiency` subcommand.
#[derive(clap::Args)]
pub struct EfficiencyArgs {
    #[command(flatten)]
    pub record: RecordArgs,

    /// Override the Rau amplitude damping factor.
    #[arg(long = "amplitude-ratio")]
    pub amplitude_ratio: Option<f64>,
}
