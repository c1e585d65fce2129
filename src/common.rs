//! Loading inputs and emitting results, shared by every subcommand.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use geotide_io::{Record, read_record, write_json};

use crate::cli::RecordArgs;
use crate::config::GeotideConfig;

/// Configuration and record resolved for one subcommand run.
pub struct Loaded {
    pub config: GeotideConfig,
    pub record: Record,
    /// Where results go; `None` prints to stdout.
    pub output: Option<PathBuf>,
}

/// Loads the config (or defaults), applies CLI path overrides and reads the
/// input record. CLI paths take precedence over `[io]`.
pub fn load(args: &RecordArgs) -> Result<Loaded> {
    let mut config = GeotideConfig::load(args.config.as_deref())?;
    if let Some(input) = &args.input {
        config.io.input = Some(input.clone());
    }
    if let Some(output) = &args.output {
        config.io.output = Some(output.clone());
    }

    let Some(input) = config.io.input.clone() else {
        bail!("no input path: set [io].input in config or use --input");
    };
    info!(path = %input.display(), "reading input record");
    let record = read_record(&input)
        .with_context(|| format!("failed to read input record: {}", input.display()))?;
    info!(
        n = record.len(),
        earth_tide = record.et().is_some(),
        "input record loaded"
    );

    let output = config.io.output.clone();
    Ok(Loaded {
        config,
        record,
        output,
    })
}

/// Writes `value` as JSON to `output`, or pretty-prints it to stdout.
pub fn emit<T: Serialize>(output: Option<&Path>, value: &T) -> Result<()> {
    match output {
        Some(path) => write_json(path, value)
            .with_context(|| format!("failed to write results: {}", path.display())),
        None => {
            let json = serde_json::to_string_pretty(value).context("failed to serialise results")?;
            println!("{json}");
            Ok(())
        }
    }
}
