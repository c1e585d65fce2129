use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use geotide_deconv::{EarthTide, deconvolve};

use crate::cli::DeconvolveArgs;
use crate::common;
use crate::convert::{self, EarthTideMode};

/// Run regression deconvolution on the input record.
pub fn run(args: DeconvolveArgs) -> Result<()> {
    let _span = info_span!("deconvolve").entered();

    let mut loaded = common::load(&args.record)?;
    if let Some(hours) = args.lag_hours {
        loaded.config.deconvolution.lag_hours = hours;
    }
    let cfg = convert::build_deconv_config(&loaded.config.deconvolution)?;
    let mode = convert::parse_earth_tide_mode(&loaded.config.deconvolution.earth_tide)?;

    let record = &loaded.record;
    let frequencies = cfg.names().frequencies();
    let earth_tide = match mode {
        EarthTideMode::None => EarthTide::Ignore,
        EarthTideMode::Harmonic => EarthTide::Harmonic(&frequencies),
        EarthTideMode::Series => EarthTide::Series(record.et().ok_or_else(|| {
            anyhow!("earth_tide = \"series\" needs an `et` channel in the input record")
        })?),
    };

    let outcome = deconvolve(record.time(), record.gw(), record.bp(), earth_tide, &cfg)
        .context("regression deconvolution failed")?;
    for advisory in outcome.advisories() {
        warn!(%advisory, "deconvolution advisory");
    }

    let result = outcome.value();
    let cumulative = result.barometric().cumulative();
    info!(
        lags = result.barometric().len(),
        final_cumulative = cumulative.last().copied().unwrap_or(f64::NAN),
        error_variance = result.diagnostics().error_variance(),
        "deconvolution complete"
    );

    common::emit(loaded.output.as_deref(), &outcome)
}
