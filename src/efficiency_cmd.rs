use std::fmt::Display;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{info, info_span, warn};

use geotide_efficiency::{TidalComponents, acworth, rau};
use geotide_signal::{Category, Outcome, regular_step};

use crate::cli::EfficiencyArgs;
use crate::common;
use crate::config::HarmonicsToml;
use crate::convert::{self, SpectralMethod};
use crate::spectral::channel_harmonics;

/// Estimate of one method, or why it could not be made.
#[derive(Serialize)]
struct MethodReport<T> {
    method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    estimate: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<T> MethodReport<T> {
    fn from_result<E: Display>(method: &'static str, result: Result<T, E>) -> Self {
        match result {
            Ok(estimate) => Self {
                method,
                estimate: Some(estimate),
                error: None,
            },
            Err(e) => {
                warn!(method, error = %e, "estimator failed");
                Self {
                    method,
                    estimate: None,
                    error: Some(e.to_string()),
                }
            }
        }
    }
}

#[derive(Serialize)]
struct FrequencyReport {
    method: &'static str,
    components: TidalComponents,
    rau: MethodReport<Outcome<f64>>,
    acworth: MethodReport<Outcome<f64>>,
}

#[derive(Serialize)]
struct EfficiencyReport {
    differences: bool,
    time_domain: Vec<MethodReport<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_domain: Option<FrequencyReport>,
}

/// Estimate barometric efficiency with the configured methods.
pub fn run(args: EfficiencyArgs) -> Result<()> {
    let _span = info_span!("efficiency").entered();

    let mut loaded = common::load(&args.record)?;
    if let Some(ratio) = args.amplitude_ratio {
        loaded.config.efficiency.amplitude_ratio = ratio;
    }
    let efficiency = &loaded.config.efficiency;
    let record = &loaded.record;

    let dt = regular_step(record.time()).context("time-domain methods need regular sampling")?;
    let welch = convert::build_welch_config(efficiency, 1.0 / dt);
    let methods = convert::build_be_methods(efficiency, &welch)?;

    let (x, y) = if efficiency.differences {
        (geotide_stats::diff(record.bp()), geotide_stats::diff(record.gw()))
    } else {
        (record.bp().to_vec(), record.gw().to_vec())
    };
    let time_domain: Vec<MethodReport<f64>> = methods
        .iter()
        .map(|m| MethodReport::from_result(m.name(), m.estimate(&x, &y)))
        .collect();
    for report in &time_domain {
        if let Some(be) = report.estimate {
            info!(method = report.method, be, "barometric efficiency");
        }
    }

    let frequency_domain = match record.et() {
        Some(et) => Some(frequency_report(
            record.time(),
            record.gw(),
            record.bp(),
            et,
            &loaded.config.harmonics,
            efficiency.amplitude_ratio,
        )?),
        None => {
            info!("no earth tide channel, skipping frequency-domain estimators");
            None
        }
    };

    let report = EfficiencyReport {
        differences: efficiency.differences,
        time_domain,
        frequency_domain,
    };
    common::emit(loaded.output.as_deref(), &report)
}

fn frequency_report(
    time: &[f64],
    gw: &[f64],
    bp: &[f64],
    et: &[f64],
    harmonics: &HarmonicsToml,
    amplitude_ratio: f64,
) -> Result<FrequencyReport> {
    let method = convert::parse_spectral_method(&harmonics.method)?;
    let head = channel_harmonics("gw", time, gw, Category::Groundwater, method, harmonics)?;
    let pressure = channel_harmonics("bp", time, bp, Category::Barometric, method, harmonics)?;
    let earth_tide = channel_harmonics("et", time, et, Category::EarthTide, method, harmonics)?;

    let components = TidalComponents::from_components(
        &pressure.components,
        &earth_tide.components,
        &head.components,
    )
    .context("tidal components for the frequency-domain estimators")?;

    let rau_report = MethodReport::from_result("rau", rau(&components, amplitude_ratio));
    let acworth_report = MethodReport::from_result("acworth", acworth(&components));
    for outcome in [&rau_report.estimate, &acworth_report.estimate]
        .into_iter()
        .flatten()
    {
        for advisory in outcome.advisories() {
            warn!(%advisory, "frequency-domain advisory");
        }
    }
    if method == SpectralMethod::Fft {
        info!("frequency-domain estimators use nearest FFT bins");
    }

    Ok(FrequencyReport {
        method: method.name(),
        components,
        rau: rau_report,
        acworth: acworth_report,
    })
}
