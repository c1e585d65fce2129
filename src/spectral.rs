//! Per-channel tidal component extraction with the configured method.

use anyhow::{Context, Result};
use num_complex::Complex64;
use serde::Serialize;
use tracing::debug;

use geotide_signal::{
    Advisory, Category, ConstituentTable, FrequencyComponent, M2, TimeSeries, detrend_windowed,
    fft_spectrum, hals,
};

use crate::config::HarmonicsToml;
use crate::convert::{self, SpectralMethod};

/// Tidal components of one record channel.
#[derive(Debug, Serialize)]
pub struct ChannelHarmonics {
    pub channel: &'static str,
    pub components: Vec<FrequencyComponent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<Advisory>,
}

/// Extracts the constituents of `category` from one channel.
pub fn channel_harmonics(
    channel: &'static str,
    time: &[f64],
    values: &[f64],
    category: Category,
    method: SpectralMethod,
    harmonics: &HarmonicsToml,
) -> Result<ChannelHarmonics> {
    let values = match convert::build_detrend_config(harmonics) {
        Some(cfg) => detrend_windowed(time, values, &cfg)
            .with_context(|| format!("failed to detrend channel {channel}"))?,
        None => values.to_vec(),
    };
    let series = TimeSeries::new(time.to_vec(), values)
        .with_context(|| format!("invalid channel {channel}"))?;
    let table = ConstituentTable::for_category(category);

    let (components, advisories) = match method {
        SpectralMethod::Hals => {
            let cfg = convert::build_hals_config(harmonics, table.clone());
            let (fit, advisories) = hals(&series, &table.frequencies(), &cfg)
                .with_context(|| format!("harmonic least squares failed for channel {channel}"))?
                .into_parts();
            (fit.components().to_vec(), advisories)
        }
        SpectralMethod::Fft => {
            let spectrum = fft_spectrum(&series, &convert::build_fft_config(harmonics))
                .with_context(|| format!("FFT failed for channel {channel}"))?;
            (spectrum.components(&table), Vec::new())
        }
    };
    debug!(channel, n_components = components.len(), "channel harmonics extracted");

    Ok(ChannelHarmonics {
        channel,
        components,
        advisories,
    })
}

/// The M2 component, matched by name and then by frequency.
pub fn m2_component(components: &[FrequencyComponent]) -> Option<Complex64> {
    components
        .iter()
        .find(|c| c.name() == Some("M2"))
        .or_else(|| components.iter().find(|c| (c.frequency() - M2).abs() < 1e-6))
        .map(FrequencyComponent::value)
}
