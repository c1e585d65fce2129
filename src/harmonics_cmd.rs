use anyhow::Result;
use serde::Serialize;
use tracing::{info, info_span, warn};

use geotide_signal::Category;

use crate::cli::HarmonicsArgs;
use crate::common;
use crate::convert;
use crate::spectral::{ChannelHarmonics, channel_harmonics};

#[derive(Serialize)]
struct HarmonicsReport {
    method: &'static str,
    channels: Vec<ChannelHarmonics>,
}

/// Extract tidal components of every channel in the input record.
pub fn run(args: HarmonicsArgs) -> Result<()> {
    let _span = info_span!("harmonics").entered();

    let mut loaded = common::load(&args.record)?;
    if let Some(method) = args.method {
        loaded.config.harmonics.method = method;
    }
    let harmonics = &loaded.config.harmonics;
    let method = convert::parse_spectral_method(&harmonics.method)?;

    let record = &loaded.record;
    let mut channels: Vec<(&'static str, &[f64], Category)> = vec![
        ("gw", record.gw(), Category::Groundwater),
        ("bp", record.bp(), Category::Barometric),
    ];
    if let Some(et) = record.et() {
        channels.push(("et", et, Category::EarthTide));
    }

    let mut report = HarmonicsReport {
        method: method.name(),
        channels: Vec::with_capacity(channels.len()),
    };
    for (channel, values, category) in channels {
        let extracted =
            channel_harmonics(channel, record.time(), values, category, method, harmonics)?;
        for advisory in &extracted.advisories {
            warn!(channel, %advisory, "harmonics advisory");
        }
        report.channels.push(extracted);
    }
    info!(
        method = report.method,
        n_channels = report.channels.len(),
        "harmonics extracted"
    );

    common::emit(loaded.output.as_deref(), &report)
}
