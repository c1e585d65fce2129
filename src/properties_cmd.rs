use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use geotide_hydraulic::{PropertyFit, estimate_properties};
use geotide_signal::Category;

use crate::cli::RecordArgs;
use crate::common;
use crate::convert;
use crate::spectral::{channel_harmonics, m2_component};

/// Estimate hydraulic conductivity and specific storage from the M2 response.
pub fn run(args: RecordArgs) -> Result<()> {
    let _span = info_span!("properties").entered();

    let loaded = common::load(&args)?;
    let record = &loaded.record;
    let et = record
        .et()
        .ok_or_else(|| anyhow!("properties needs an `et` channel in the input record"))?;

    let harmonics = &loaded.config.harmonics;
    let method = convert::parse_spectral_method(&harmonics.method)?;
    let head = channel_harmonics(
        "gw",
        record.time(),
        record.gw(),
        Category::Groundwater,
        method,
        harmonics,
    )?;
    let earth_tide = channel_harmonics(
        "et",
        record.time(),
        et,
        Category::EarthTide,
        method,
        harmonics,
    )?;
    let gw_m2 = m2_component(&head.components).ok_or_else(|| anyhow!("head has no M2 component"))?;
    let et_m2 = m2_component(&earth_tide.components)
        .ok_or_else(|| anyhow!("earth tide has no M2 component"))?;

    let well = convert::build_well_geometry(&loaded.config.well);
    let cfg = convert::build_hydraulic_config(&loaded.config.well);
    let fit = estimate_properties(et_m2, gw_m2, &well, &cfg)
        .context("hydraulic property estimation failed")?;

    match &fit {
        PropertyFit::Converged(estimate) => info!(
            model = %estimate.model(),
            k = estimate.hydraulic_conductivity(),
            ss = estimate.specific_storage(),
            "properties estimated"
        ),
        PropertyFit::NotConverged { model, reason, .. } => {
            warn!(%model, %reason, "property fit did not converge")
        }
    }

    common::emit(loaded.output.as_deref(), &fit)
}
