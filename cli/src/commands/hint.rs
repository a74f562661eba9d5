use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use encadre_common::config::Config;
use encadre_common::geo::GeoPoint;
use encadre_core::hint::{ApurHintProvider, ConstructionPeriodHint};
use encadre_core::transport::HttpTransport;
use tracing::warn;

use crate::terminal::print;

pub async fn hint(lat: f64, lon: f64, cfg: &Config) -> anyhow::Result<()> {
    let point = GeoPoint::new(lat, lon);
    let transport = HttpTransport::new(Duration::from_secs(cfg.http_timeout_secs))
        .context("cannot build the HTTP client")?;
    let provider = ApurHintProvider::new(Arc::new(transport), &cfg.apur)
        .context("invalid building registry URL")?;

    match provider.construction_period(&point).await {
        Some(hint) => {
            print::set_key_width(&["Registry period"]);
            print::aligned_line("Point", point.to_string());
            print::aligned_line("Registry period", hint.registry_label);
            print::aligned_line("Registry code", hint.registry_code.to_string());
            print::aligned_line("Period", hint.period.code());
        }
        None => warn!("No construction period found around {point}"),
    }
    Ok(())
}
