use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use colored::*;
use encadre_common::category::RegulationCategory;
use encadre_common::config::Config;
use encadre_common::geo::GeoPoint;
use encadre_common::territory::Territory;
use encadre_core::compliance::{self, Assessment};
use encadre_core::hint::{ApurHintProvider, BuildingHint, ConstructionPeriodHint};
use encadre_core::resolver::EstEnsembleDataset;
use encadre_core::service::{LookupRequest, RentControlService};
use encadre_core::transport::{DatasetTransport, HttpTransport};
use serde::Serialize;
use tracing::info;

use super::CheckArgs;
use crate::emit;
use crate::terminal::{colors, format, print, spinner};

#[derive(Serialize)]
struct Report<'a> {
    #[serde(flatten)]
    assessment: &'a Assessment,
    building_hint: Option<BuildingHint>,
}

async fn suggest(
    provider: &dyn ConstructionPeriodHint,
    point: &GeoPoint,
    enabled: bool,
) -> Option<BuildingHint> {
    if enabled {
        provider.construction_period(point).await
    } else {
        None
    }
}

pub async fn check(args: CheckArgs, cfg: &Config, quiet: bool) -> anyhow::Result<()> {
    let point = GeoPoint::new(args.lat, args.lon);
    let transport: Arc<dyn DatasetTransport> = Arc::new(
        HttpTransport::new(Duration::from_secs(cfg.http_timeout_secs))
            .context("cannot build the HTTP client")?,
    );
    let dataset = Arc::new(EstEnsembleDataset::new());
    let service = RentControlService::new(transport.clone(), cfg, dataset)
        .context("invalid dataset URL in configuration")?;
    let hints =
        ApurHintProvider::new(transport, &cfg.apur).context("invalid building registry URL")?;

    // The registry only covers Paris.
    let in_paris = Territory::from_postcode(&args.postcode) == Some(Territory::Paris);
    let use_hint = !cfg.no_hint && in_paris;
    let category =
        |period| RegulationCategory::new(args.rooms, period, args.furnished, args.building);

    if !quiet {
        spinner::start("Fetching rent-control data...");
    }

    let (hint, lookup, category) = match args.period {
        Some(period) => {
            let request = LookupRequest {
                point,
                postcode: args.postcode.clone(),
                category: category(period),
            };
            let (hint, lookup) = tokio::join!(
                suggest(&hints, &point, use_hint),
                service.lookup(&request)
            );
            (hint, lookup, request.category)
        }
        None => {
            let hint = suggest(&hints, &point, use_hint).await;
            let Some(found) = hint else {
                spinner::stop();
                bail!(
                    "no construction period given and none could be suggested for this address; \
                     pass --period"
                );
            };
            info!("Using the registry's construction period: {}", found.period.code());
            let request = LookupRequest {
                point,
                postcode: args.postcode.clone(),
                category: category(found.period),
            };
            let lookup = service.lookup(&request).await;
            (hint, lookup, request.category)
        }
    };

    spinner::stop();

    let lookup = match lookup {
        Ok(lookup) => lookup,
        Err(e) if e.is_retryable() => {
            return Err(anyhow::Error::new(e).context(
                "could not verify the rent: the open-data service did not answer properly, \
                 try again later",
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let assessment = compliance::assess(lookup, args.area, args.rent);

    if args.json {
        let report = Report {
            assessment: &assessment,
            building_hint: hint,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_assessment(&assessment, &category, hint.as_ref(), quiet);
    Ok(())
}

fn print_assessment(
    assessment: &Assessment,
    submitted: &RegulationCategory,
    hint: Option<&BuildingHint>,
    quiet: bool,
) {
    let lookup = &assessment.lookup;
    let result = &assessment.compliance;

    print::set_key_width(&["Construction period", "Reference rate"]);

    if !quiet {
        print::aligned_line("Territory", lookup.territory.label());
        print::aligned_line("Zone", lookup.zone_name.as_str());
        print::aligned_line("Reference year", lookup.reference_year.as_str());
        print::aligned_line("Submitted", format::submitted_category(submitted));
        print::aligned_line("Matched", format::matched_category(&lookup.category));
        print::aligned_line("Match", format::quality(&lookup.quality));
        if let Some(hint) = hint {
            print::aligned_line(
                "Construction period",
                format!("{} (registry: {})", hint.period.code(), hint.registry_label),
            );
        }
        emit!();
        print::aligned_line("Reference rate", format::rate(lookup.schedule.reference_rate));
        print::aligned_line("Majored rate", format::rate(lookup.schedule.majored_rate));
        print::aligned_line("Minored rate", format::rate(lookup.schedule.minored_rate));
        emit!();
        print::header("verdict", quiet);
    }

    print::aligned_line("Area", format!("{:.2} m²", result.area_m2));
    print::aligned_line("Declared rent", format::euros(result.declared_rent));
    print::aligned_line("Reference", format::euros(result.reference_amount));
    let ceiling = format::euros(result.majored_amount).color(colors::ACCENT).bold();
    print::aligned_line("Ceiling", ceiling);
    print::aligned_line("Floor", format::euros(result.minored_amount));
    print::aligned_line("Deviation", format::deviation(result.deviation_amount));

    print::fat_separator();
    if result.is_compliant {
        print::centerln("The rent respects the ceiling", colors::COMPLIANT);
    } else {
        let over = format!(
            "The rent exceeds the ceiling by {}",
            format::euros(result.deviation_amount)
        );
        print::centerln(&over, colors::NON_COMPLIANT);
    }
}
