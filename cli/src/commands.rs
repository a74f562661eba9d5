pub mod check;
pub mod hint;
pub mod territories;

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use encadre_common::category::{BuildingType, ConstructionPeriod, RoomCount};
use encadre_common::config::Config;
use encadre_common::geo::AxisOrder;
use encadre_core::vocabulary::{self, VocabularyError};

#[derive(Parser)]
#[command(name = "encadre", version)]
#[command(about = "Checks a rent against the Paris and Est Ensemble rent-control ceilings.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// JSON configuration file; the flags below override it
    #[arg(long, global = true, env = "ENCADRE_CONFIG")]
    pub config: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, env = "ENCADRE_HTTP_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Coordinate order of the Paris zone polygons (auto, lon-lat, lat-lon)
    #[arg(long, global = true, env = "ENCADRE_AXIS_ORDER")]
    pub axis_order: Option<AxisOrder>,

    /// Reference year of the Paris dataset
    #[arg(long, global = true, env = "ENCADRE_PARIS_YEAR")]
    pub paris_year: Option<String>,

    /// Never query the building registry
    #[arg(long, global = true, env = "ENCADRE_NO_HINT")]
    pub no_hint: bool,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Look up the ceiling for an address and check a rent against it
    #[command(alias = "c")]
    Check(CheckArgs),
    /// Suggest the construction period of the building at a point (Paris only)
    #[command(alias = "h")]
    Hint {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
    },
    /// List the postcodes covered by rent control
    #[command(alias = "t")]
    Territories,
}

#[derive(Args)]
pub struct CheckArgs {
    #[arg(long)]
    pub lat: f64,
    #[arg(long)]
    pub lon: f64,
    /// Postcode of the address, e.g. 75018 or 93100
    #[arg(long)]
    pub postcode: String,
    /// 1, 2, 3 or 4+
    #[arg(long)]
    pub rooms: RoomCount,
    /// avant-1946, 1946-1970, 1971-1990 or apres-1990.
    /// Suggested from the building registry when omitted.
    #[arg(long)]
    pub period: Option<ConstructionPeriod>,
    /// meuble or non-meuble
    #[arg(long, value_parser = furnished_flag, action = ArgAction::Set)]
    pub furnished: bool,
    /// appartement or maison
    #[arg(long, default_value_t = BuildingType::Apartment)]
    pub building: BuildingType,
    /// Living area in square metres
    #[arg(long, value_parser = positive_amount)]
    pub area: f64,
    /// Monthly rent excluding charges, in euros
    #[arg(long, value_parser = positive_amount)]
    pub rent: f64,
    /// Print the assessment as JSON
    #[arg(long)]
    pub json: bool,
}

fn furnished_flag(raw: &str) -> Result<bool, VocabularyError> {
    vocabulary::furnished(raw).into_result("furnished")
}

fn positive_amount(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("{raw:?} is not a number"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{raw} must be a positive amount"))
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> anyhow::Result<Config> {
        let mut cfg = match &self.config {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("cannot read {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid configuration in {}", path.display()))?
            }
            None => Config::default(),
        };

        if let Some(timeout) = self.timeout {
            cfg.http_timeout_secs = timeout;
        }
        if let Some(order) = self.axis_order {
            cfg.paris.axis_order = order;
        }
        if let Some(year) = &self.paris_year {
            cfg.paris.reference_year = year.clone();
        }
        cfg.no_hint |= self.no_hint;

        Ok(cfg)
    }
}
