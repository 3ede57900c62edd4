#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the KAVACH crime intelligence dashboard.
//!
//! One-shot subcommands exercise each backend operation directly; running
//! with no subcommand drops into an interactive session that drives the
//! full view-state store.

mod interactive;
mod render;

use clap::{Parser, Subcommand};
use kavach_client::{ApiClient, IntelBackend as _};
use kavach_dashboard::filter::{ALL_CATEGORIES, FirFilter, filter_firs};
use kavach_dashboard::stats::section_frequency;
use kavach_intel_models::{PredictRequest, RiskBand, RiskTier, TimeOfDay};
use kavach_scoring::{BaselineMetrics, WeightVector, predict_risk_band};

#[derive(Parser)]
#[command(name = "kavach_cli", about = "KAVACH crime intelligence dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and list geographic hotspots with derived tiers
    Hotspots,
    /// Fetch and list predictive risk zones
    Zones,
    /// Fetch and list FIR records
    Firs {
        /// Case-insensitive search over the FIR id and offense category
        #[arg(long)]
        search: Option<String>,
        /// Exact offense category to keep (default: all)
        #[arg(long)]
        category: Option<String>,
    },
    /// Fetch per-section case tallies
    Stats,
    /// Request a live risk prediction for a coordinate
    Predict {
        /// Degrees north
        #[arg(long)]
        lat: f64,
        /// Degrees east
        #[arg(long)]
        lon: f64,
        /// Time-of-day category (morning, afternoon, evening, night)
        #[arg(long, default_value = "night")]
        time_of_day: TimeOfDay,
        /// Distance to the nearest police station in kilometers
        #[arg(long)]
        dist_to_ps: f64,
    },
    /// Compute the composite risk index locally
    Score {
        /// Historical crime bias weight
        #[arg(long, default_value_t = WeightVector::DEFAULT.alpha)]
        alpha: f64,
        /// Seasonal variance weight
        #[arg(long, default_value_t = WeightVector::DEFAULT.beta)]
        beta: f64,
        /// Response proximity weight
        #[arg(long, default_value_t = WeightVector::DEFAULT.gamma)]
        gamma: f64,
        /// Population hubs weight
        #[arg(long, default_value_t = WeightVector::DEFAULT.delta)]
        delta: f64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run().await;
    };

    let client = ApiClient::from_env();

    match command {
        Commands::Hotspots => {
            let hotspots = client.hotspots().await?;
            println!("{}", render::hotspot_listing(&hotspots));
        }
        Commands::Zones => {
            let zones = client.predictive_zones().await?;
            println!("{}", render::zone_listing(&zones));
        }
        Commands::Firs { search, category } => {
            let firs = client.firs().await?;
            let filter = FirFilter {
                search: search.unwrap_or_default(),
                category: category.unwrap_or_else(|| ALL_CATEGORIES.to_string()),
            };
            let hits = filter_firs(&firs, &filter);
            println!("{}", render::fir_listing(&hits));
        }
        Commands::Stats => {
            let tallies = client.bns_stats().await?;
            println!("{}", render::stats_view(&section_frequency(&tallies)));
        }
        Commands::Predict {
            lat,
            lon,
            time_of_day,
            dist_to_ps,
        } => {
            let response = client
                .predict(PredictRequest {
                    latitude: lat,
                    longitude: lon,
                    time_of_day,
                    dist_to_ps,
                })
                .await?;
            let tier = RiskTier::from_prediction_score(response.risk_score);
            println!("Predicted risk score: {:.1} ({tier})", response.risk_score);
        }
        Commands::Score {
            alpha,
            beta,
            gamma,
            delta,
        } => {
            let weights = WeightVector {
                alpha,
                beta,
                gamma,
                delta,
            };
            let (index, band) = predict_risk_band(&weights, &BaselineMetrics::DEFAULT)?;
            println!("Composite risk index: {index} ({})", band_label(band));
        }
    }

    Ok(())
}

fn band_label(band: RiskBand) -> &'static str {
    match band {
        RiskBand::Guarded => "guarded",
        RiskBand::Elevated => "elevated",
        RiskBand::Severe => "severe",
    }
}
