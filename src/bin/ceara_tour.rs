//! Anneals a closed tour over twenty cities of Ceará, Brazil, and prints
//! it starting at Fortaleza.
//!
//! Ctrl-C stops the search after the current step and prints the best tour
//! found so far.

use clap::{Parser, ValueEnum};
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, warn};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;
use u_anneal_route::geo::Coordinate;
use u_anneal_route::route::{plan_route_with_cancel, RouteConfig};
use u_anneal_route::sa::{CoolingSchedule, SaConfig};
use u_anneal_route::tsp::LocationSet;
use u_anneal_route::RouteError;

/// (name, longitude, latitude) in degrees.
const CITIES: [(&str, f64, f64); 20] = [
    ("ABAIARA", -39.04, -7.35),
    ("ACARAPE", -38.70, -4.22),
    ("ACARAÚ", -40.11, -2.88),
    ("ACOPIARA", -39.45, -6.09),
    ("AIUABA", -40.12, -6.56),
    ("CARIRÉ", -40.47, -3.95),
    ("CARIRIAÇU", -39.28, -7.04),
    ("CARIÚS", -39.49, -6.53),
    ("CARNAUBAL", -40.93, -4.16),
    ("CASCAVEL", -38.23, -4.13),
    ("FARIAS BRITO", -39.57, -6.92),
    ("FORQUILHA", -40.25, -3.79),
    ("FORTALEZA", -38.58, -3.72),
    ("FORTIM", -37.79, -4.44),
    ("FRECHEIRINHA", -40.82, -3.76),
    ("ITAITINGA", -38.52, -3.97),
    ("ITAPAGÉ", -39.58, -3.68),
    ("ITAPIPOCA", -39.58, -3.49),
    ("ITAPIÚNA", -38.92, -4.55),
    ("ITAREMA", -39.91, -2.92),
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Cooling {
    Geometric,
    Linear,
    LundyMees,
}

impl From<Cooling> for CoolingSchedule {
    fn from(cooling: Cooling) -> Self {
        match cooling {
            Cooling::Geometric => CoolingSchedule::Geometric,
            Cooling::Linear => CoolingSchedule::Linear,
            Cooling::LundyMees => CoolingSchedule::LundyMees,
        }
    }
}

#[derive(Debug, Parser)]
#[command(version, about = "Simulated annealing tour over twenty Ceará cities")]
struct Args {
    /// Number of annealing steps.
    #[arg(long, default_value_t = 100_000)]
    steps: usize,

    /// Temperature on the first step.
    #[arg(long, default_value_t = 25_000.0)]
    initial_temperature: f64,

    /// Temperature on the last step (must be positive).
    #[arg(long, default_value_t = 2.5)]
    min_temperature: f64,

    /// Cooling schedule.
    #[arg(long, value_enum, default_value_t = Cooling::Geometric)]
    cooling: Cooling,

    /// Random seed; omit for a different tour each run.
    #[arg(long)]
    seed: Option<u64>,

    /// City the printed tour starts at.
    #[arg(long, default_value = "FORTALEZA")]
    anchor: String,
}

fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(event = "plan_failed", error = %err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), RouteError> {
    let locations = LocationSet::new(
        CITIES
            .iter()
            .map(|&(name, lon, lat)| (name, Coordinate::from_lon_lat(lon, lat))),
    )?;

    let mut annealing = SaConfig::default()
        .with_steps(args.steps)
        .with_initial_temperature(args.initial_temperature)
        .with_min_temperature(args.min_temperature)
        .with_cooling(args.cooling.into());
    annealing.seed = args.seed;

    let interrupted = Arc::new(AtomicBool::new(false));
    if let Err(err) = ctrlc::set_handler(interrupt_handler(Arc::clone(&interrupted))) {
        warn!(event = "interrupt_unavailable", error = %err);
    }

    let config = RouteConfig::new(args.anchor).with_annealing(annealing);
    let plan = plan_route_with_cancel(&locations, &config, Some(interrupted))?;
    if plan.cancelled {
        warn!(
            event = "interrupted",
            steps = plan.iterations as u64,
            "search stopped early; printing best tour so far"
        );
    }

    println!();
    println!("{} mile route:", plan.cost.trunc());
    for city in &plan.stops {
        println!("\t {city}");
    }
    Ok(())
}

/// Raises `flag`; the engine sees it before its next step.
fn interrupt_handler(flag: Arc<AtomicBool>) -> impl FnMut() + Send + 'static {
    move || flag.store(true, Ordering::Relaxed)
}
