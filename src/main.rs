//! Command-line front end: reads customers and vehicles from JSON, solves and
//! prints the report.

use clap::Parser;
use fleet_routing::report::{format_report, to_dot};
use fleet_routing::{
    build_model, FirstSolutionStrategy, LocalSearchMetaheuristic, Location, SearchConfig, SearchOutcome,
    Variant,
};
use log::info;
use serde::Deserialize;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(name = "fleet-routing", about = "Solves vehicle routing problems from a JSON description")]
struct Args {
    /// JSON file with `customers` (first entry is the depot) and `vehicles`
    #[arg(short, long)]
    input: PathBuf,

    /// Routing variant: `vrp` or `cvrp`
    #[arg(short, long, default_value = "cvrp")]
    variant: String,

    /// Search time budget in milliseconds
    #[arg(short, long, default_value_t = 1000)]
    time_limit_ms: u64,

    /// Seed for the local search
    #[arg(long, default_value_t = 0)]
    seed: u64,

    /// Build the first solution by parallel cheapest insertion instead of cheapest arc
    #[arg(long)]
    cheapest_insertion: bool,

    /// Run guided local search regardless of the variant's default
    #[arg(long, conflicts_with = "no_improvement")]
    improve: bool,

    /// Return the first solution without improvement
    #[arg(long)]
    no_improvement: bool,

    /// Print the outcome as JSON instead of the text report
    #[arg(long)]
    json: bool,

    /// Write the route graph in Graphviz DOT format to this file
    #[arg(long)]
    dot: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct CustomerRecord {
    lat: f64,
    lon: f64,
    demand: i64,
}

#[derive(Debug, Deserialize)]
struct VehicleRecord {
    id: String,
    capacity: i64,
}

#[derive(Debug, Deserialize)]
struct InputFile {
    customers: Vec<CustomerRecord>,
    vehicles: Vec<VehicleRecord>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let variant: Variant = args.variant.parse()?;
    let input: InputFile = serde_json::from_reader(BufReader::new(File::open(&args.input)?))?;

    let locations: Vec<Location> = input
        .customers
        .iter()
        .map(|c| Location::new(c.lat, c.lon))
        .collect();
    let demands: Vec<i64> = input.customers.iter().map(|c| c.demand).collect();
    let capacities: Vec<i64> = input.vehicles.iter().map(|v| v.capacity).collect();
    let ids: Vec<String> = input.vehicles.iter().map(|v| v.id.clone()).collect();

    let problem = build_model(&locations, &demands, &capacities, &ids)?;
    info!(
        "loaded {} customers and {} vehicles from {}",
        problem.customer_count(),
        problem.vehicle_count(),
        args.input.display()
    );

    let mut config = SearchConfig::for_variant(variant)
        .with_time_limit(Duration::from_millis(args.time_limit_ms))
        .with_seed(args.seed);
    if args.cheapest_insertion {
        config = config.with_first_solution_strategy(FirstSolutionStrategy::ParallelCheapestInsertion);
    }
    if args.improve {
        config = config.with_metaheuristic(LocalSearchMetaheuristic::GuidedLocalSearch);
    }
    if args.no_improvement {
        config = config.without_improvement();
    }

    let outcome = fleet_routing::solve_with_config(&problem, variant, config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    }

    match &outcome {
        SearchOutcome::Solved(solution) => {
            if !args.json {
                print!("{}", format_report(solution, variant));
            }
            if let Some(path) = &args.dot {
                fs::write(path, to_dot(solution))?;
                info!("route graph written to {}", path.display());
            }
        }
        SearchOutcome::Infeasible => {
            if !args.json {
                println!("No solution found!");
            }
        }
    }

    Ok(())
}
