//! Basic example of using the fleet_routing library.

use fleet_routing::report::{format_duration, format_report, to_dot};
use fleet_routing::{build_model, Location, RoutingEngine, SearchConfig, SearchOutcome, Variant};
use std::env;
use std::fs;
use std::time::{Duration, Instant};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Variant from the command line, CVRP by default
    let args: Vec<String> = env::args().collect();
    let variant: Variant = args.get(1).map(String::as_str).unwrap_or("cvrp").parse()?;

    // A depot in Midtown and three customers around Manhattan
    let locations = vec![
        Location::new(40.785091, -73.968285),
        Location::new(40.748817, -73.985428),
        Location::new(40.730610, -73.935242),
        Location::new(40.712776, -74.005974),
    ];
    let demands = [0, 20, 5, 10];
    let capacities = [15, 30, 10];
    let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();

    let problem = build_model(&locations, &demands, &capacities, &ids)?;
    println!(
        "Loaded problem with {} customers and {} vehicles",
        problem.customer_count(),
        problem.vehicle_count()
    );

    let config = SearchConfig::for_variant(variant).with_time_limit(Duration::from_secs(2));

    println!("Starting search for {} (time limit: 2s)", variant);
    let start_time = Instant::now();
    let mut engine = RoutingEngine::new(&problem);
    engine.configure(variant, config)?;
    let outcome = engine.solve()?;
    let runtime = start_time.elapsed();

    println!("Search completed in {}", format_duration(runtime));
    if let Some(statistics) = engine.statistics() {
        println!("{}", statistics.format());
    }

    match outcome {
        SearchOutcome::Solved(solution) => {
            print!("{}", format_report(&solution, variant));

            let output_path = format!("{}.dot", variant.key());
            println!("Saving route graph to: {}", output_path);
            fs::write(&output_path, to_dot(&solution))?;
        }
        SearchOutcome::Infeasible => println!("No solution found!"),
    }

    Ok(())
}
