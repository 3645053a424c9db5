//! Unit tests for solution extraction and reporting.

use fleet_routing::report::{format_duration, format_report, route_graph, to_dot};
use fleet_routing::solution::extract_solution;
use fleet_routing::{
    build_model, solve_with_config, EngineState, InvalidInputError, Location, RoutingEngine,
    RoutingProblem, SearchConfig, Solution, Variant, VehicleRoute,
};
use std::time::Duration;

/// Creates the four-node Manhattan problem with a fleet of three vehicles.
fn create_test_problem() -> RoutingProblem {
    let locations = vec![
        Location::new(40.785091, -73.968285),
        Location::new(40.748817, -73.985428),
        Location::new(40.730610, -73.935242),
        Location::new(40.712776, -74.005974),
    ];
    let ids: Vec<String> = ["1", "2", "3"].iter().map(|s| s.to_string()).collect();

    build_model(&locations, &[0, 20, 5, 10], &[15, 30, 10], &ids).unwrap()
}

/// Solves the test problem with the first solution only.
fn create_first_solution(problem: &RoutingProblem) -> Solution {
    solve_with_config(problem, Variant::Cvrp, SearchConfig::new().without_improvement())
        .unwrap()
        .into_solution()
        .unwrap()
}

#[test]
fn test_extracted_routes() {
    let problem = create_test_problem();
    let solution = create_first_solution(&problem);

    assert_eq!(solution.vehicles.len(), 3);

    let first = &solution.vehicles[0];
    assert_eq!(first.vehicle_id, "1");
    assert_eq!(first.capacity, 15);
    assert_eq!(first.nodes, vec![0, 2, 3, 0]);
    assert_eq!(first.cumulative_loads, vec![0, 5, 15, 15]);
    assert_eq!(first.distance, 7 + 6 + 9);
    assert_eq!(first.load, 15);
    assert_eq!(first.customers(), &[2, 3]);

    let second = &solution.vehicles[1];
    assert_eq!(second.nodes, vec![0, 1, 0]);
    assert_eq!(second.cumulative_loads, vec![0, 20, 20]);
    assert_eq!(second.distance, 8);
    assert_eq!(second.load, 20);
}

#[test]
fn test_unused_vehicle_is_degenerate() {
    let problem = create_test_problem();
    let solution = create_first_solution(&problem);

    let unused = solution.vehicle_route("3").unwrap();
    assert!(unused.is_degenerate());
    assert_eq!(unused.nodes, vec![0, 0]);
    assert_eq!(unused.distance, 0);
    assert_eq!(unused.load, 0);
    assert!(unused.customers().is_empty());

    assert_eq!(solution.route_count(), 2);
    assert_eq!(solution.node_sequences(), vec![vec![0, 2, 3, 0], vec![0, 1, 0]]);
    assert!(solution.vehicle_route("missing").is_none());
}

#[test]
fn test_solution_aggregates() {
    let problem = create_test_problem();
    let solution = create_first_solution(&problem);

    assert_eq!(solution.total_distance, 30);
    assert_eq!(solution.total_load, 35);
    assert_eq!(solution.max_route_distance, 22);
    assert_eq!(solution.objective, 30);
}

#[test]
fn test_from_routes_without_vehicles() {
    let solution = Solution::from_routes(Vec::new(), 0);

    assert_eq!(solution.total_distance, 0);
    assert_eq!(solution.max_route_distance, 0);
    assert_eq!(solution.route_count(), 0);
}

#[test]
fn test_extract_requires_solved_engine() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine.configure(Variant::Cvrp, SearchConfig::new()).unwrap();

    assert_eq!(
        extract_solution(&engine),
        Err(InvalidInputError::EngineState {
            expected: EngineState::Solved.as_str(),
            actual: "configured"
        })
    );
}

#[test]
fn test_cvrp_report() {
    let problem = create_test_problem();
    let solution = create_first_solution(&problem);

    let report = format_report(&solution, Variant::Cvrp);

    assert!(report.starts_with("Objective: 30\n"));
    assert!(report.contains("Route for vehicle 1:\n 0 Load(0) -> 2 Load(5) -> 3 Load(15) -> 0 Load(15)\n"));
    assert!(report.contains("Distance of the route: 22km\nLoad of the route: 15\n"));
    assert!(report.contains("Route for vehicle 3:\n 0 Load(0) -> 0 Load(0)\n"));
    assert!(report.contains("Total distance of all routes: 30km\n"));
    assert!(report.ends_with("Total load of all routes: 35\n"));
}

#[test]
fn test_plain_vrp_report() {
    let route = VehicleRoute {
        vehicle_id: "van".to_string(),
        capacity: 1,
        nodes: vec![0, 1, 0],
        cumulative_loads: vec![0, 0, 0],
        distance: 8,
        load: 0,
    };
    let solution = Solution::from_routes(vec![route], 808);

    let report = format_report(&solution, Variant::PlainVrp);

    assert!(report.contains("Route for vehicle van:\n 0 -> 1 -> 0\nDistance of the route: 8km\n"));
    assert!(report.ends_with("Maximum of the route distances: 8km\n"));
    assert!(!report.contains("Load"));
}

#[test]
fn test_route_graph() {
    let problem = create_test_problem();
    let solution = create_first_solution(&problem);

    let graph = route_graph(&solution);

    // Depot plus three customers, and 3 + 2 arcs; the unused vehicle adds nothing
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(
        graph.edge_weights().filter(|vehicle| vehicle.as_str() == "1").count(),
        3
    );

    let dot = to_dot(&solution);
    assert!(dot.starts_with("digraph"));
}

#[test]
fn test_format_duration() {
    assert_eq!(format_duration(Duration::from_millis(3_723_004)), "1h 02m 03s 004ms");
    assert_eq!(format_duration(Duration::ZERO), "0h 00m 00s 000ms");
}

#[test]
fn test_outcome_serializes_with_status() {
    let problem = create_test_problem();
    let outcome =
        solve_with_config(&problem, Variant::Cvrp, SearchConfig::new().without_improvement())
            .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["status"], "solved");
    assert_eq!(json["solution"]["total_distance"], 30);
    assert_eq!(json["solution"]["vehicles"][0]["nodes"], serde_json::json!([0, 2, 3, 0]));
}
