//! Tests for the engine lifecycle, internal indexing and successor assignment.

use fleet_routing::engine::guided::Termination;
use fleet_routing::engine::index::{Assignment, IndexManager};
use fleet_routing::engine::model::{Plan, RoutePlan};
use fleet_routing::{
    build_model, EngineState, InvalidInputError, Location, RoutingEngine, RoutingProblem,
    SearchConfig, SearchOutcome, Variant,
};
use std::time::Duration;

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

fn route(customers: Vec<usize>) -> RoutePlan {
    RoutePlan {
        customers,
        cost: 0,
        end_cumuls: Vec::new(),
    }
}

#[test]
fn test_index_manager_layout() {
    let manager = IndexManager::new(4, 3, 0);

    assert_eq!(manager.size(), 3 + 2 * 3);
    assert_eq!(manager.vehicle_count(), 3);
    assert_eq!(manager.start(0), 3);
    assert_eq!(manager.start(2), 5);
    assert_eq!(manager.end(0), 6);
    assert_eq!(manager.end(2), 8);

    assert!(manager.is_start(3) && manager.is_start(5));
    assert!(!manager.is_start(2) && !manager.is_start(6));
    assert!(manager.is_end(6) && manager.is_end(8));
    assert!(!manager.is_end(5) && !manager.is_end(9));

    assert_eq!(manager.index_to_node(0), 1);
    assert_eq!(manager.index_to_node(2), 3);
    assert_eq!(manager.index_to_node(manager.start(1)), 0);
    assert_eq!(manager.index_to_node(manager.end(2)), 0);

    assert_eq!(manager.node_to_index(0), None);
    assert_eq!(manager.node_to_index(1), Some(0));
    assert_eq!(manager.node_to_index(3), Some(2));
    assert_eq!(manager.node_to_index(4), None);
}

#[test]
fn test_assignment_from_plan() {
    let manager = IndexManager::new(4, 3, 0);
    let plan = Plan {
        routes: vec![route(vec![2, 3]), route(vec![1]), route(Vec::new())],
    };

    let assignment = Assignment::from_plan(&plan, &manager);

    // Vehicle 0: start -> 2 -> 3 -> end
    assert_eq!(assignment.next(manager.start(0)), manager.node_to_index(2));
    assert_eq!(assignment.next(1), manager.node_to_index(3));
    assert_eq!(assignment.next(2), Some(manager.end(0)));
    // Vehicle 1: start -> 1 -> end
    assert_eq!(assignment.next(manager.start(1)), Some(0));
    assert_eq!(assignment.next(0), Some(manager.end(1)));
    // Unused vehicle goes straight to its end
    assert_eq!(assignment.next(manager.start(2)), Some(manager.end(2)));
    // End tokens have no successor
    assert_eq!(assignment.next(manager.end(0)), None);
    assert_eq!(assignment.next(100), None);
}

#[test]
fn test_engine_lifecycle() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    assert_eq!(engine.state(), EngineState::Unconfigured);
    assert!(engine.search_model().is_none());
    assert!(engine.arc_cost_for_vehicle(0, 1, 0).is_none());

    engine
        .configure(Variant::Cvrp, SearchConfig::new().without_improvement())
        .unwrap();
    assert_eq!(engine.state(), EngineState::Configured);
    assert_eq!(engine.variant(), Some(Variant::Cvrp));

    let outcome = engine.solve().unwrap();
    assert!(!outcome.is_infeasible());
    assert_eq!(engine.state(), EngineState::Solved);
    assert_eq!(engine.objective_value(), 30);
    assert!(engine.assignment().is_some());
}

#[test]
fn test_solve_before_configure_fails() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);

    assert_eq!(
        engine.solve().unwrap_err(),
        InvalidInputError::EngineState {
            expected: "configured",
            actual: "unconfigured"
        }
    );
}

#[test]
fn test_engine_cannot_be_reused() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine.configure(Variant::Cvrp, SearchConfig::new()).unwrap();

    assert_eq!(
        engine.configure(Variant::PlainVrp, SearchConfig::new()),
        Err(InvalidInputError::EngineState {
            expected: "unconfigured",
            actual: "configured"
        })
    );

    engine.solve().unwrap();
    assert_eq!(
        engine.solve().unwrap_err(),
        InvalidInputError::EngineState {
            expected: "configured",
            actual: "solved"
        }
    );
}

#[test]
fn test_cvrp_registers_capacity_dimension() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine.configure(Variant::Cvrp, SearchConfig::new()).unwrap();

    let model = engine.search_model().unwrap();
    assert_eq!(model.dimensions().len(), 1);
    let capacity = model.dimension("Capacity").unwrap();
    assert_eq!(capacity.capacity(0), 15);
    assert_eq!(capacity.capacity(1), 30);
    assert_eq!(capacity.global_span_cost_coefficient(), 0);
    // Demand is charged on leaving a node
    assert_eq!(capacity.transit(1, 2), 20);
    assert!(model.dimension("Distance").is_none());
}

#[test]
fn test_plain_vrp_registers_distance_dimension() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine
        .configure(Variant::PlainVrp, SearchConfig::for_variant(Variant::PlainVrp))
        .unwrap();

    let model = engine.search_model().unwrap();
    let distance = model.dimension("Distance").unwrap();
    assert_eq!(distance.capacity(2), 1_000_000);
    assert_eq!(distance.global_span_cost_coefficient(), 100);
    assert_eq!(distance.transit(0, 3), 9);
    assert_eq!(model.arc_cost(1, 2), 5);

    let manager = engine.index_manager();
    assert_eq!(
        engine.arc_cost_for_vehicle(manager.start(0), manager.node_to_index(3).unwrap(), 0),
        Some(9)
    );
}

#[test]
fn test_statistics_after_solve() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine
        .configure(Variant::Cvrp, SearchConfig::new().without_improvement())
        .unwrap();
    engine.solve().unwrap();

    let statistics = engine.statistics().unwrap();
    assert_eq!(statistics.iterations, 0);
    assert_eq!(statistics.initial_objective, 30);
    assert_eq!(statistics.best_objective, 30);
    assert_eq!(statistics.termination, Termination::Skipped);
}

#[test]
fn test_infeasible_state() {
    let problem = create_test_problem();
    let ids: Vec<String> = vec!["small".to_string()];
    let small_fleet = build_model(
        problem.locations().unwrap(),
        problem.demands(),
        &[10],
        &ids,
    )
    .unwrap();

    let mut engine = RoutingEngine::new(&small_fleet);
    engine.configure(Variant::Cvrp, SearchConfig::new()).unwrap();

    assert_eq!(engine.solve().unwrap(), SearchOutcome::Infeasible);
    assert_eq!(engine.state(), EngineState::Infeasible);
    assert!(engine.assignment().is_none());
    assert!(engine.statistics().is_none());
}

#[test]
fn test_time_limit_is_kept() {
    let problem = create_test_problem();
    let mut engine = RoutingEngine::new(&problem);
    engine
        .configure(
            Variant::Cvrp,
            SearchConfig::new().with_time_limit(Duration::from_millis(250)),
        )
        .unwrap();

    assert_eq!(engine.time_limit(), Duration::from_millis(250));
}
