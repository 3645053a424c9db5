//! Unit tests for building and validating the routing model.

use fleet_routing::callbacks::{arc_cost_callback, demand_callback};
use fleet_routing::distance::{DistanceMatrix, Location};
use fleet_routing::problem::{build_model, RoutingProblem, DEPOT};
use fleet_routing::InvalidInputError;

fn manhattan_locations() -> Vec<Location> {
    vec![
        Location::new(40.785091, -73.968285),
        Location::new(40.748817, -73.985428),
        Location::new(40.730610, -73.935242),
        Location::new(40.712776, -74.005974),
    ]
}

fn ids(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_build_model() {
    let problem = build_model(
        &manhattan_locations(),
        &[0, 20, 5, 10],
        &[15, 30, 10],
        &ids(&["1", "2", "3"]),
    )
    .unwrap();

    assert_eq!(problem.node_count(), 4);
    assert_eq!(problem.customer_count(), 3);
    assert_eq!(problem.vehicle_count(), 3);
    assert_eq!(problem.depot(), DEPOT);
    assert_eq!(problem.demands(), &[0, 20, 5, 10]);
    assert_eq!(problem.capacities(), vec![15, 30, 10]);
    assert_eq!(problem.vehicle(1).id, "2");
    assert_eq!(problem.total_demand(), 35);
    assert_eq!(problem.total_capacity(), 55);
    assert_eq!(problem.distance(0, 3), 9);
    assert_eq!(problem.distance_matrix().size(), 4);
    assert_eq!(problem.locations().map(|l| l.len()), Some(4));
}

#[test]
fn test_build_model_rejects_demand_count_mismatch() {
    let result = build_model(&manhattan_locations(), &[0, 20, 5], &[15], &ids(&["a"]));
    assert_eq!(
        result.unwrap_err(),
        InvalidInputError::DemandCountMismatch {
            expected: 4,
            found: 3
        }
    );
}

#[test]
fn test_build_model_rejects_vehicle_count_mismatch() {
    let result = build_model(&manhattan_locations(), &[0, 1, 1, 1], &[15, 10], &ids(&["a"]));
    assert_eq!(
        result.unwrap_err(),
        InvalidInputError::VehicleCountMismatch {
            expected: 2,
            found: 1
        }
    );
}

#[test]
fn test_build_model_rejects_empty_fleet() {
    let result = build_model(&manhattan_locations(), &[0, 1, 1, 1], &[], &[]);
    assert_eq!(result.unwrap_err(), InvalidInputError::NoVehicles);
}

#[test]
fn test_build_model_rejects_negative_demand() {
    let result = build_model(&manhattan_locations(), &[0, 1, -2, 1], &[15], &ids(&["a"]));
    assert_eq!(
        result.unwrap_err(),
        InvalidInputError::NegativeDemand { node: 2, demand: -2 }
    );
}

#[test]
fn test_build_model_rejects_depot_demand() {
    let result = build_model(&manhattan_locations(), &[3, 1, 1, 1], &[15], &ids(&["a"]));
    assert_eq!(result.unwrap_err(), InvalidInputError::DepotDemand(3));
}

#[test]
fn test_build_model_rejects_non_positive_capacity() {
    let result = build_model(&manhattan_locations(), &[0, 1, 1, 1], &[15, 0], &ids(&["a", "b"]));
    assert_eq!(
        result.unwrap_err(),
        InvalidInputError::NonPositiveCapacity {
            vehicle: "b".to_string(),
            capacity: 0
        }
    );
}

#[test]
fn test_build_model_rejects_duplicate_vehicle_ids() {
    let result = build_model(&manhattan_locations(), &[0, 1, 1, 1], &[15, 10], &ids(&["a", "a"]));
    assert_eq!(
        result.unwrap_err(),
        InvalidInputError::DuplicateVehicleId("a".to_string())
    );
}

#[test]
fn test_build_model_rejects_empty_locations() {
    let result = build_model(&[], &[], &[15], &ids(&["a"]));
    assert_eq!(result.unwrap_err(), InvalidInputError::NoLocations);
}

#[test]
fn test_from_matrix_has_no_locations() {
    let matrix = DistanceMatrix::from_rows(vec![vec![0, 5], vec![5, 0]]).unwrap();
    let problem = RoutingProblem::from_matrix(matrix, &[0, 2], &[3], &ids(&["v"])).unwrap();

    assert!(problem.locations().is_none());
    assert_eq!(problem.distance(1, 0), 5);
}

#[test]
fn test_callbacks_read_the_model() {
    let problem = build_model(
        &manhattan_locations(),
        &[0, 20, 5, 10],
        &[15, 30, 10],
        &ids(&["1", "2", "3"]),
    )
    .unwrap();

    let arc_cost = arc_cost_callback(&problem);
    let demand = demand_callback(&problem);

    assert_eq!(arc_cost(1, 2), 5);
    assert_eq!(arc_cost(2, 1), 5);
    assert_eq!(arc_cost(3, 3), 0);
    assert_eq!(demand(0), 0);
    assert_eq!(demand(1), 20);
    assert_eq!(demand(3), 10);
}

#[test]
fn test_build_model_rejects_demand_overflow() {
    let result = build_model(&manhattan_locations()[..3], &[0, i64::MAX, 1], &[i64::MAX], &ids(&["a"]));
    assert_eq!(result.unwrap_err(), InvalidInputError::QuantityOverflow("demand"));
}

#[test]
fn test_build_model_rejects_capacity_overflow() {
    let result = build_model(&manhattan_locations(), &[0, 1, 1, 1], &[i64::MAX, 1], &ids(&["a", "b"]));
    assert_eq!(result.unwrap_err(), InvalidInputError::QuantityOverflow("capacity"));
}

#[test]
fn test_from_matrix_rejects_distance_overflow() {
    let huge = i64::MAX / 2;
    let matrix = DistanceMatrix::from_rows(vec![vec![0, huge], vec![huge, 0]]).unwrap();
    let result = RoutingProblem::from_matrix(matrix, &[0, 1], &[5], &ids(&["a"]));
    assert_eq!(result.unwrap_err(), InvalidInputError::QuantityOverflow("distance"));
}

#[test]
fn test_problem_serde_keeps_the_model() {
    let problem = build_model(
        &manhattan_locations(),
        &[0, 20, 5, 10],
        &[15, 30, 10],
        &ids(&["1", "2", "3"]),
    )
    .unwrap();

    let json = serde_json::to_string(&problem).unwrap();
    let restored: RoutingProblem = serde_json::from_str(&json).unwrap();

    assert!(restored.validate().is_ok());
    assert_eq!(restored.distance_matrix(), problem.distance_matrix());
    assert_eq!(restored.demands(), problem.demands());
    assert_eq!(restored.vehicles(), problem.vehicles());
    assert_eq!(restored.locations(), problem.locations());
}

#[test]
fn test_deserialized_problem_is_validated() {
    let cases = [
        // Three demands against a 2x2 matrix and no vehicles
        (
            r#"{"distance_matrix":{"rows":[[0,3],[3,0]]},"demands":[5,1,1],"vehicles":[],"locations":null}"#,
            "expected 2 demands",
        ),
        (
            r#"{"distance_matrix":{"rows":[[0,3],[3,0]]},"demands":[5,1],"vehicles":[{"id":"a","capacity":4}]}"#,
            "depot demand must be 0, got 5",
        ),
        (
            r#"{"distance_matrix":{"rows":[[0,3],[3,0]]},"demands":[0,1],"vehicles":[]}"#,
            "at least one vehicle is required",
        ),
        (
            r#"{"distance_matrix":{"rows":[]},"demands":[],"vehicles":[{"id":"a","capacity":4}]}"#,
            "at least one location",
        ),
        (
            r#"{"distance_matrix":{"rows":[[0,3],[4,0]]},"demands":[0,1],"vehicles":[{"id":"a","capacity":4}]}"#,
            "not symmetric",
        ),
        (
            r#"{"distance_matrix":{"rows":[[0,3],[3,0]]},"demands":[0,1],"vehicles":[{"id":"a","capacity":4}],"locations":[{"lat":0.0,"lon":0.0}]}"#,
            "expected 2 locations",
        ),
        (
            r#"{"distance_matrix":{"rows":[[0,3],[3,0]]},"demands":[0,1],"vehicles":[{"id":"a","capacity":4},{"id":"a","capacity":2}]}"#,
            "used more than once",
        ),
    ];

    for (json, message) in cases {
        let error = serde_json::from_str::<RoutingProblem>(json).unwrap_err();
        assert!(
            error.to_string().contains(message),
            "{} should fail with {:?}, got {}",
            json,
            message,
            error
        );
    }
}

#[test]
fn test_deserialized_matrix_is_validated() {
    assert!(serde_json::from_str::<DistanceMatrix>(r#"{"rows":[[0,3],[3]]}"#).is_err());
    assert!(serde_json::from_str::<DistanceMatrix>(r#"{"rows":[[1]]}"#).is_err());

    let matrix: DistanceMatrix = serde_json::from_str(r#"{"rows":[[0,3],[3,0]]}"#).unwrap();
    assert_eq!(matrix.get(0, 1), 3);
}
