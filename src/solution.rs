//! Solution representation and extraction from a solved engine.

use crate::engine::{EngineState, RoutingEngine};
use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};

/// The route driven by one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRoute {
    /// Display identifier of the vehicle
    pub vehicle_id: String,
    /// Capacity of the vehicle
    pub capacity: i64,
    /// Visited nodes, with the depot at both ends
    pub nodes: Vec<usize>,
    /// Load on board after each node, aligned with `nodes`
    pub cumulative_loads: Vec<i64>,
    /// Sum of arc costs along the route
    pub distance: i64,
    /// Sum of demands along the route
    pub load: i64,
}

impl VehicleRoute {
    /// A route that leaves the depot only to return to it, i.e. an unused vehicle.
    pub fn is_degenerate(&self) -> bool {
        self.nodes.len() <= 2
    }

    /// The visited customers, depot excluded.
    pub fn customers(&self) -> &[usize] {
        if self.nodes.len() <= 2 {
            &[]
        } else {
            &self.nodes[1..self.nodes.len() - 1]
        }
    }
}

/// Represents a complete solution: one route per vehicle plus aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    /// Every vehicle's route, in fleet order, unused vehicles included
    pub vehicles: Vec<VehicleRoute>,
    /// Sum of route distances
    pub total_distance: i64,
    /// Sum of route loads
    pub total_load: i64,
    /// Longest route distance
    pub max_route_distance: i64,
    /// Objective value reported by the search
    pub objective: i64,
}

impl Solution {
    /// Build a solution from per-vehicle routes, deriving the aggregates.
    pub fn from_routes(vehicles: Vec<VehicleRoute>, objective: i64) -> Self {
        let total_distance = vehicles.iter().map(|r| r.distance).sum();
        let total_load = vehicles.iter().map(|r| r.load).sum();
        let max_route_distance = vehicles.iter().map(|r| r.distance).max().unwrap_or(0);

        Solution {
            vehicles,
            total_distance,
            total_load,
            max_route_distance,
            objective,
        }
    }

    /// Routes of the vehicles actually used.
    pub fn routes(&self) -> impl Iterator<Item = &VehicleRoute> + '_ {
        self.vehicles.iter().filter(|r| !r.is_degenerate())
    }

    /// Get the number of non-degenerate routes.
    pub fn route_count(&self) -> usize {
        self.routes().count()
    }

    /// Route of a vehicle by id, used or not.
    pub fn vehicle_route(&self, vehicle_id: &str) -> Option<&VehicleRoute> {
        self.vehicles.iter().find(|r| r.vehicle_id == vehicle_id)
    }

    /// Node sequences of the used routes, depot at both ends.
    pub fn node_sequences(&self) -> Vec<Vec<usize>> {
        self.routes().map(|r| r.nodes.clone()).collect()
    }
}

/// Walk each vehicle's successor chain of a solved engine into a [`Solution`].
///
/// Distances are summed with the engine's own arc cost callback so they agree
/// with the objective.
pub fn extract_solution(engine: &RoutingEngine<'_>) -> Result<Solution, InvalidInputError> {
    let not_solved = || InvalidInputError::EngineState {
        expected: EngineState::Solved.as_str(),
        actual: engine.state().as_str(),
    };
    if engine.state() != EngineState::Solved {
        return Err(not_solved());
    }
    let assignment = engine.assignment().ok_or_else(not_solved)?;

    let problem = engine.problem();
    let manager = engine.index_manager();
    let mut vehicles = Vec::with_capacity(problem.vehicle_count());

    for vehicle in 0..problem.vehicle_count() {
        let mut index = manager.start(vehicle);
        let mut nodes = Vec::new();
        let mut cumulative_loads = Vec::new();
        let mut distance = 0;
        let mut load = 0;

        while !manager.is_end(index) {
            if nodes.len() > manager.size() {
                return Err(InvalidInputError::BrokenRoute(vehicle));
            }

            let node = manager.index_to_node(index);
            load += problem.demand(node);
            nodes.push(node);
            cumulative_loads.push(load);

            let next = assignment
                .next(index)
                .ok_or(InvalidInputError::BrokenRoute(vehicle))?;
            distance += engine
                .arc_cost_for_vehicle(index, next, vehicle)
                .ok_or_else(not_solved)?;
            index = next;
        }
        nodes.push(manager.index_to_node(index));
        cumulative_loads.push(load);

        let owner = problem.vehicle(vehicle);
        vehicles.push(VehicleRoute {
            vehicle_id: owner.id.clone(),
            capacity: owner.capacity,
            nodes,
            cumulative_loads,
            distance,
            load,
        });
    }

    Ok(Solution::from_routes(vehicles, engine.objective_value()))
}
