//! Problem definition: the immutable routing model built once per request.

use crate::distance::{build_distance_matrix, DistanceMatrix, Location};
use crate::error::InvalidInputError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Index of the depot node. Node 0 is always the depot.
pub const DEPOT: usize = 0;

/// A vehicle of the fleet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: String,
    pub capacity: i64,
}

impl Vehicle {
    /// Create a new vehicle.
    pub fn new(id: impl Into<String>, capacity: i64) -> Self {
        Vehicle {
            id: id.into(),
            capacity,
        }
    }
}

/// Represents a routing problem instance.
///
/// The model bundles the distance matrix, the demand vector and the fleet.
/// It is never mutated after construction; concurrent requests each build
/// their own.
///
/// Deserialization runs the same checks as [`RoutingProblem::validate`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RawRoutingProblem")]
pub struct RoutingProblem {
    distance_matrix: DistanceMatrix,
    demands: Vec<i64>,
    vehicles: Vec<Vehicle>,
    locations: Option<Vec<Location>>,
}

/// Unchecked wire form of a [`RoutingProblem`].
#[derive(Deserialize)]
struct RawRoutingProblem {
    distance_matrix: DistanceMatrix,
    demands: Vec<i64>,
    vehicles: Vec<Vehicle>,
    #[serde(default)]
    locations: Option<Vec<Location>>,
}

impl TryFrom<RawRoutingProblem> for RoutingProblem {
    type Error = InvalidInputError;

    fn try_from(raw: RawRoutingProblem) -> Result<Self, Self::Error> {
        let problem = RoutingProblem {
            distance_matrix: raw.distance_matrix,
            demands: raw.demands,
            vehicles: raw.vehicles,
            locations: raw.locations,
        };
        problem.validate()?;
        Ok(problem)
    }
}

/// Build a routing model from raw input records.
///
/// `locations[0]` is the depot. `vehicle_capacities[v]` and `vehicle_ids[v]`
/// describe vehicle `v`.
pub fn build_model(
    locations: &[Location],
    demands: &[i64],
    vehicle_capacities: &[i64],
    vehicle_ids: &[String],
) -> Result<RoutingProblem, InvalidInputError> {
    let distance_matrix = build_distance_matrix(locations)?;
    let mut problem =
        RoutingProblem::from_matrix(distance_matrix, demands, vehicle_capacities, vehicle_ids)?;
    problem.locations = Some(locations.to_vec());
    Ok(problem)
}

impl RoutingProblem {
    /// Create a model from a precomputed distance matrix.
    pub fn from_matrix(
        distance_matrix: DistanceMatrix,
        demands: &[i64],
        vehicle_capacities: &[i64],
        vehicle_ids: &[String],
    ) -> Result<Self, InvalidInputError> {
        if vehicle_ids.len() != vehicle_capacities.len() {
            return Err(InvalidInputError::VehicleCountMismatch {
                expected: vehicle_capacities.len(),
                found: vehicle_ids.len(),
            });
        }

        let vehicles = vehicle_ids
            .iter()
            .zip(vehicle_capacities)
            .map(|(id, &capacity)| Vehicle::new(id.clone(), capacity))
            .collect();

        let problem = RoutingProblem {
            distance_matrix,
            demands: demands.to_vec(),
            vehicles,
            locations: None,
        };
        problem.validate()?;
        Ok(problem)
    }

    /// Check every invariant the engine relies on.
    ///
    /// Besides the per-field rules, the summed demands and capacities, and
    /// the largest possible plan distance, must fit in an `i64` so that no
    /// cumul computed during the search can overflow.
    pub fn validate(&self) -> Result<(), InvalidInputError> {
        let n = self.distance_matrix.size();
        if n == 0 {
            return Err(InvalidInputError::NoLocations);
        }
        if self.demands.len() != n {
            return Err(InvalidInputError::DemandCountMismatch {
                expected: n,
                found: self.demands.len(),
            });
        }
        if let Some(locations) = &self.locations {
            if locations.len() != n {
                return Err(InvalidInputError::LocationCountMismatch {
                    expected: n,
                    found: locations.len(),
                });
            }
        }
        if self.vehicles.is_empty() {
            return Err(InvalidInputError::NoVehicles);
        }
        if self.demands[DEPOT] != 0 {
            return Err(InvalidInputError::DepotDemand(self.demands[DEPOT]));
        }
        if let Some((node, &demand)) = self.demands.iter().enumerate().find(|(_, &d)| d < 0) {
            return Err(InvalidInputError::NegativeDemand { node, demand });
        }

        let mut seen = HashSet::new();
        for vehicle in &self.vehicles {
            if vehicle.capacity <= 0 {
                return Err(InvalidInputError::NonPositiveCapacity {
                    vehicle: vehicle.id.clone(),
                    capacity: vehicle.capacity,
                });
            }
            if !seen.insert(vehicle.id.as_str()) {
                return Err(InvalidInputError::DuplicateVehicleId(vehicle.id.clone()));
            }
        }

        checked_total(self.demands.iter().copied())
            .ok_or(InvalidInputError::QuantityOverflow("demand"))?;
        checked_total(self.vehicles.iter().map(|v| v.capacity))
            .ok_or(InvalidInputError::QuantityOverflow("capacity"))?;

        // All routes together leave each customer once and the depot at most
        // once per customer, so a plan never uses more than 2n arcs
        let max_arcs =
            i64::try_from(2 * n).map_err(|_| InvalidInputError::QuantityOverflow("distance"))?;
        self.distance_matrix
            .max_entry()
            .checked_mul(max_arcs)
            .ok_or(InvalidInputError::QuantityOverflow("distance"))?;

        Ok(())
    }

    /// Number of nodes, depot included.
    pub fn node_count(&self) -> usize {
        self.demands.len()
    }

    /// Get the number of customers (excluding the depot).
    pub fn customer_count(&self) -> usize {
        self.node_count() - 1
    }

    /// Number of vehicles in the fleet.
    pub fn vehicle_count(&self) -> usize {
        self.vehicles.len()
    }

    /// The depot node index.
    pub fn depot(&self) -> usize {
        DEPOT
    }

    /// Distance between two nodes.
    #[inline]
    pub fn distance(&self, from: usize, to: usize) -> i64 {
        self.distance_matrix.get(from, to)
    }

    /// Demand of a node.
    #[inline]
    pub fn demand(&self, node: usize) -> i64 {
        self.demands[node]
    }

    /// Capacity of a vehicle.
    #[inline]
    pub fn capacity(&self, vehicle: usize) -> i64 {
        self.vehicles[vehicle].capacity
    }

    /// A vehicle of the fleet by position.
    pub fn vehicle(&self, vehicle: usize) -> &Vehicle {
        &self.vehicles[vehicle]
    }

    /// The fleet, in vehicle order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Demand vector, one entry per node.
    pub fn demands(&self) -> &[i64] {
        &self.demands
    }

    /// Per-vehicle capacity vector, in fleet order.
    pub fn capacities(&self) -> Vec<i64> {
        self.vehicles.iter().map(|v| v.capacity).collect()
    }

    /// The precomputed travel costs.
    pub fn distance_matrix(&self) -> &DistanceMatrix {
        &self.distance_matrix
    }

    /// Coordinates of the nodes, when the model was built from locations.
    pub fn locations(&self) -> Option<&[Location]> {
        self.locations.as_deref()
    }

    /// Sum of all customer demands.
    pub fn total_demand(&self) -> i64 {
        self.demands.iter().fold(0i64, |total, &d| total.saturating_add(d))
    }

    /// Sum of all vehicle capacities.
    pub fn total_capacity(&self) -> i64 {
        self.vehicles.iter().fold(0i64, |total, v| total.saturating_add(v.capacity))
    }
}

/// Sum of non-negative quantities, or `None` on overflow.
fn checked_total(mut values: impl Iterator<Item = i64>) -> Option<i64> {
    values.try_fold(0i64, |total, value| total.checked_add(value))
}
