//! # fleet_routing
//!
//! Route optimization for a fleet of vehicles serving geographically located
//! customers from a single depot.
//!
//! The pipeline turns raw coordinates, demands and capacities into a
//! [`RoutingProblem`], searches for a low-cost feasible assignment of
//! customers to vehicles and decodes it into a [`Solution`]:
//!
//! 1. [`build_distance_matrix`] computes great-circle distances in whole km.
//! 2. [`build_model`] validates the inputs into an immutable model.
//! 3. [`solve`] builds a first solution with a cheapest-arc heuristic and,
//!    depending on the configuration, improves it with guided local search
//!    under a time budget.
//!
//! Two variants are supported: the plain VRP, which balances route lengths
//! through a global span penalty on a distance dimension, and the CVRP, which
//! bounds each route's load by its vehicle's capacity.

pub mod callbacks;
pub mod config;
pub mod distance;
pub mod engine;
pub mod error;
pub mod local_search;
pub mod problem;
pub mod report;
pub mod solution;
pub mod variant;

pub use crate::config::{FirstSolutionStrategy, LocalSearchMetaheuristic, SearchConfig};
pub use crate::distance::{build_distance_matrix, DistanceMatrix, Location};
pub use crate::engine::{EngineState, RoutingEngine, SearchOutcome};
pub use crate::error::InvalidInputError;
pub use crate::problem::{build_model, RoutingProblem, Vehicle};
pub use crate::solution::{Solution, VehicleRoute};
pub use crate::variant::Variant;

use std::time::Duration;

/// Solve a problem with the variant's default configuration and a time budget.
///
/// The plain VRP returns its first solution; the CVRP improves it with guided
/// local search until the budget is spent or the search converges.
pub fn solve(
    problem: &RoutingProblem,
    variant: Variant,
    time_budget: Duration,
) -> Result<SearchOutcome, InvalidInputError> {
    solve_with_config(
        problem,
        variant,
        SearchConfig::for_variant(variant).with_time_limit(time_budget),
    )
}

/// Solve a problem with an explicit configuration.
///
/// A fresh engine is created for the call, so concurrent calls never share
/// search state.
pub fn solve_with_config(
    problem: &RoutingProblem,
    variant: Variant,
    config: SearchConfig,
) -> Result<SearchOutcome, InvalidInputError> {
    let mut engine = RoutingEngine::new(problem);
    engine.configure(variant, config)?;
    engine.solve()
}
