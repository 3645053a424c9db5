//! Configuration parameters for the route search engine.

use crate::variant::Variant;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Constructive heuristic used to build the first solution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstSolutionStrategy {
    /// Extend each vehicle's path by the cheapest feasible arc from its last node.
    PathCheapestArc,
    /// Insert the node with the cheapest feasible insertion over all routes.
    ParallelCheapestInsertion,
}

/// Improvement applied after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocalSearchMetaheuristic {
    /// A single descent to the first local optimum.
    GreedyDescent,
    /// Descent with arc penalties to escape local optima until the budget ends.
    GuidedLocalSearch,
}

/// Configuration settings for one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Soft wall-clock budget for the whole search
    pub time_limit: Duration,
    /// Constructive heuristic
    pub first_solution_strategy: FirstSolutionStrategy,
    /// Improvement phase; `None` returns the constructed solution as is
    pub metaheuristic: Option<LocalSearchMetaheuristic>,
    /// Number of closest customers considered as move partners
    pub granularity: usize,
    /// Guided local search rounds without a new best before stopping
    pub max_iterations_without_improvement: u32,
    /// Coefficient of the global span term of the distance dimension
    pub span_cost_coefficient: i64,
    /// Per-vehicle bound of the distance dimension
    pub max_route_distance: i64,
    /// Weight of arc penalties relative to the average arc cost
    pub penalty_factor: f64,
    /// Seed for neighbourhood ordering
    pub seed: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            time_limit: Duration::from_secs(1),
            first_solution_strategy: FirstSolutionStrategy::PathCheapestArc,
            metaheuristic: Some(LocalSearchMetaheuristic::GuidedLocalSearch),
            granularity: 20,
            max_iterations_without_improvement: 1000,
            span_cost_coefficient: 100,
            max_route_distance: 1_000_000,
            penalty_factor: 0.1,
            seed: 0,
        }
    }
}

impl SearchConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        SearchConfig::default()
    }

    /// Defaults for a variant: guided local search for CVRP, construction only
    /// for the plain VRP.
    pub fn for_variant(variant: Variant) -> Self {
        let config = SearchConfig::default();
        match variant {
            Variant::Cvrp => config,
            Variant::PlainVrp => config.without_improvement(),
        }
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = duration;
        self
    }

    /// Set the constructive heuristic.
    pub fn with_first_solution_strategy(mut self, strategy: FirstSolutionStrategy) -> Self {
        self.first_solution_strategy = strategy;
        self
    }

    /// Set the improvement metaheuristic.
    pub fn with_metaheuristic(mut self, metaheuristic: LocalSearchMetaheuristic) -> Self {
        self.metaheuristic = Some(metaheuristic);
        self
    }

    /// Skip the improvement phase.
    pub fn without_improvement(mut self) -> Self {
        self.metaheuristic = None;
        self
    }

    /// Set the granularity parameter.
    pub fn with_granularity(mut self, granularity: usize) -> Self {
        self.granularity = granularity;
        self
    }

    /// Set the maximum iterations without improvement.
    pub fn with_max_iterations_without_improvement(mut self, iterations: u32) -> Self {
        self.max_iterations_without_improvement = iterations;
        self
    }

    /// Set the global span cost coefficient.
    pub fn with_span_cost_coefficient(mut self, coefficient: i64) -> Self {
        self.span_cost_coefficient = coefficient;
        self
    }

    /// Set the distance bound used by the plain VRP.
    pub fn with_max_route_distance(mut self, distance: i64) -> Self {
        self.max_route_distance = distance;
        self
    }

    /// Set the guided local search penalty factor.
    pub fn with_penalty_factor(mut self, factor: f64) -> Self {
        self.penalty_factor = factor;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
