//! Route search engine: construction followed by time-bounded improvement.
//!
//! An engine is created for one problem, configured once with a variant and
//! a [`SearchConfig`], and solved once. Nothing is shared between engines, so
//! concurrent requests each build their own.

pub mod construction;
pub mod guided;
pub mod index;
pub mod model;

use crate::callbacks::{arc_cost_callback, demand_callback, Transit};
use crate::config::SearchConfig;
use crate::error::InvalidInputError;
use crate::problem::{RoutingProblem, DEPOT};
use crate::report::SearchStatistics;
use crate::solution::{extract_solution, Solution};
use crate::variant::Variant;

use self::guided::Termination;
use self::index::{Assignment, IndexManager};
use self::model::{Dimension, SearchModel};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{Duration, Instant};

/// Lifecycle of a [`RoutingEngine`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Unconfigured,
    Configured,
    Searching,
    Solved,
    Infeasible,
}

impl EngineState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EngineState::Unconfigured => "unconfigured",
            EngineState::Configured => "configured",
            EngineState::Searching => "searching",
            EngineState::Solved => "solved",
            EngineState::Infeasible => "infeasible",
        }
    }
}

impl fmt::Display for EngineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "solution", rename_all = "snake_case")]
pub enum SearchOutcome {
    /// Every customer was placed within the constraints.
    Solved(Solution),
    /// No assignment satisfying the constraints was found.
    Infeasible,
}

impl SearchOutcome {
    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Infeasible => None,
        }
    }

    pub fn into_solution(self) -> Option<Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            SearchOutcome::Infeasible => None,
        }
    }

    pub fn is_infeasible(&self) -> bool {
        matches!(self, SearchOutcome::Infeasible)
    }
}

/// The search engine for a single solve call.
pub struct RoutingEngine<'a> {
    problem: &'a RoutingProblem,
    manager: IndexManager,
    state: EngineState,
    variant: Option<Variant>,
    config: SearchConfig,
    model: Option<SearchModel<'a>>,
    assignment: Option<Assignment>,
    objective: i64,
    statistics: Option<SearchStatistics>,
}

impl<'a> RoutingEngine<'a> {
    /// Create an unconfigured engine bound to a problem.
    pub fn new(problem: &'a RoutingProblem) -> Self {
        RoutingEngine {
            problem,
            manager: IndexManager::new(problem.node_count(), problem.vehicle_count(), DEPOT),
            state: EngineState::Unconfigured,
            variant: None,
            config: SearchConfig::default(),
            model: None,
            assignment: None,
            objective: 0,
            statistics: None,
        }
    }

    fn expect_state(&self, expected: EngineState) -> Result<(), InvalidInputError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(InvalidInputError::EngineState {
                expected: expected.as_str(),
                actual: self.state.as_str(),
            })
        }
    }

    /// Register the arc cost evaluator for all vehicles and the variant's dimension.
    ///
    /// A model that breaks its invariants is rejected here rather than
    /// surfacing later as an infeasible search.
    pub fn configure(&mut self, variant: Variant, config: SearchConfig) -> Result<(), InvalidInputError> {
        self.expect_state(EngineState::Unconfigured)?;

        let problem = self.problem;
        problem.validate()?;
        let vehicles = problem.vehicle_count();
        let mut model = SearchModel::new(
            DEPOT,
            problem.node_count(),
            vehicles,
            Box::new(arc_cost_callback(problem)),
        );

        match variant {
            Variant::PlainVrp => {
                let mut distance = Dimension::with_capacity(
                    variant.dimension_name(),
                    Transit::Arc(Box::new(arc_cost_callback(problem))),
                    config.max_route_distance,
                    vehicles,
                );
                distance.set_global_span_cost_coefficient(config.span_cost_coefficient);
                model.add_dimension(distance);
            }
            Variant::Cvrp => {
                model.add_dimension(Dimension::with_vehicle_capacity(
                    variant.dimension_name(),
                    Transit::Unary(Box::new(demand_callback(problem))),
                    problem.capacities(),
                ));
            }
        }

        info!(
            "configured {} with {} nodes and {} vehicles",
            variant,
            problem.node_count(),
            vehicles
        );

        self.model = Some(model);
        self.variant = Some(variant);
        self.config = config;
        self.state = EngineState::Configured;
        Ok(())
    }

    /// Run construction and improvement, then extract the solution.
    pub fn solve(&mut self) -> Result<SearchOutcome, InvalidInputError> {
        self.expect_state(EngineState::Configured)?;
        let (Some(model), Some(variant)) = (self.model.as_ref(), self.variant) else {
            return Err(InvalidInputError::EngineState {
                expected: EngineState::Configured.as_str(),
                actual: self.state.as_str(),
            });
        };

        self.state = EngineState::Searching;
        let start_time = Instant::now();
        let deadline = start_time.checked_add(self.config.time_limit);

        if variant == Variant::Cvrp && self.problem.total_demand() > self.problem.total_capacity() {
            info!(
                "total demand {} exceeds total capacity {}",
                self.problem.total_demand(),
                self.problem.total_capacity()
            );
            self.state = EngineState::Infeasible;
            return Ok(SearchOutcome::Infeasible);
        }

        let Some(initial) = construction::build_first_solution(model, self.config.first_solution_strategy) else {
            info!("no feasible first solution");
            self.state = EngineState::Infeasible;
            return Ok(SearchOutcome::Infeasible);
        };
        let initial_objective = model.objective(&initial);
        debug!("first solution objective {}", initial_objective);

        let (best, objective, iterations, termination) = match self.config.metaheuristic {
            Some(metaheuristic) => {
                let improvement = guided::improve(model, initial, metaheuristic, &self.config, deadline);
                (
                    improvement.best,
                    improvement.best_objective,
                    improvement.iterations,
                    improvement.termination,
                )
            }
            None => (initial, initial_objective, 0, Termination::Skipped),
        };

        let runtime = start_time.elapsed();
        info!(
            "search finished: objective {} after {} rounds in {:?} ({:?})",
            objective, iterations, runtime, termination
        );

        self.assignment = Some(Assignment::from_plan(&best, &self.manager));
        self.objective = objective;
        self.statistics = Some(SearchStatistics {
            iterations,
            runtime,
            initial_objective,
            best_objective: objective,
            termination,
        });
        self.state = EngineState::Solved;

        Ok(SearchOutcome::Solved(extract_solution(self)?))
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn problem(&self) -> &RoutingProblem {
        self.problem
    }

    pub fn variant(&self) -> Option<Variant> {
        self.variant
    }

    pub fn index_manager(&self) -> &IndexManager {
        &self.manager
    }

    /// Successor assignment of the solved search.
    pub fn assignment(&self) -> Option<&Assignment> {
        self.assignment.as_ref()
    }

    /// Registered arc costs and dimensions, once configured.
    pub fn search_model(&self) -> Option<&SearchModel<'a>> {
        self.model.as_ref()
    }

    /// Cost of the arc between two internal indices, identical for every vehicle.
    pub fn arc_cost_for_vehicle(&self, from_index: usize, to_index: usize, _vehicle: usize) -> Option<i64> {
        let model = self.model.as_ref()?;
        Some(model.arc_cost(
            self.manager.index_to_node(from_index),
            self.manager.index_to_node(to_index),
        ))
    }

    /// Objective value of the solved search.
    pub fn objective_value(&self) -> i64 {
        self.objective
    }

    pub fn statistics(&self) -> Option<&SearchStatistics> {
        self.statistics.as_ref()
    }

    pub fn time_limit(&self) -> Duration {
        self.config.time_limit
    }
}
