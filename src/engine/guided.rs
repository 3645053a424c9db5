//! Improvement phase: greedy descent and guided local search.

use super::model::{Plan, SearchModel};
use crate::config::{LocalSearchMetaheuristic, SearchConfig};
use crate::local_search::{ArcPenalties, LocalSearch};
use log::{debug, info, trace};
use std::time::Instant;

/// Why the improvement phase stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The time budget ran out.
    TimeLimit,
    /// Too many rounds without a new best solution.
    NoImprovement,
    /// A local optimum was reached and nothing else was requested.
    LocalOptimum,
    /// There was nothing to improve.
    NothingToImprove,
    /// The improvement phase was disabled.
    Skipped,
}

/// Result of the improvement phase.
pub struct Improvement {
    pub best: Plan,
    pub best_objective: i64,
    pub iterations: u32,
    pub termination: Termination,
}

/// Improve a feasible plan until the deadline or convergence.
pub fn improve(
    model: &SearchModel<'_>,
    initial: Plan,
    metaheuristic: LocalSearchMetaheuristic,
    config: &SearchConfig,
    deadline: Option<Instant>,
) -> Improvement {
    let granularity = config.granularity.max(1);
    let mut local_search = LocalSearch::new(model, granularity, config.seed);
    if let Some(deadline) = deadline {
        local_search = local_search.with_deadline(deadline);
    }

    match metaheuristic {
        LocalSearchMetaheuristic::GreedyDescent => {
            let mut plan = initial;
            let finished = local_search.educate(&mut plan, model, &ArcPenalties::none());
            let best_objective = model.objective(&plan);
            Improvement {
                best: plan,
                best_objective,
                iterations: 1,
                termination: if finished {
                    Termination::LocalOptimum
                } else {
                    Termination::TimeLimit
                },
            }
        }
        LocalSearchMetaheuristic::GuidedLocalSearch => {
            guided_local_search(model, initial, &mut local_search, config)
        }
    }
}

/// Guided local search.
///
/// Each round descends on the penalty-augmented cost, records the plan if its
/// real objective is the best so far, then adds one penalty unit to the arcs
/// of maximal utility `cost / (1 + penalty)` in the current plan.
fn guided_local_search(
    model: &SearchModel<'_>,
    initial: Plan,
    local_search: &mut LocalSearch,
    config: &SearchConfig,
) -> Improvement {
    let mut current = initial;
    let mut best = current.clone();
    let mut best_objective = model.objective(&best);
    let mut penalties = ArcPenalties::none();
    let mut iterations = 0;
    let mut iterations_without_improvement = 0;

    let termination = loop {
        if local_search.deadline_passed() {
            break Termination::TimeLimit;
        }

        let finished = local_search.educate(&mut current, model, &penalties);
        iterations += 1;

        let objective = model.objective(&current);
        if objective < best_objective {
            info!(
                "guided local search: new best objective {} (round {})",
                objective, iterations
            );
            best = current.clone();
            best_objective = objective;
            iterations_without_improvement = 0;
        } else {
            iterations_without_improvement += 1;
        }

        if !finished {
            break Termination::TimeLimit;
        }
        if iterations_without_improvement >= config.max_iterations_without_improvement {
            break Termination::NoImprovement;
        }

        let arcs: Vec<(usize, usize)> = current
            .routes
            .iter()
            .filter(|route| !route.is_empty())
            .flat_map(|route| model.arcs(&route.customers))
            .collect();
        if arcs.is_empty() {
            break Termination::NothingToImprove;
        }

        if penalties.lambda == 0.0 {
            penalties.lambda = config.penalty_factor * objective as f64 / arcs.len() as f64;
            debug!("guided local search: penalty lambda {:.3}", penalties.lambda);
            if penalties.lambda <= 0.0 {
                break Termination::NothingToImprove;
            }
        }

        let utility = |&(from, to): &(usize, usize)| {
            model.arc_cost(from, to) as f64 / (1.0 + penalties.get(from, to) as f64)
        };
        let max_utility = arcs.iter().map(utility).fold(f64::MIN, f64::max);
        let penalized: Vec<(usize, usize)> = arcs
            .iter()
            .copied()
            .filter(|arc| utility(arc) >= max_utility)
            .collect();
        for (from, to) in penalized {
            trace!("penalizing arc {} -> {}", from, to);
            penalties.increment(from, to);
        }
    };

    Improvement {
        best,
        best_objective,
        iterations,
        termination,
    }
}
