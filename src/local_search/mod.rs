//! Local search operators used by the improvement phase.
//!
//! Every move keeps all dimension bounds satisfied, so a feasible plan stays
//! feasible. Moves are scored on the augmented cost: route arc costs, plus
//! the guided local search arc penalties, plus global span costs.

pub mod relocate;
pub mod swap;
pub mod two_opt;
pub mod two_opt_star;
pub mod utils;

use crate::engine::model::{Plan, RoutePlan, SearchModel};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use std::time::Instant;

/// Moves improving the augmented cost by less than this are ignored.
const IMPROVEMENT_EPSILON: f64 = 1e-6;

/// Penalties accumulated on directed arcs by guided local search.
#[derive(Debug, Clone, Default)]
pub struct ArcPenalties {
    counts: HashMap<(usize, usize), u32>,
    /// Cost of one unit of penalty
    pub lambda: f64,
}

impl ArcPenalties {
    /// No penalties: the augmented cost equals the objective.
    pub fn none() -> Self {
        ArcPenalties::default()
    }

    #[inline]
    pub fn get(&self, from: usize, to: usize) -> u32 {
        self.counts.get(&(from, to)).copied().unwrap_or(0)
    }

    /// Add one unit of penalty to an arc.
    pub fn increment(&mut self, from: usize, to: usize) {
        *self.counts.entry((from, to)).or_insert(0) += 1;
    }

    pub fn is_active(&self) -> bool {
        self.lambda > 0.0 && !self.counts.is_empty()
    }

    /// Penalty term of a route.
    pub fn route_penalty(&self, model: &SearchModel<'_>, customers: &[usize]) -> f64 {
        if !self.is_active() || customers.is_empty() {
            return 0.0;
        }
        let units: u32 = model.arcs(customers).map(|(from, to)| self.get(from, to)).sum();
        self.lambda * units as f64
    }
}

/// Manages the descent over the relocate, swap, 2-opt and 2-opt* neighborhoods.
pub struct LocalSearch {
    pub granularity: usize,
    /// Closest customers of each node
    neighbors: Vec<Vec<usize>>,
    rng: ChaCha8Rng,
    deadline: Option<Instant>,
    /// Number of applied moves since creation
    pub move_count: usize,
}

impl LocalSearch {
    /// Create a local search for a model, preprocessing neighbor lists.
    pub fn new(model: &SearchModel<'_>, granularity: usize, seed: u64) -> Self {
        let neighbors = (0..model.node_count)
            .map(|node| utils::get_neighbors(node, model, granularity))
            .collect();

        LocalSearch {
            granularity,
            neighbors,
            rng: ChaCha8Rng::seed_from_u64(seed),
            deadline: None,
            move_count: 0,
        }
    }

    /// Stop descending once this instant has passed.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn deadline_passed(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// Descend to a local optimum of the augmented cost.
    ///
    /// Returns `false` if the deadline interrupted the descent.
    pub fn educate(&mut self, plan: &mut Plan, model: &SearchModel<'_>, penalties: &ArcPenalties) -> bool {
        loop {
            if self.deadline_passed() {
                return false;
            }

            let improved = self.relocate_neighborhood(plan, model, penalties)
                || self.swap_neighborhood(plan, model, penalties)
                || self.two_opt_neighborhood(plan, model, penalties)
                || self.two_opt_star_neighborhood(plan, model, penalties);

            if !improved {
                return true;
            }
        }
    }

    pub(crate) fn neighbors(&self, node: usize) -> &[usize] {
        &self.neighbors[node]
    }

    /// Augmented score of one route.
    fn route_score(route: &RoutePlan, model: &SearchModel<'_>, penalties: &ArcPenalties) -> f64 {
        route.cost as f64 + penalties.route_penalty(model, &route.customers)
    }

    /// Change of the augmented cost if the given routes were replaced.
    pub(crate) fn move_delta(
        plan: &Plan,
        model: &SearchModel<'_>,
        penalties: &ArcPenalties,
        changes: &[(usize, &RoutePlan)],
    ) -> f64 {
        let mut delta = 0.0;
        for &(r_idx, route) in changes {
            delta += Self::route_score(route, model, penalties)
                - Self::route_score(&plan.routes[r_idx], model, penalties);
        }

        for (d, dimension) in model.dimensions().iter().enumerate() {
            if dimension.global_span_cost_coefficient() == 0 {
                continue;
            }
            let old = model.span_cost(d, plan.routes.iter().map(|r| r.end_cumuls[d]));
            let new = model.span_cost(
                d,
                plan.routes.iter().enumerate().map(|(r_idx, r)| {
                    changes
                        .iter()
                        .find(|(changed, _)| *changed == r_idx)
                        .map_or(r.end_cumuls[d], |(_, route)| route.end_cumuls[d])
                }),
            );
            delta += (new - old) as f64;
        }

        delta
    }

    /// Evaluate replacements and apply them if they improve the augmented cost.
    pub(crate) fn try_apply(
        &mut self,
        plan: &mut Plan,
        model: &SearchModel<'_>,
        penalties: &ArcPenalties,
        changes: Vec<(usize, Vec<usize>)>,
    ) -> bool {
        let mut evaluated = Vec::with_capacity(changes.len());
        for (r_idx, customers) in changes {
            match model.evaluate_route(r_idx, customers) {
                Some(route) => evaluated.push((r_idx, route)),
                None => return false,
            }
        }

        let refs: Vec<(usize, &RoutePlan)> = evaluated.iter().map(|(r, route)| (*r, route)).collect();
        if Self::move_delta(plan, model, penalties, &refs) >= -IMPROVEMENT_EPSILON {
            return false;
        }

        for (r_idx, route) in evaluated {
            plan.routes[r_idx] = route;
        }
        self.move_count += 1;
        true
    }

    /// Route indices in a random order.
    pub(crate) fn shuffled_routes(&mut self, plan: &Plan) -> Vec<usize> {
        use rand::seq::SliceRandom;

        let mut route_indices: Vec<usize> = (0..plan.routes.len()).collect();
        route_indices.shuffle(&mut self.rng);
        route_indices
    }

    /// Positions `0..len` in a random order.
    pub(crate) fn shuffled_positions(&mut self, len: usize) -> Vec<usize> {
        use rand::seq::SliceRandom;

        let mut positions: Vec<usize> = (0..len).collect();
        positions.shuffle(&mut self.rng);
        positions
    }
}
