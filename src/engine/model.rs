//! Search-side view of a problem: arc costs, dimensions and route plans.

use crate::callbacks::{ArcCost, Transit};
use itertools::Itertools;
use std::iter;

/// A cumulative quantity tracked along each route.
///
/// Slack is always zero and the start cumul is fixed to zero, so the cumul at
/// a node is the sum of the transits of the arcs before it.
pub struct Dimension<'a> {
    pub name: &'static str,
    transit: Transit<'a>,
    capacities: Vec<i64>,
    span_cost_coefficient: i64,
}

impl<'a> Dimension<'a> {
    /// Create a dimension with one upper bound per vehicle.
    pub fn with_vehicle_capacity(name: &'static str, transit: Transit<'a>, capacities: Vec<i64>) -> Self {
        Dimension {
            name,
            transit,
            capacities,
            span_cost_coefficient: 0,
        }
    }

    /// Create a dimension with the same upper bound for every vehicle.
    pub fn with_capacity(name: &'static str, transit: Transit<'a>, capacity: i64, vehicles: usize) -> Self {
        Self::with_vehicle_capacity(name, transit, vec![capacity; vehicles])
    }

    /// Penalize the spread between the largest end cumul and the smallest start cumul.
    pub fn set_global_span_cost_coefficient(&mut self, coefficient: i64) {
        self.span_cost_coefficient = coefficient;
    }

    pub fn global_span_cost_coefficient(&self) -> i64 {
        self.span_cost_coefficient
    }

    #[inline]
    pub fn transit(&self, from: usize, to: usize) -> i64 {
        self.transit.evaluate(from, to)
    }

    #[inline]
    pub fn capacity(&self, vehicle: usize) -> i64 {
        self.capacities[vehicle]
    }
}

/// A route under construction or improvement, with cached evaluations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePlan {
    /// Visited customers, depot excluded
    pub customers: Vec<usize>,
    /// Sum of arc costs, depot legs included
    pub cost: i64,
    /// End cumul of each dimension
    pub end_cumuls: Vec<i64>,
}

impl RoutePlan {
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }
}

/// One route per vehicle, in vehicle order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    pub routes: Vec<RoutePlan>,
}

impl Plan {
    /// All customers currently placed, in route order.
    pub fn customers(&self) -> impl Iterator<Item = usize> + '_ {
        self.routes.iter().flat_map(|r| r.customers.iter().copied())
    }
}

/// Arc costs and dimensions registered for one solve call.
pub struct SearchModel<'a> {
    pub depot: usize,
    pub node_count: usize,
    pub vehicle_count: usize,
    arc_cost: ArcCost<'a>,
    dimensions: Vec<Dimension<'a>>,
}

impl<'a> SearchModel<'a> {
    /// Create a model pricing every vehicle's arcs with `arc_cost`.
    pub fn new(depot: usize, node_count: usize, vehicle_count: usize, arc_cost: ArcCost<'a>) -> Self {
        SearchModel {
            depot,
            node_count,
            vehicle_count,
            arc_cost,
            dimensions: Vec::new(),
        }
    }

    pub fn add_dimension(&mut self, dimension: Dimension<'a>) {
        self.dimensions.push(dimension);
    }

    pub fn dimensions(&self) -> &[Dimension<'a>] {
        &self.dimensions
    }

    /// Look a dimension up by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension<'a>> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    #[inline]
    pub fn arc_cost(&self, from: usize, to: usize) -> i64 {
        (self.arc_cost)(from, to)
    }

    /// Node sequence of a route with the depot at both ends.
    pub fn closed_path<'r>(&self, customers: &'r [usize]) -> impl Iterator<Item = usize> + 'r {
        let depot = self.depot;
        iter::once(depot)
            .chain(customers.iter().copied())
            .chain(iter::once(depot))
    }

    /// Arcs of a route, depot legs included.
    pub fn arcs<'r>(&self, customers: &'r [usize]) -> impl Iterator<Item = (usize, usize)> + 'r {
        self.closed_path(customers).tuple_windows()
    }

    /// Sum of arc costs along a route.
    pub fn route_cost(&self, customers: &[usize]) -> i64 {
        if customers.is_empty() {
            return self.arc_cost(self.depot, self.depot);
        }
        self.arcs(customers).map(|(from, to)| self.arc_cost(from, to)).sum()
    }

    /// End cumul of every dimension along a route.
    pub fn end_cumuls(&self, customers: &[usize]) -> Vec<i64> {
        self.dimensions
            .iter()
            .map(|dimension| {
                if customers.is_empty() {
                    return 0;
                }
                self.arcs(customers)
                    .map(|(from, to)| dimension.transit(from, to))
                    .sum()
            })
            .collect()
    }

    /// Evaluate a route for a vehicle, or `None` if it violates a dimension bound.
    ///
    /// Transits are non-negative, so bounding the end cumul bounds every cumul.
    pub fn evaluate_route(&self, vehicle: usize, customers: Vec<usize>) -> Option<RoutePlan> {
        let end_cumuls = self.end_cumuls(&customers);
        let feasible = self
            .dimensions
            .iter()
            .zip(&end_cumuls)
            .all(|(dimension, &cumul)| cumul <= dimension.capacity(vehicle));

        if !feasible {
            return None;
        }

        Some(RoutePlan {
            cost: self.route_cost(&customers),
            customers,
            end_cumuls,
        })
    }

    /// An empty plan: every vehicle goes straight from its start to its end.
    pub fn empty_plan(&self) -> Plan {
        let routes = (0..self.vehicle_count)
            .map(|_| RoutePlan {
                customers: Vec::new(),
                cost: self.arc_cost(self.depot, self.depot),
                end_cumuls: vec![0; self.dimensions.len()],
            })
            .collect();
        Plan { routes }
    }

    /// Global span cost of one dimension given the routes' end cumuls.
    ///
    /// Start cumuls are fixed to zero, so the span is the largest end cumul.
    pub fn span_cost(&self, dimension_index: usize, end_cumuls: impl Iterator<Item = i64>) -> i64 {
        let coefficient = self.dimensions[dimension_index].span_cost_coefficient;
        if coefficient == 0 {
            return 0;
        }
        let min_start = 0;
        let max_end = end_cumuls.max().unwrap_or(0);
        coefficient.saturating_mul(max_end - min_start)
    }

    /// Objective of a plan: total arc cost plus the span cost of every dimension.
    pub fn objective(&self, plan: &Plan) -> i64 {
        let arc_costs: i64 = plan.routes.iter().map(|r| r.cost).sum();
        (0..self.dimensions.len())
            .map(|d| self.span_cost(d, plan.routes.iter().map(|r| r.end_cumuls[d])))
            .fold(arc_costs, i64::saturating_add)
    }

    /// True when every customer appears in exactly one route.
    pub fn covers_all_customers(&self, plan: &Plan) -> bool {
        let mut seen = vec![false; self.node_count];
        for customer in plan.customers() {
            if customer == self.depot || seen[customer] {
                return false;
            }
            seen[customer] = true;
        }
        (0..self.node_count).filter(|&n| n != self.depot).all(|n| seen[n])
    }
}
