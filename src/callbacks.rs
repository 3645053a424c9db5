//! Cost and constraint callbacks bound to a problem for one solve call.

use crate::problem::RoutingProblem;

/// Prices a directed arc between two nodes.
pub type ArcCost<'a> = Box<dyn Fn(usize, usize) -> i64 + 'a>;

/// Quantity picked up when a node is visited.
pub type UnaryTransit<'a> = Box<dyn Fn(usize) -> i64 + 'a>;

/// Arc cost callback: `(from, to) -> matrix[from][to]`, identical for every vehicle.
pub fn arc_cost_callback(problem: &RoutingProblem) -> impl Fn(usize, usize) -> i64 + '_ {
    move |from, to| problem.distance(from, to)
}

/// Demand callback: `node -> demands[node]`.
pub fn demand_callback(problem: &RoutingProblem) -> impl Fn(usize) -> i64 + '_ {
    move |node| problem.demand(node)
}

/// The quantity a dimension accumulates along a route.
pub enum Transit<'a> {
    /// Accumulates the value of each traversed arc.
    Arc(ArcCost<'a>),
    /// Accumulates the value of each node the arc leaves.
    Unary(UnaryTransit<'a>),
}

impl<'a> Transit<'a> {
    /// Transit added when moving from `from` to `to`.
    #[inline]
    pub fn evaluate(&self, from: usize, to: usize) -> i64 {
        match self {
            Transit::Arc(callback) => callback(from, to),
            Transit::Unary(callback) => callback(from),
        }
    }
}
