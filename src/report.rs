//! Reporting helpers: text reports, route graphs and search statistics.
//!
//! These are the hand-off points to an external renderer; nothing here
//! touches the filesystem.

use crate::engine::guided::Termination;
use crate::solution::Solution;
use crate::variant::Variant;
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::time::Duration;

/// Format a duration as hours, minutes, seconds and milliseconds.
pub fn format_duration(duration: Duration) -> String {
    let total_seconds = duration.as_secs();
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!(
        "{}h {:02}m {:02}s {:03}ms",
        hours,
        minutes,
        seconds,
        duration.subsec_millis()
    )
}

/// Statistics about one search run.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatistics {
    pub iterations: u32,
    pub runtime: Duration,
    pub initial_objective: i64,
    pub best_objective: i64,
    pub termination: Termination,
}

impl SearchStatistics {
    /// Format the statistics as a string.
    pub fn format(&self) -> String {
        format!(
            "Search Statistics:
- Improvement Rounds: {}
- Runtime: {}
- First Solution Objective: {}
- Best Objective: {}
- Stopped By: {:?}",
            self.iterations,
            format_duration(self.runtime),
            self.initial_objective,
            self.best_objective,
            self.termination
        )
    }
}

/// Render the textual report of a solution.
///
/// CVRP reports running loads along each route and the totals; the plain VRP
/// reports distances and the longest route.
pub fn format_report(solution: &Solution, variant: Variant) -> String {
    let mut out = format!("Objective: {}\n", solution.objective);

    for route in &solution.vehicles {
        out.push_str(&format!("Route for vehicle {}:\n", route.vehicle_id));

        let stops: Vec<String> = match variant {
            Variant::Cvrp => route
                .nodes
                .iter()
                .zip(&route.cumulative_loads)
                .map(|(node, load)| format!("{} Load({})", node, load))
                .collect(),
            Variant::PlainVrp => route.nodes.iter().map(|n| n.to_string()).collect(),
        };
        out.push_str(&format!(" {}\n", stops.join(" -> ")));
        out.push_str(&format!("Distance of the route: {}km\n", route.distance));
        if variant == Variant::Cvrp {
            out.push_str(&format!("Load of the route: {}\n", route.load));
        }
    }

    match variant {
        Variant::Cvrp => {
            out.push_str(&format!(
                "Total distance of all routes: {}km\n",
                solution.total_distance
            ));
            out.push_str(&format!("Total load of all routes: {}\n", solution.total_load));
        }
        Variant::PlainVrp => {
            out.push_str(&format!(
                "Maximum of the route distances: {}km\n",
                solution.max_route_distance
            ));
        }
    }

    out
}

/// Directed graph of the arcs used by the solution's routes.
///
/// Node weights are location indices, edge weights are the id of the vehicle
/// driving the arc.
pub fn route_graph(solution: &Solution) -> DiGraph<usize, String> {
    let mut graph = DiGraph::new();
    let mut indices: HashMap<usize, NodeIndex> = HashMap::new();

    for route in solution.routes() {
        for pair in route.nodes.windows(2) {
            let from = *indices
                .entry(pair[0])
                .or_insert_with(|| graph.add_node(pair[0]));
            let to = *indices
                .entry(pair[1])
                .or_insert_with(|| graph.add_node(pair[1]));
            graph.add_edge(from, to, route.vehicle_id.clone());
        }
    }

    graph
}

/// Graphviz DOT rendering of [`route_graph`].
pub fn to_dot(solution: &Solution) -> String {
    format!("{}", Dot::new(&route_graph(solution)))
}
