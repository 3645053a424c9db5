//! Constructive heuristics building the first solution.

use super::model::{Plan, SearchModel};
use crate::config::FirstSolutionStrategy;
use log::debug;

/// Build a first solution, or `None` if some customer could not be placed.
pub fn build_first_solution(model: &SearchModel<'_>, strategy: FirstSolutionStrategy) -> Option<Plan> {
    let plan = match strategy {
        FirstSolutionStrategy::PathCheapestArc => path_cheapest_arc(model),
        FirstSolutionStrategy::ParallelCheapestInsertion => parallel_cheapest_insertion(model),
    };

    if model.covers_all_customers(&plan) {
        Some(plan)
    } else {
        let placed = plan.customers().count();
        debug!(
            "construction placed {} of {} customers",
            placed,
            model.node_count.saturating_sub(1)
        );
        None
    }
}

/// Extend one vehicle at a time from its last node by the cheapest feasible arc.
///
/// A vehicle's route is closed when no unassigned node can be appended without
/// breaking a dimension bound; the next vehicle then starts from the depot.
pub fn path_cheapest_arc(model: &SearchModel<'_>) -> Plan {
    let depot = model.depot;
    let mut assigned = vec![false; model.node_count];
    assigned[depot] = true;
    let mut remaining = model.node_count - 1;
    let mut plan = model.empty_plan();

    for vehicle in 0..model.vehicle_count {
        if remaining == 0 {
            break;
        }

        let mut last = depot;
        let mut cumuls = vec![0; model.dimensions().len()];
        let mut customers = Vec::new();

        loop {
            let mut best: Option<(usize, i64)> = None;

            for node in 0..model.node_count {
                if assigned[node] {
                    continue;
                }
                let fits = model.dimensions().iter().zip(&cumuls).all(|(dimension, &cumul)| {
                    cumul + dimension.transit(last, node) + dimension.transit(node, depot)
                        <= dimension.capacity(vehicle)
                });
                if !fits {
                    continue;
                }
                let cost = model.arc_cost(last, node);
                if best.map_or(true, |(_, best_cost)| cost < best_cost) {
                    best = Some((node, cost));
                }
            }

            let Some((node, _)) = best else {
                break;
            };

            for (cumul, dimension) in cumuls.iter_mut().zip(model.dimensions()) {
                *cumul += dimension.transit(last, node);
            }
            assigned[node] = true;
            remaining -= 1;
            customers.push(node);
            last = node;
        }

        if let Some(route) = model.evaluate_route(vehicle, customers) {
            plan.routes[vehicle] = route;
        }
    }

    plan
}

/// Repeatedly insert the unassigned node whose cheapest feasible insertion,
/// over every vehicle and position, adds the least arc cost.
pub fn parallel_cheapest_insertion(model: &SearchModel<'_>) -> Plan {
    let depot = model.depot;
    let mut plan = model.empty_plan();
    let mut unassigned: Vec<usize> = (0..model.node_count).filter(|&n| n != depot).collect();

    while !unassigned.is_empty() {
        // (delta, position in unassigned, vehicle, insert position)
        let mut best: Option<(i64, usize, usize, usize)> = None;

        for (slot, &node) in unassigned.iter().enumerate() {
            for (vehicle, route) in plan.routes.iter().enumerate() {
                for pos in 0..=route.customers.len() {
                    let prev = if pos == 0 { depot } else { route.customers[pos - 1] };
                    let next = if pos == route.customers.len() {
                        depot
                    } else {
                        route.customers[pos]
                    };
                    let delta = model.arc_cost(prev, node) + model.arc_cost(node, next)
                        - model.arc_cost(prev, next);

                    if best.map_or(true, |(best_delta, ..)| delta < best_delta) {
                        let within_bounds = model
                            .dimensions()
                            .iter()
                            .zip(&route.end_cumuls)
                            .all(|(dimension, &cumul)| {
                                cumul - dimension.transit(prev, next)
                                    + dimension.transit(prev, node)
                                    + dimension.transit(node, next)
                                    <= dimension.capacity(vehicle)
                            });
                        if within_bounds {
                            best = Some((delta, slot, vehicle, pos));
                        }
                    }
                }
            }
        }

        let Some((_, slot, vehicle, pos)) = best else {
            break;
        };

        let node = unassigned.remove(slot);
        let mut customers = plan.routes[vehicle].customers.clone();
        customers.insert(pos, node);
        match model.evaluate_route(vehicle, customers) {
            Some(route) => plan.routes[vehicle] = route,
            None => break,
        }
    }

    plan
}
