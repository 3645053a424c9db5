//! Utility functions for local search operations.

use crate::engine::model::{Plan, SearchModel};

/// Generate a list of neighbors for a node based on granularity.
///
/// Neighbors are the closest customers by arc cost; the depot and the node
/// itself are never included.
pub fn get_neighbors(node: usize, model: &SearchModel<'_>, granularity: usize) -> Vec<usize> {
    let mut distances: Vec<(usize, i64)> = (0..model.node_count)
        .filter(|&i| i != node && i != model.depot)
        .map(|i| (i, model.arc_cost(node, i)))
        .collect();

    // Stable sort keeps index order among equal distances
    distances.sort_by_key(|&(_, distance)| distance);
    distances.truncate(granularity);

    distances.into_iter().map(|(idx, _)| idx).collect()
}

/// Find the route and position holding a customer.
pub fn find_customer(plan: &Plan, customer: usize) -> Option<(usize, usize)> {
    plan.routes.iter().enumerate().find_map(|(r_idx, route)| {
        route
            .customers
            .iter()
            .position(|&c| c == customer)
            .map(|pos| (r_idx, pos))
    })
}

/// Copy of a route with the customer at `pos` removed.
pub fn without(customers: &[usize], pos: usize) -> Vec<usize> {
    let mut result = customers.to_vec();
    result.remove(pos);
    result
}

/// Copy of a route with `customer` inserted at `pos`.
pub fn with_inserted(customers: &[usize], pos: usize, customer: usize) -> Vec<usize> {
    let mut result = customers.to_vec();
    result.insert(pos, customer);
    result
}
