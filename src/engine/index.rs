//! Internal indexing of the search: customer nodes plus per-vehicle start and
//! end tokens, and the successor assignment built over them.

use super::model::Plan;

/// Maps between node indices and the engine's internal indices.
///
/// Layout: customers first (node `n` maps to `n - 1` when the depot is node
/// 0), then one start token per vehicle, then one end token per vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexManager {
    node_count: usize,
    vehicle_count: usize,
    depot: usize,
}

impl IndexManager {
    pub fn new(node_count: usize, vehicle_count: usize, depot: usize) -> Self {
        IndexManager {
            node_count,
            vehicle_count,
            depot,
        }
    }

    /// Number of internal indices.
    pub fn size(&self) -> usize {
        self.customer_tokens() + 2 * self.vehicle_count
    }

    pub fn vehicle_count(&self) -> usize {
        self.vehicle_count
    }

    fn customer_tokens(&self) -> usize {
        self.node_count - 1
    }

    /// Start token of a vehicle.
    pub fn start(&self, vehicle: usize) -> usize {
        self.customer_tokens() + vehicle
    }

    /// End token of a vehicle.
    pub fn end(&self, vehicle: usize) -> usize {
        self.customer_tokens() + self.vehicle_count + vehicle
    }

    pub fn is_start(&self, index: usize) -> bool {
        (self.start(0)..self.end(0)).contains(&index)
    }

    pub fn is_end(&self, index: usize) -> bool {
        index >= self.end(0) && index < self.size()
    }

    /// Node visited at an internal index.
    pub fn index_to_node(&self, index: usize) -> usize {
        if index >= self.customer_tokens() {
            self.depot
        } else if index >= self.depot {
            index + 1
        } else {
            index
        }
    }

    /// Internal index of a customer node. The depot has one token per vehicle
    /// and is resolved with [`IndexManager::start`] / [`IndexManager::end`].
    pub fn node_to_index(&self, node: usize) -> Option<usize> {
        if node == self.depot || node >= self.node_count {
            None
        } else if node > self.depot {
            Some(node - 1)
        } else {
            Some(node)
        }
    }
}

/// Successor of every non-end internal index, as produced by the search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    next: Vec<Option<usize>>,
}

impl Assignment {
    /// Link each vehicle's start token through its customers to its end token.
    pub fn from_plan(plan: &Plan, manager: &IndexManager) -> Self {
        let mut next = vec![None; manager.size()];

        for (vehicle, route) in plan.routes.iter().enumerate() {
            let mut current = manager.start(vehicle);
            for &customer in &route.customers {
                if let Some(index) = manager.node_to_index(customer) {
                    next[current] = Some(index);
                    current = index;
                }
            }
            next[current] = Some(manager.end(vehicle));
        }

        Assignment { next }
    }

    /// Successor of an internal index; `None` for end tokens.
    pub fn next(&self, index: usize) -> Option<usize> {
        self.next.get(index).copied().flatten()
    }
}
