//! Swap neighborhood for local search.

use crate::engine::model::{Plan, SearchModel};

use super::utils::find_customer;
use super::{ArcPenalties, LocalSearch};

impl LocalSearch {
    /// Implement the Swap neighborhood: exchange a customer with a neighbor
    /// served by another vehicle.
    pub fn swap_neighborhood(&mut self, plan: &mut Plan, model: &SearchModel<'_>, penalties: &ArcPenalties) -> bool {
        for r1_idx in self.shuffled_routes(plan) {
            let len = plan.routes[r1_idx].customers.len();

            for c1_pos in self.shuffled_positions(len) {
                if self.deadline_passed() {
                    return false;
                }

                let customer1 = plan.routes[r1_idx].customers[c1_pos];
                let neighbors = self.neighbors(customer1).to_vec();

                for neighbor in neighbors {
                    let Some((r2_idx, c2_pos)) = find_customer(plan, neighbor) else {
                        continue;
                    };
                    if r2_idx == r1_idx {
                        continue;
                    }

                    let mut r1_new = plan.routes[r1_idx].customers.clone();
                    let mut r2_new = plan.routes[r2_idx].customers.clone();
                    r1_new[c1_pos] = neighbor;
                    r2_new[c2_pos] = customer1;

                    if self.try_apply(plan, model, penalties, vec![(r1_idx, r1_new), (r2_idx, r2_new)]) {
                        return true;
                    }
                }
            }
        }

        false
    }
}
