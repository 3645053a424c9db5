//! 2-Opt* neighborhood for local search (inter-route).

use crate::engine::model::{Plan, SearchModel};

use super::utils::find_customer;
use super::{ArcPenalties, LocalSearch};

impl LocalSearch {
    /// Implement the 2-Opt* neighborhood: link a customer to a neighbor on
    /// another route and exchange the route tails.
    pub fn two_opt_star_neighborhood(
        &mut self,
        plan: &mut Plan,
        model: &SearchModel<'_>,
        penalties: &ArcPenalties,
    ) -> bool {
        for r1_idx in self.shuffled_routes(plan) {
            let len = plan.routes[r1_idx].customers.len();

            for i in self.shuffled_positions(len) {
                if self.deadline_passed() {
                    return false;
                }

                let customer1 = plan.routes[r1_idx].customers[i];
                let neighbors = self.neighbors(customer1).to_vec();

                for neighbor in neighbors {
                    let Some((r2_idx, j)) = find_customer(plan, neighbor) else {
                        continue;
                    };
                    if r2_idx == r1_idx {
                        continue;
                    }

                    let r1 = &plan.routes[r1_idx].customers;
                    let r2 = &plan.routes[r2_idx].customers;

                    // r1: head up to customer1, then neighbor and the rest of r2
                    let r1_new: Vec<usize> = r1[..=i].iter().chain(&r2[j..]).copied().collect();
                    // r2: head before neighbor, then the old tail of r1
                    let r2_new: Vec<usize> = r2[..j].iter().chain(&r1[i + 1..]).copied().collect();

                    if self.try_apply(plan, model, penalties, vec![(r1_idx, r1_new), (r2_idx, r2_new)]) {
                        return true;
                    }
                }
            }
        }

        false
    }
}
