//! 2-Opt neighborhood for local search (intra-route).

use crate::engine::model::{Plan, SearchModel};

use super::{ArcPenalties, LocalSearch};

impl LocalSearch {
    /// Implement the 2-Opt neighborhood: reverse a segment of one route.
    pub fn two_opt_neighborhood(&mut self, plan: &mut Plan, model: &SearchModel<'_>, penalties: &ArcPenalties) -> bool {
        for r_idx in self.shuffled_routes(plan) {
            let n = plan.routes[r_idx].customers.len();
            if n < 2 {
                continue;
            }

            for i in self.shuffled_positions(n - 1) {
                if self.deadline_passed() {
                    return false;
                }

                for j in i + 1..n {
                    let mut candidate = plan.routes[r_idx].customers.clone();
                    candidate[i..=j].reverse();

                    if self.try_apply(plan, model, penalties, vec![(r_idx, candidate)]) {
                        return true;
                    }
                }
            }
        }

        false
    }
}
