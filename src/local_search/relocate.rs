//! Relocate neighborhood for local search.

use crate::engine::model::{Plan, SearchModel};

use super::utils::{find_customer, with_inserted, without};
use super::{ArcPenalties, LocalSearch};

impl LocalSearch {
    /// Implement the Relocate neighborhood.
    ///
    /// A customer is moved next to one of its neighbors, or into an unused
    /// vehicle, whichever position of the target route is cheapest.
    pub fn relocate_neighborhood(
        &mut self,
        plan: &mut Plan,
        model: &SearchModel<'_>,
        penalties: &ArcPenalties,
    ) -> bool {
        for r1_idx in self.shuffled_routes(plan) {
            let len = plan.routes[r1_idx].customers.len();
            if len == 0 {
                continue;
            }

            for c_pos in self.shuffled_positions(len) {
                if self.deadline_passed() {
                    return false;
                }

                let customer = plan.routes[r1_idx].customers[c_pos];

                // Target routes: those of the neighbors, then every empty route
                let mut targets: Vec<usize> = self
                    .neighbors(customer)
                    .iter()
                    .filter_map(|&neighbor| find_customer(plan, neighbor).map(|(r, _)| r))
                    .collect();
                targets.extend(
                    plan.routes
                        .iter()
                        .enumerate()
                        .filter(|(_, r)| r.is_empty())
                        .map(|(r, _)| r),
                );
                targets.sort_unstable();
                targets.dedup();

                for r2_idx in targets {
                    if self.try_relocate(plan, model, penalties, r1_idx, c_pos, r2_idx) {
                        return true;
                    }
                }
            }
        }

        false
    }

    /// Try every insertion position of `r2_idx` for the customer at `c_pos` of `r1_idx`.
    fn try_relocate(
        &mut self,
        plan: &mut Plan,
        model: &SearchModel<'_>,
        penalties: &ArcPenalties,
        r1_idx: usize,
        c_pos: usize,
        r2_idx: usize,
    ) -> bool {
        let r1 = &plan.routes[r1_idx].customers;
        let customer = r1[c_pos];
        let r1_new = without(r1, c_pos);

        if r1_idx == r2_idx {
            for pos in 0..=r1_new.len() {
                if pos == c_pos {
                    continue;
                }
                let candidate = with_inserted(&r1_new, pos, customer);
                if self.try_apply(plan, model, penalties, vec![(r1_idx, candidate)]) {
                    return true;
                }
            }
            return false;
        }

        let r2 = plan.routes[r2_idx].customers.clone();
        for pos in 0..=r2.len() {
            let candidate = with_inserted(&r2, pos, customer);
            let changes = vec![(r1_idx, r1_new.clone()), (r2_idx, candidate)];
            if self.try_apply(plan, model, penalties, changes) {
                return true;
            }
        }

        false
    }
}
