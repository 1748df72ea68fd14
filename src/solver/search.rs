use tracing::debug;

use crate::solver::engine::SearchStats;
use crate::solver::external::{all_consistent, ExternalConstraint};
use crate::solver::heuristics::variable::VariableSelectionHeuristic;
use crate::solver::model::Model;
use crate::solver::propagator::{PropagationOutcome, Propagator};
use crate::solver::store::BoundsStore;
use crate::solver::work_list::WorkList;

/// Depth-first backtracking over the bounds store.
///
/// Each node saves the whole store, tries every candidate value of the
/// branch variable in ascending order, and restores the saved bounds
/// between candidates and on exhaustion. The first fully-fixed store is
/// copied out as the solution snapshot.
pub struct BacktrackingSearch<'s> {
    model: &'s Model,
    propagator: Propagator<'s>,
    external: &'s [&'s dyn ExternalConstraint],
    heuristic: &'s dyn VariableSelectionHeuristic,
}

impl<'s> BacktrackingSearch<'s> {
    pub fn new(
        model: &'s Model,
        external: &'s [&'s dyn ExternalConstraint],
        heuristic: &'s dyn VariableSelectionHeuristic,
    ) -> Self {
        Self {
            model,
            propagator: Propagator::new(model),
            external,
            heuristic,
        }
    }

    /// Explores the subtree under the current store. Returns `true` and
    /// fills `snapshot` on the first feasible fully-fixed assignment.
    ///
    /// The worklist must arrive empty; it is empty again on return, both
    /// of which follow from the propagator draining it on every path.
    pub fn search(
        &self,
        store: &mut BoundsStore,
        worklist: &mut WorkList,
        stats: &mut SearchStats,
        snapshot: &mut Option<BoundsStore>,
    ) -> bool {
        stats.recursion_nodes += 1;

        if store.all_fixed() {
            *snapshot = Some(store.clone());
            return true;
        }

        let Some(branch_var) = self.heuristic.select_variable(self.model, store) else {
            *snapshot = Some(store.clone());
            return true;
        };

        let saved = store.clone();
        let lmin = saved.lmin(branch_var);
        let lmax = saved.lmax(branch_var);
        debug!(branch_var, lmin, lmax, "branching");

        for value in lmin..=lmax {
            *store = saved.clone();
            store.fix(branch_var, value);
            for &constraint_id in self.model.variable(branch_var).constraints() {
                worklist.push_back(constraint_id);
            }

            if self.propagator.propagate(store, worklist, stats) == PropagationOutcome::Infeasible {
                stats.backtracks += 1;
                continue;
            }
            if !all_consistent(self.external, store) {
                stats.backtracks += 1;
                continue;
            }
            if self.search(store, worklist, stats, snapshot) {
                return true;
            }
            stats.backtracks += 1;
        }

        *store = saved;
        false
    }
}
