//! The bounds-propagation engine.
//!
//! Brings the store to the strongest fixed point reachable by unit bounds
//! consistency on every linear constraint, or reports infeasibility.

use std::time::Instant;

use tracing::trace;

use crate::solver::engine::SearchStats;
use crate::solver::model::{ConstraintId, Model, VariableId};
use crate::solver::store::BoundsStore;
use crate::solver::work_list::WorkList;

/// The result of a propagation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropagationOutcome {
    /// Every queued constraint is bounds-consistent with the store.
    Fixpoint,
    /// Some constraint cannot be satisfied within the current bounds.
    Infeasible,
}

/// Sums are formed in 64-bit; a candidate bound outside the 32-bit domain
/// is clamped back into it before any comparison, so an unreachable bound
/// simply fails to tighten instead of wrapping.
fn clamp_to_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

pub struct Propagator<'m> {
    model: &'m Model,
}

impl<'m> Propagator<'m> {
    pub fn new(model: &'m Model) -> Self {
        Self { model }
    }

    /// Runs the worklist to exhaustion or to the first contradiction.
    ///
    /// Each popped constraint has its tightening rule applied; every
    /// constraint of a variable whose bound changed is re-enqueued through
    /// the variable's reverse index. On a contradiction the worklist is
    /// drained so its `queued` bitmap stays in sync for the caller.
    pub fn propagate(
        &self,
        store: &mut BoundsStore,
        worklist: &mut WorkList,
        stats: &mut SearchStats,
    ) -> PropagationOutcome {
        let mut changed = Vec::new();
        while let Some(constraint_id) = worklist.pop_front() {
            changed.clear();
            stats.constraints_checked += 1;

            let start = Instant::now();
            let outcome = self.revise(constraint_id, store, &mut changed);

            let constraint_stats = stats.constraint_stats.entry(constraint_id).or_default();
            constraint_stats.revisions += 1;
            constraint_stats.time_spent_micros += start.elapsed().as_micros() as u64;
            if !changed.is_empty() {
                constraint_stats.prunings += 1;
            }

            if outcome == PropagationOutcome::Infeasible {
                worklist.clear();
                return PropagationOutcome::Infeasible;
            }
            for &var in &changed {
                for &dependent in self.model.variable(var).constraints() {
                    worklist.push_back(dependent);
                }
            }
        }
        PropagationOutcome::Fixpoint
    }

    /// Applies one constraint's tightening rule against the current store.
    ///
    /// With `S_min`/`S_max` the sums of the members' current bounds, each
    /// member's lower bound is raised to `c_lmin − (S_max − lmax(v))` and
    /// its upper bound lowered to `c_lmax − (S_min − lmin(v))`. The sums
    /// are maintained incrementally as bounds move so later members always
    /// see current values. Variables whose interval changed are appended
    /// to `changed`.
    fn revise(
        &self,
        constraint_id: ConstraintId,
        store: &mut BoundsStore,
        changed: &mut Vec<VariableId>,
    ) -> PropagationOutcome {
        let constraint = self.model.constraint(constraint_id);
        let target_lmin = i64::from(constraint.lmin());
        let target_lmax = i64::from(constraint.lmax());

        let mut sum_min: i64 = 0;
        let mut sum_max: i64 = 0;
        for &var in constraint.variables() {
            sum_min += i64::from(store.lmin(var));
            sum_max += i64::from(store.lmax(var));
        }
        if sum_max < target_lmin || sum_min > target_lmax {
            return PropagationOutcome::Infeasible;
        }

        for &var in constraint.variables() {
            let lmin = i64::from(store.lmin(var));
            let lmax = i64::from(store.lmax(var));

            let new_lmin = clamp_to_i32(target_lmin - (sum_max - lmax));
            if i64::from(new_lmin) > lmax {
                return PropagationOutcome::Infeasible;
            }
            if i64::from(new_lmin) > lmin {
                trace!(constraint_id, var, from = lmin, to = new_lmin, "raised lmin");
                store.set_lmin(var, new_lmin);
                sum_min += i64::from(new_lmin) - lmin;
                changed.push(var);
            }

            let lmin = i64::from(store.lmin(var));
            let new_lmax = clamp_to_i32(target_lmax - (sum_min - lmin));
            if i64::from(new_lmax) < lmin {
                return PropagationOutcome::Infeasible;
            }
            if i64::from(new_lmax) < lmax {
                trace!(constraint_id, var, from = lmax, to = new_lmax, "lowered lmax");
                store.set_lmax(var, new_lmax);
                sum_max += i64::from(new_lmax) - lmax;
                if changed.last() != Some(&var) {
                    changed.push(var);
                }
            }
        }
        PropagationOutcome::Fixpoint
    }
}
