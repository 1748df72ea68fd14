use std::collections::HashMap;

use tracing::debug;

use crate::error::{Result, SolverError};
use crate::solver::external::{all_consistent, ExternalConstraint};
use crate::solver::heuristics::variable::{MostConstrainedHeuristic, VariableSelectionHeuristic};
use crate::solver::model::{ConstraintId, Model, VariableId};
use crate::solver::propagator::{PropagationOutcome, Propagator};
use crate::solver::search::BacktrackingSearch;
use crate::solver::stats::render_diagnostics;
use crate::solver::store::BoundsStore;
use crate::solver::work_list::WorkList;

/// Holds performance statistics for a single linear constraint.
#[derive(Debug, Default, Clone, Copy)]
pub struct PerConstraintStats {
    /// The number of times the tightening rule was applied to this
    /// constraint.
    pub revisions: u64,
    /// The number of rule applications that tightened at least one bound.
    pub prunings: u64,
    /// The total time spent applying the rule, in microseconds.
    pub time_spent_micros: u64,
}

/// Holds statistics for an entire `solve` call.
#[derive(Debug, Default)]
pub struct SearchStats {
    /// The total number of nodes visited by the search driver.
    pub recursion_nodes: u64,
    /// The total number of abandoned candidate values.
    pub backtracks: u64,
    /// The total number of linear-constraint rule applications.
    pub constraints_checked: u64,
    /// Unfixed variables remaining after the initial propagation pass.
    pub free_variables: u64,
    /// A map from [`ConstraintId`] to that constraint's statistics.
    pub constraint_stats: HashMap<ConstraintId, PerConstraintStats>,
}

/// The verdict of [`Solver::solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A feasible fully-fixed assignment was found and snapshotted.
    Solved,
    /// The search space is exhausted: no assignment within the initial
    /// bounds satisfies every constraint.
    Unsatisfiable,
}

/// The solver facade: model building, solving, and solution access.
///
/// A `Solver` is used in two phases. Before [`solve`](Solver::solve) it is
/// a builder: create variables and constraints, wire them together,
/// register external predicates. Once `solve` has been entered the model
/// freezes and the build operations fail with
/// [`SolverError::ModelFrozen`].
///
/// External predicates are borrowed for the lifetime `'p`, which must
/// cover every `solve` call; the solver never takes ownership of them.
pub struct Solver<'p> {
    model: Model,
    external: Vec<&'p dyn ExternalConstraint>,
    heuristic: Box<dyn VariableSelectionHeuristic>,
    snapshot: Option<BoundsStore>,
    stats: SearchStats,
    frozen: bool,
}

impl Default for Solver<'_> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'p> Solver<'p> {
    /// A solver with the default most-constrained-first branching
    /// heuristic.
    pub fn new() -> Self {
        Self::with_heuristic(Box::new(MostConstrainedHeuristic))
    }

    /// A solver branching with the given heuristic.
    pub fn with_heuristic(heuristic: Box<dyn VariableSelectionHeuristic>) -> Self {
        Self {
            model: Model::new(),
            external: Vec::new(),
            heuristic,
            snapshot: None,
            stats: SearchStats::default(),
            frozen: false,
        }
    }

    fn ensure_unfrozen(&self) -> Result<()> {
        if self.frozen {
            return Err(SolverError::ModelFrozen.into());
        }
        Ok(())
    }

    /// Creates a variable with initial bounds `[lmin, lmax]`.
    pub fn create_variable(&mut self, lmin: i32, lmax: i32) -> Result<VariableId> {
        self.ensure_unfrozen()?;
        self.model.create_variable(lmin, lmax)
    }

    /// Creates a linear constraint with target bounds `[lmin, lmax]` and
    /// no members.
    pub fn create_constraint(&mut self, lmin: i32, lmax: i32) -> Result<ConstraintId> {
        self.ensure_unfrozen()?;
        self.model.create_constraint(lmin, lmax)
    }

    /// Adds `var` to the member list of `cons`.
    ///
    /// Callers must not add the same variable twice to the same
    /// constraint: the sum semantics would count it twice.
    pub fn add_variable(&mut self, cons: ConstraintId, var: VariableId) -> Result<()> {
        self.ensure_unfrozen()?;
        self.model.add_variable(cons, var)
    }

    /// Registers an external predicate. Predicates are evaluated in
    /// registration order.
    pub fn add_external_constraint(&mut self, predicate: &'p dyn ExternalConstraint) -> Result<()> {
        self.ensure_unfrozen()?;
        self.external.push(predicate);
        Ok(())
    }

    /// Runs propagation and search, prints the diagnostic counters, and
    /// reports whether a feasible assignment was found.
    ///
    /// The model freezes on the first call. Calling `solve` again re-runs
    /// the same frozen model from its initial bounds.
    pub fn solve(&mut self) -> Result<SolveOutcome> {
        self.frozen = true;
        self.stats = SearchStats::default();
        self.snapshot = None;

        let mut store = BoundsStore::from_model(&self.model);
        let mut worklist = WorkList::new(self.model.num_constraints());
        for constraint_id in 0..self.model.num_constraints() {
            worklist.push_back(constraint_id);
        }

        let propagator = Propagator::new(&self.model);
        let root = propagator.propagate(&mut store, &mut worklist, &mut self.stats);
        self.stats.free_variables = store.free_count() as u64;
        debug!(?root, free = self.stats.free_variables, "initial propagation done");

        let mut snapshot = None;
        if root == PropagationOutcome::Fixpoint && all_consistent(&self.external, &store) {
            let search =
                BacktrackingSearch::new(&self.model, &self.external, self.heuristic.as_ref());
            search.search(&mut store, &mut worklist, &mut self.stats, &mut snapshot);
        }
        self.snapshot = snapshot;

        print!("{}", render_diagnostics(&self.model, &self.stats));

        Ok(if self.snapshot.is_some() {
            SolveOutcome::Solved
        } else {
            SolveOutcome::Unsatisfiable
        })
    }

    /// The solved value of `var`. Only legal after a `Solved` outcome; in
    /// the snapshot every variable is fixed, so lmin is the value.
    pub fn value(&self, var: VariableId) -> Result<i32> {
        let snapshot = self.snapshot.as_ref().ok_or(SolverError::NoSolution)?;
        if var >= snapshot.len() {
            return Err(SolverError::UnknownVariable(var).into());
        }
        Ok(snapshot.lmin(var))
    }

    /// Statistics from the most recent `solve` call.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    pub fn model(&self) -> &Model {
        &self.model
    }
}
