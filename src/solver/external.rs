//! Opaque constraints that cannot be expressed as linear sums.
//!
//! External constraints are coarse feasibility checks: the search driver
//! evaluates them once per node, after a propagation fixed point, not
//! inside the fixed-point loop. They see the bounds through a read-only
//! view and must behave as pure functions of it.

use crate::solver::model::VariableId;
use crate::solver::store::BoundsStore;

/// A read-only window onto the current bounds, handed to external
/// constraints.
///
/// Holding only a shared reference makes the no-mutation part of the
/// predicate contract structural rather than conventional.
#[derive(Debug, Clone, Copy)]
pub struct BoundsView<'s> {
    store: &'s BoundsStore,
}

impl<'s> BoundsView<'s> {
    pub fn new(store: &'s BoundsStore) -> Self {
        Self { store }
    }

    pub fn lmin(&self, var: VariableId) -> i32 {
        self.store.lmin(var)
    }

    pub fn lmax(&self, var: VariableId) -> i32 {
        self.store.lmax(var)
    }

    pub fn fixed(&self, var: VariableId) -> bool {
        self.store.fixed(var)
    }

    /// The value of a fixed variable. Meaningful only once `fixed(var)`
    /// holds.
    pub fn value(&self, var: VariableId) -> i32 {
        debug_assert!(self.store.fixed(var));
        self.store.lmin(var)
    }

    pub fn num_variables(&self) -> usize {
        self.store.len()
    }
}

/// A user-supplied predicate over the current bounds.
///
/// Implementations must be deterministic with respect to the bounds they
/// read and must not cache anything across invocations; the solver calls
/// them with different stores as the search moves around the tree.
pub trait ExternalConstraint {
    /// Returns `false` to fail the current branch.
    fn is_consistent(&self, bounds: &BoundsView<'_>) -> bool;
}

/// Evaluates every registered predicate in registration order, stopping
/// at the first rejection.
pub(crate) fn all_consistent(external: &[&dyn ExternalConstraint], store: &BoundsStore) -> bool {
    let view = BoundsView::new(store);
    external.iter().all(|predicate| predicate.is_consistent(&view))
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::model::Model;

    struct Verdict {
        verdict: bool,
        calls: Cell<u32>,
    }

    impl Verdict {
        fn new(verdict: bool) -> Self {
            Self {
                verdict,
                calls: Cell::new(0),
            }
        }
    }

    impl ExternalConstraint for Verdict {
        fn is_consistent(&self, _bounds: &BoundsView<'_>) -> bool {
            self.calls.set(self.calls.get() + 1);
            self.verdict
        }
    }

    fn store_with_bounds(bounds: &[(i32, i32)]) -> BoundsStore {
        let mut model = Model::new();
        for &(lmin, lmax) in bounds {
            model.create_variable(lmin, lmax).unwrap();
        }
        BoundsStore::from_model(&model)
    }

    #[test]
    fn view_exposes_bounds_read_only() {
        let store = store_with_bounds(&[(0, 2), (3, 3)]);
        let view = BoundsView::new(&store);
        assert_eq!(view.lmin(0), 0);
        assert_eq!(view.lmax(0), 2);
        assert!(!view.fixed(0));
        assert!(view.fixed(1));
        assert_eq!(view.value(1), 3);
        assert_eq!(view.num_variables(), 2);
    }

    #[test]
    fn dispatcher_stops_at_the_first_rejection() {
        let store = store_with_bounds(&[(0, 1)]);
        let first = Verdict::new(true);
        let second = Verdict::new(false);
        let third = Verdict::new(true);
        let external: Vec<&dyn ExternalConstraint> = vec![&first, &second, &third];

        assert!(!all_consistent(&external, &store));
        assert_eq!(first.calls.get(), 1);
        assert_eq!(second.calls.get(), 1);
        assert_eq!(third.calls.get(), 0);
    }

    #[test]
    fn dispatcher_accepts_when_every_predicate_does() {
        let store = store_with_bounds(&[(0, 1)]);
        let first = Verdict::new(true);
        let second = Verdict::new(true);
        let external: Vec<&dyn ExternalConstraint> = vec![&first, &second];

        assert!(all_consistent(&external, &store));
        assert_eq!(first.calls.get(), 1);
        assert_eq!(second.calls.get(), 1);
    }
}
