use im::Vector;

use crate::solver::model::{Model, VariableId};

/// The mutable bounds state of a solve: one `[lmin, lmax]` interval per
/// variable, indexed by dense id.
///
/// The backing vectors are persistent, so `clone()` is a cheap structural
/// copy. The search driver relies on this: saving the store before a
/// decision and restoring it on backtrack are whole-state value copies,
/// with bound-for-bound identical restoration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundsStore {
    lmin: Vector<i32>,
    lmax: Vector<i32>,
}

impl BoundsStore {
    /// A store holding every variable's initial bounds.
    pub fn from_model(model: &Model) -> Self {
        let mut lmin = Vector::new();
        let mut lmax = Vector::new();
        for var in model.variables() {
            lmin.push_back(var.init_lmin());
            lmax.push_back(var.init_lmax());
        }
        Self { lmin, lmax }
    }

    pub fn len(&self) -> usize {
        self.lmin.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lmin.is_empty()
    }

    pub fn lmin(&self, var: VariableId) -> i32 {
        self.lmin[var]
    }

    pub fn lmax(&self, var: VariableId) -> i32 {
        self.lmax[var]
    }

    /// A variable is fixed once its interval has collapsed to a point.
    pub fn fixed(&self, var: VariableId) -> bool {
        self.lmin[var] == self.lmax[var]
    }

    /// Interval width in 64-bit, so a full-range variable does not wrap.
    pub fn width(&self, var: VariableId) -> i64 {
        i64::from(self.lmax[var]) - i64::from(self.lmin[var])
    }

    pub(crate) fn set_lmin(&mut self, var: VariableId, value: i32) {
        debug_assert!(value <= self.lmax[var]);
        self.lmin.set(var, value);
    }

    pub(crate) fn set_lmax(&mut self, var: VariableId, value: i32) {
        debug_assert!(value >= self.lmin[var]);
        self.lmax.set(var, value);
    }

    /// Collapses a variable to the single value `k`.
    pub(crate) fn fix(&mut self, var: VariableId, k: i32) {
        self.lmin.set(var, k);
        self.lmax.set(var, k);
    }

    pub fn all_fixed(&self) -> bool {
        self.lmin
            .iter()
            .zip(self.lmax.iter())
            .all(|(lo, hi)| lo == hi)
    }

    /// The number of variables whose interval still contains more than one
    /// value.
    pub fn free_count(&self) -> usize {
        self.lmin
            .iter()
            .zip(self.lmax.iter())
            .filter(|(lo, hi)| lo != hi)
            .count()
    }
}
