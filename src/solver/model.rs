use crate::error::{Result, SolverError};

/// A numeric identifier for a single variable in the constraint problem.
///
/// Ids are dense: the n-th created variable has id `n - 1`.
pub type VariableId = usize;
/// A numeric identifier for a single linear constraint in the problem.
pub type ConstraintId = usize;

/// An integer-valued unknown.
///
/// The variable itself is immutable: its current bounds live in the
/// [`BoundsStore`](crate::solver::store::BoundsStore), not here. The
/// `constraints` list is the reverse index used by the propagator to find
/// the constraints affected by a bound change; it is filled in as
/// constraints are built and never mutated after the model freezes.
#[derive(Debug, Clone)]
pub struct Variable {
    id: VariableId,
    init_lmin: i32,
    init_lmax: i32,
    constraints: Vec<ConstraintId>,
}

impl Variable {
    pub fn id(&self) -> VariableId {
        self.id
    }

    pub fn init_lmin(&self) -> i32 {
        self.init_lmin
    }

    pub fn init_lmax(&self) -> i32 {
        self.init_lmax
    }

    /// The constraints this variable participates in, in build order.
    pub fn constraints(&self) -> &[ConstraintId] {
        &self.constraints
    }

    /// The number of constraints this variable participates in.
    pub fn degree(&self) -> usize {
        self.constraints.len()
    }
}

/// A linear sum-in-range constraint: `lmin <= Σ members <= lmax`.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    id: ConstraintId,
    lmin: i32,
    lmax: i32,
    variables: Vec<VariableId>,
}

impl LinearConstraint {
    pub fn id(&self) -> ConstraintId {
        self.id
    }

    pub fn lmin(&self) -> i32 {
        self.lmin
    }

    pub fn lmax(&self) -> i32 {
        self.lmax
    }

    /// Member variables in insertion order.
    pub fn variables(&self) -> &[VariableId] {
        &self.variables
    }

    /// A human-readable description, e.g. `?0 + ?1 in [3, 3]`.
    pub fn describe(&self) -> String {
        let members = if self.variables.is_empty() {
            "0".to_string()
        } else {
            self.variables
                .iter()
                .map(|v| format!("?{v}"))
                .collect::<Vec<_>>()
                .join(" + ")
        };
        format!("{} in [{}, {}]", members, self.lmin, self.lmax)
    }
}

/// The immutable description of a constraint problem.
///
/// A `Model` is built once through the [`Solver`](crate::solver::engine::Solver)
/// facade and never mutated after solving begins; during search only the
/// bounds store and the worklist change.
#[derive(Debug, Default, Clone)]
pub struct Model {
    variables: Vec<Variable>,
    constraints: Vec<LinearConstraint>,
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a variable with initial bounds `[lmin, lmax]` and returns
    /// its dense id.
    pub fn create_variable(&mut self, lmin: i32, lmax: i32) -> Result<VariableId> {
        if lmin > lmax {
            return Err(SolverError::InvalidBounds { lmin, lmax }.into());
        }
        let id = self.variables.len();
        self.variables.push(Variable {
            id,
            init_lmin: lmin,
            init_lmax: lmax,
            constraints: Vec::new(),
        });
        Ok(id)
    }

    /// Creates a linear constraint with target bounds `[lmin, lmax]` and
    /// no member variables yet.
    pub fn create_constraint(&mut self, lmin: i32, lmax: i32) -> Result<ConstraintId> {
        if lmin > lmax {
            return Err(SolverError::InvalidBounds { lmin, lmax }.into());
        }
        let id = self.constraints.len();
        self.constraints.push(LinearConstraint {
            id,
            lmin,
            lmax,
            variables: Vec::new(),
        });
        Ok(id)
    }

    /// Appends `var` to the constraint's member list and records the
    /// constraint in the variable's reverse index.
    pub fn add_variable(&mut self, cons: ConstraintId, var: VariableId) -> Result<()> {
        if cons >= self.constraints.len() {
            return Err(SolverError::UnknownConstraint(cons).into());
        }
        if var >= self.variables.len() {
            return Err(SolverError::UnknownVariable(var).into());
        }
        self.constraints[cons].variables.push(var);
        self.variables[var].constraints.push(cons);
        Ok(())
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn variable(&self, id: VariableId) -> &Variable {
        &self.variables[id]
    }

    pub fn constraint(&self, id: ConstraintId) -> &LinearConstraint {
        &self.constraints[id]
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::SolverError;

    #[test]
    fn ids_are_dense_and_in_creation_order() {
        let mut model = Model::new();
        assert_eq!(model.create_variable(0, 2).unwrap(), 0);
        assert_eq!(model.create_variable(-1, 1).unwrap(), 1);
        assert_eq!(model.create_constraint(3, 3).unwrap(), 0);
        assert_eq!(model.num_variables(), 2);
        assert_eq!(model.num_constraints(), 1);
    }

    #[test]
    fn inverted_bounds_are_rejected() {
        let mut model = Model::new();
        let err = model.create_variable(2, 1).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::InvalidBounds { lmin: 2, lmax: 1 }
        ));
        let err = model.create_constraint(1, 0).unwrap_err();
        assert!(matches!(
            err.inner(),
            SolverError::InvalidBounds { lmin: 1, lmax: 0 }
        ));
    }

    #[test]
    fn add_variable_fills_both_directions() {
        let mut model = Model::new();
        let a = model.create_variable(0, 2).unwrap();
        let b = model.create_variable(0, 2).unwrap();
        let c = model.create_constraint(3, 3).unwrap();
        model.add_variable(c, a).unwrap();
        model.add_variable(c, b).unwrap();

        assert_eq!(model.constraint(c).variables(), &[a, b]);
        assert_eq!(model.variable(a).constraints(), &[c]);
        assert_eq!(model.variable(b).constraints(), &[c]);
        assert_eq!(model.variable(a).degree(), 1);
    }

    #[test]
    fn add_variable_rejects_unknown_ids() {
        let mut model = Model::new();
        let a = model.create_variable(0, 1).unwrap();
        let c = model.create_constraint(0, 1).unwrap();

        let err = model.add_variable(c + 1, a).unwrap_err();
        assert!(matches!(err.inner(), SolverError::UnknownConstraint(_)));
        let err = model.add_variable(c, a + 1).unwrap_err();
        assert!(matches!(err.inner(), SolverError::UnknownVariable(_)));
    }

    #[test]
    fn describe_lists_members_and_targets() {
        let mut model = Model::new();
        let a = model.create_variable(0, 2).unwrap();
        let b = model.create_variable(0, 2).unwrap();
        let c = model.create_constraint(3, 3).unwrap();
        model.add_variable(c, a).unwrap();
        model.add_variable(c, b).unwrap();
        assert_eq!(model.constraint(c).describe(), "?0 + ?1 in [3, 3]");
    }
}
