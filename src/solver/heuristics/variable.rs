use crate::solver::model::{Model, VariableId};
use crate::solver::store::BoundsStore;

/// A strategy for picking the next variable to branch on during search.
///
/// Implementations must be pure functions of the model and the current
/// bounds: repeated calls with the same store must return the same
/// variable id, so that searches are reproducible.
pub trait VariableSelectionHeuristic {
    /// Selects an unfixed variable, or `None` if every variable is fixed.
    fn select_variable(&self, model: &Model, store: &BoundsStore) -> Option<VariableId>;
}

/// A simple heuristic that selects the first unfixed variable in id
/// order.
pub struct SelectFirstHeuristic;

impl VariableSelectionHeuristic for SelectFirstHeuristic {
    fn select_variable(&self, model: &Model, store: &BoundsStore) -> Option<VariableId> {
        (0..model.num_variables()).find(|&var| !store.fixed(var))
    }
}

/// The fail-first heuristic: among unfixed variables, the one with the
/// narrowest interval wins, ties going to the variable in more
/// constraints.
///
/// Small width narrows fan-out; high degree propagates most on
/// assignment. The scan runs in id order and replaces the candidate only
/// on a strictly smaller width, or on equal width and strictly greater
/// degree, so that the earliest id wins any remaining tie.
pub struct MostConstrainedHeuristic;

impl VariableSelectionHeuristic for MostConstrainedHeuristic {
    fn select_variable(&self, model: &Model, store: &BoundsStore) -> Option<VariableId> {
        let mut chosen: Option<VariableId> = None;
        let mut best_width = i64::MAX;
        for var in model.variables() {
            let id = var.id();
            if store.fixed(id) {
                continue;
            }
            let width = store.width(id);
            match chosen {
                Some(current) if width == best_width => {
                    if var.degree() > model.variable(current).degree() {
                        chosen = Some(id);
                    }
                }
                Some(_) if width > best_width => {}
                _ => {
                    chosen = Some(id);
                    best_width = width;
                }
            }
        }
        chosen
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::model::Model;
    use crate::solver::store::BoundsStore;

    /// Builds a model plus `degree` single-variable constraints attached
    /// to each variable.
    fn model_with(bounds: &[(i32, i32)], degrees: &[usize]) -> Model {
        let mut model = Model::new();
        for &(lmin, lmax) in bounds {
            model.create_variable(lmin, lmax).unwrap();
        }
        for (var, &degree) in degrees.iter().enumerate() {
            for _ in 0..degree {
                let cons = model.create_constraint(i32::MIN, i32::MAX).unwrap();
                model.add_variable(cons, var).unwrap();
            }
        }
        model
    }

    #[test]
    fn select_first_returns_earliest_unfixed() {
        let model = model_with(&[(1, 1), (0, 5), (0, 1)], &[0, 0, 0]);
        let store = BoundsStore::from_model(&model);
        assert_eq!(
            SelectFirstHeuristic.select_variable(&model, &store),
            Some(1)
        );
    }

    #[test]
    fn narrowest_interval_wins() {
        let model = model_with(&[(0, 5), (0, 1), (0, 3)], &[0, 0, 0]);
        let store = BoundsStore::from_model(&model);
        assert_eq!(
            MostConstrainedHeuristic.select_variable(&model, &store),
            Some(1)
        );
    }

    #[test]
    fn equal_width_falls_back_to_degree() {
        // ?0 and ?1 both have width 1; ?1 sits in more constraints.
        let model = model_with(&[(0, 1), (0, 1)], &[1, 2]);
        let store = BoundsStore::from_model(&model);
        assert_eq!(
            MostConstrainedHeuristic.select_variable(&model, &store),
            Some(1)
        );
    }

    #[test]
    fn full_tie_keeps_the_earliest_id() {
        let model = model_with(&[(0, 1), (0, 1), (0, 1)], &[1, 1, 1]);
        let store = BoundsStore::from_model(&model);
        assert_eq!(
            MostConstrainedHeuristic.select_variable(&model, &store),
            Some(0)
        );
    }

    #[test]
    fn fixed_variables_are_skipped_and_calls_are_stable() {
        let model = model_with(&[(2, 2), (0, 3), (0, 3)], &[0, 1, 2]);
        let store = BoundsStore::from_model(&model);
        let first = MostConstrainedHeuristic.select_variable(&model, &store);
        assert_eq!(first, Some(2));
        // Pure function of (model, store): a repeat call agrees.
        assert_eq!(
            MostConstrainedHeuristic.select_variable(&model, &store),
            first
        );
    }

    #[test]
    fn all_fixed_yields_none() {
        let model = model_with(&[(1, 1), (0, 0)], &[0, 0]);
        let store = BoundsStore::from_model(&model);
        assert_eq!(MostConstrainedHeuristic.select_variable(&model, &store), None);
        assert_eq!(SelectFirstHeuristic.select_variable(&model, &store), None);
    }
}
