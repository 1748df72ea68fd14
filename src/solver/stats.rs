use prettytable::{Cell, Row, Table};

use crate::solver::engine::{PerConstraintStats, SearchStats};
use crate::solver::model::{ConstraintId, Model};

/// The diagnostic counter block printed by `solve`, one counter per line.
///
/// The prefix strings are stable: golden-file tests match on them.
pub fn render_diagnostics(model: &Model, stats: &SearchStats) -> String {
    format!(
        "Variables: {}\nConstraints: {}\nFree variables: {}\nRecursion nodes: {}\nConstraints checked: {}\n",
        model.num_variables(),
        model.num_constraints(),
        stats.free_variables,
        stats.recursion_nodes,
        stats.constraints_checked,
    )
}

/// Renders the per-constraint propagation statistics as a table.
pub fn render_stats_table(stats: &SearchStats, model: &Model) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("ID"),
        Cell::new("Constraint"),
        Cell::new("Revise Calls"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|(constraint_id, _)| **constraint_id);

    for (constraint_id, constraint_stats) in sorted_stats {
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&constraint_id.to_string()),
            Cell::new(&model.constraint(*constraint_id).describe()),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{avg_time:.2}")),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::solver::engine::{SolveOutcome, Solver};

    #[test]
    fn diagnostics_block_matches_the_golden_format() {
        let mut solver = Solver::new();
        solver.create_variable(3, 3).unwrap();
        assert_eq!(solver.solve().unwrap(), SolveOutcome::Solved);

        assert_eq!(
            render_diagnostics(solver.model(), solver.stats()),
            "Variables: 1\n\
             Constraints: 0\n\
             Free variables: 0\n\
             Recursion nodes: 1\n\
             Constraints checked: 0\n"
        );
    }

    #[test]
    fn diagnostics_block_counts_search_work() {
        let mut solver = Solver::new();
        let a = solver.create_variable(0, 2).unwrap();
        let b = solver.create_variable(0, 2).unwrap();
        let sum = solver.create_constraint(3, 3).unwrap();
        solver.add_variable(sum, a).unwrap();
        solver.add_variable(sum, b).unwrap();
        solver.solve().unwrap();

        let rendered = render_diagnostics(solver.model(), solver.stats());
        assert!(rendered.starts_with("Variables: 2\nConstraints: 1\nFree variables: 2\n"));
        assert!(rendered.contains("Recursion nodes: "));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn stats_table_lists_every_revised_constraint() {
        let mut solver = Solver::new();
        let a = solver.create_variable(0, 2).unwrap();
        let b = solver.create_variable(0, 2).unwrap();
        let sum = solver.create_constraint(3, 3).unwrap();
        solver.add_variable(sum, a).unwrap();
        solver.add_variable(sum, b).unwrap();
        solver.solve().unwrap();

        let table = render_stats_table(solver.stats(), solver.model());
        assert!(table.contains("?0 + ?1 in [3, 3]"));
        assert!(table.contains("Revise Calls"));
    }
}
