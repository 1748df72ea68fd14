//! Slitherlink front-end.
//!
//! Edges of the cell lattice are `[0, 1]` variables. A clued cell
//! constrains the sum of its four border edges exactly. The corner rule
//! (every lattice point touches either zero or two chosen edges) is an
//! external predicate, since it is not a bounded sum over a fixed set
//! until all incident edges are decided.

use std::fmt::Write as _;

use crate::error::Result;
use crate::puzzles::PuzzleGrid;
use crate::solver::engine::Solver;
use crate::solver::external::{BoundsView, ExternalConstraint};
use crate::solver::model::VariableId;

/// The edge variables of the lattice, by family.
///
/// `vert[j][i]` is the vertical edge from point `(j, i)` down to
/// `(j+1, i)`; `horiz[j][i]` is the horizontal edge from `(j, i)` right to
/// `(j, i+1)`.
#[derive(Debug, Clone)]
pub struct EdgeVars {
    pub vert: Vec<Vec<VariableId>>,
    pub horiz: Vec<Vec<VariableId>>,
}

/// A clued Slitherlink grid.
#[derive(Debug, Clone)]
pub struct SlitherPuzzle {
    width: usize,
    height: usize,
    clues: Vec<Vec<Option<u8>>>,
}

impl SlitherPuzzle {
    /// Reads the cell clues; every non-digit cell is unclued.
    pub fn from_grid(grid: &PuzzleGrid) -> Result<Self> {
        let clues = (0..grid.height())
            .map(|y| (0..grid.width()).map(|x| grid.digit(x, y)).collect())
            .collect();
        Ok(Self {
            width: grid.width(),
            height: grid.height(),
            clues,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clue(&self, x: usize, y: usize) -> Option<u8> {
        self.clues[y][x]
    }

    /// Builds the constraint model: a `[0, 1]` variable per lattice edge
    /// and a `[d, d]` constraint per clued cell over its four border
    /// edges.
    pub fn build_model(&self, solver: &mut Solver<'_>) -> Result<EdgeVars> {
        let vert = (0..self.height)
            .map(|_| {
                (0..=self.width)
                    .map(|_| solver.create_variable(0, 1))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;
        let horiz = (0..=self.height)
            .map(|_| {
                (0..self.width)
                    .map(|_| solver.create_variable(0, 1))
                    .collect::<Result<Vec<_>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        for j in 0..self.height {
            for i in 0..self.width {
                if let Some(clue) = self.clues[j][i] {
                    let cons =
                        solver.create_constraint(i32::from(clue), i32::from(clue))?;
                    solver.add_variable(cons, horiz[j][i])?;
                    solver.add_variable(cons, horiz[j + 1][i])?;
                    solver.add_variable(cons, vert[j][i])?;
                    solver.add_variable(cons, vert[j][i + 1])?;
                }
            }
        }
        Ok(EdgeVars { vert, horiz })
    }

    /// One corner rule per lattice point, over the point's incident
    /// edges.
    pub fn point_rules(&self, vars: &EdgeVars) -> Vec<PointRule> {
        let mut rules = Vec::with_capacity((self.height + 1) * (self.width + 1));
        for j in 0..=self.height {
            for i in 0..=self.width {
                let mut incident = Vec::with_capacity(4);
                if i < self.width {
                    incident.push(vars.horiz[j][i]);
                }
                if i > 0 {
                    incident.push(vars.horiz[j][i - 1]);
                }
                if j < self.height {
                    incident.push(vars.vert[j][i]);
                }
                if j > 0 {
                    incident.push(vars.vert[j - 1][i]);
                }
                rules.push(PointRule { incident });
            }
        }
        rules
    }

    /// Reads the solved edge values, by family.
    pub fn edges(&self, solver: &Solver<'_>, vars: &EdgeVars) -> Result<(Vec<Vec<i32>>, Vec<Vec<i32>>)> {
        let vert = vars
            .vert
            .iter()
            .map(|row| row.iter().map(|&var| solver.value(var)).collect())
            .collect::<Result<Vec<Vec<_>>>>()?;
        let horiz = vars
            .horiz
            .iter()
            .map(|row| row.iter().map(|&var| solver.value(var)).collect())
            .collect::<Result<Vec<Vec<_>>>>()?;
        Ok((vert, horiz))
    }

    /// Renders lattice points, clue labels and chosen edges as a
    /// GraphViz graph.
    pub fn render_dot(&self, vert: &[Vec<i32>], horiz: &[Vec<i32>]) -> String {
        let mut out = String::from("graph {\n");
        for j in 0..=self.height {
            for i in 0..=self.width {
                let _ = writeln!(
                    out,
                    "n{j}_{i} [label=\"\"\nshape=point\npos=\"{},{}!\"]",
                    2 * j,
                    2 * i
                );
            }
        }
        for j in 0..self.height {
            for i in 0..self.width {
                if let Some(clue) = self.clues[j][i] {
                    let _ = writeln!(
                        out,
                        "x{j}_{i} [label={clue}\npos=\"{},{}!\"]",
                        2 * j + 1,
                        2 * i + 1
                    );
                }
            }
        }
        for (j, row) in vert.iter().enumerate() {
            for (i, &value) in row.iter().enumerate() {
                if value > 0 {
                    let _ = writeln!(out, "n{}_{} -- n{}_{};", j, i, j + 1, i);
                }
            }
        }
        for (j, row) in horiz.iter().enumerate() {
            for (i, &value) in row.iter().enumerate() {
                if value > 0 {
                    let _ = writeln!(out, "n{}_{} -- n{}_{};", j, i, j, i + 1);
                }
            }
        }
        out.push_str("}\n");
        out
    }
}

/// The corner rule: a lattice point on the loop has exactly two incident
/// edges; off the loop, none.
///
/// While incident edges are still open this only rejects corners whose
/// already-certain edge count exceeds two; the exact zero-or-two check
/// waits until every incident edge is fixed.
pub struct PointRule {
    incident: Vec<VariableId>,
}

impl ExternalConstraint for PointRule {
    fn is_consistent(&self, bounds: &BoundsView<'_>) -> bool {
        let mut min_sum = 0;
        let mut all_fixed = true;
        for &var in &self.incident {
            min_sum += bounds.lmin(var);
            all_fixed &= bounds.fixed(var);
        }
        if min_sum > 2 {
            return false;
        }
        if !all_fixed {
            return true;
        }
        min_sum == 0 || min_sum == 2
    }
}
