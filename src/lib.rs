//! Stringo is a finite-domain constraint solver for problems whose
//! constraints are linear sums of integer variables with inclusive lower
//! and upper bounds.
//!
//! The engine combines worklist-driven bounds propagation with
//! depth-first backtracking search. Constraints that cannot be expressed
//! as linear sums (crossing exclusions, connectivity, parity rules) plug
//! in as opaque external predicates evaluated at every search node.
//!
//! # Core Concepts
//!
//! - **[`Solver`]**: the facade. Create variables and constraints through
//!   it, then call [`solve`](Solver::solve) and read values back.
//! - **Linear constraints**: `lmin <= Σ members <= lmax` over a subset of
//!   the variables. The propagator tightens every member's interval until
//!   a fixed point or a contradiction.
//! - **[`ExternalConstraint`]**: a one-method trait for everything the
//!   linear form cannot say. Predicates see the bounds through a
//!   read-only view and veto infeasible branches.
//!
//! The two bundled puzzle front-ends, Hashiwokakero in
//! [`puzzles::hashi`] and Slitherlink in [`puzzles::slither`], are small
//! consumers of this API and double as end-to-end tests.
//!
//! # Example: a two-variable sum
//!
//! `?a + ?b` must equal 3 with both variables in `[0, 2]`:
//!
//! ```
//! use stringo::solver::engine::{SolveOutcome, Solver};
//!
//! # fn main() -> stringo::error::Result<()> {
//! let mut solver = Solver::new();
//! let a = solver.create_variable(0, 2)?;
//! let b = solver.create_variable(0, 2)?;
//! let sum = solver.create_constraint(3, 3)?;
//! solver.add_variable(sum, a)?;
//! solver.add_variable(sum, b)?;
//!
//! assert_eq!(solver.solve()?, SolveOutcome::Solved);
//! assert_eq!(solver.value(a)? + solver.value(b)?, 3);
//! # Ok(())
//! # }
//! ```
//!
//! [`Solver`]: solver::engine::Solver
//! [`ExternalConstraint`]: solver::external::ExternalConstraint

pub mod error;
pub mod puzzles;
pub mod solver;
