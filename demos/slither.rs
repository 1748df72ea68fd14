use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use stringo::error::Result;
use stringo::puzzles::slither::SlitherPuzzle;
use stringo::puzzles::PuzzleGrid;
use stringo::solver::engine::{SolveOutcome, Solver};
use stringo::solver::stats::render_stats_table;

/// Solve a Slitherlink grid read from standard input.
///
/// The input is `width height` followed by `height` rows; digits are
/// cell clues, anything else is an unclued cell.
#[derive(Parser)]
struct Args {
    /// Where to write the GraphViz rendering of the solution.
    #[arg(short, long, default_value = "slither.dot")]
    output: PathBuf,
    /// Print the per-constraint propagation statistics after solving.
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .expect("failed to read stdin");

    let grid = PuzzleGrid::parse(&input)?;
    let puzzle = SlitherPuzzle::from_grid(&grid)?;

    let mut solver = Solver::new();
    let vars = puzzle.build_model(&mut solver)?;
    let rules = puzzle.point_rules(&vars);
    for rule in &rules {
        solver.add_external_constraint(rule)?;
    }

    match solver.solve()? {
        SolveOutcome::Solved => {
            let (vert, horiz) = puzzle.edges(&solver, &vars)?;
            fs::write(&args.output, puzzle.render_dot(&vert, &horiz))
                .expect("failed to write the dot file");
            println!("Solution written to {}", args.output.display());
        }
        SolveOutcome::Unsatisfiable => {
            println!("No solution exists");
        }
    }

    if args.stats {
        println!("{}", render_stats_table(solver.stats(), solver.model()));
    }
    Ok(())
}
