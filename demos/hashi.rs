use std::fs;
use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use stringo::error::Result;
use stringo::puzzles::hashi::HashiPuzzle;
use stringo::puzzles::PuzzleGrid;
use stringo::solver::engine::{SolveOutcome, Solver};
use stringo::solver::stats::render_stats_table;

/// Solve a Hashiwokakero grid read from standard input.
///
/// The input is `width height` followed by `height` rows; digits are
/// islands, anything else is water.
#[derive(Parser)]
struct Args {
    /// Where to write the GraphViz rendering of the solution.
    #[arg(short, long, default_value = "hashi.dot")]
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
    let puzzle = HashiPuzzle::from_grid(&grid)?;
    println!("Islands: {}", puzzle.nodes().len());
    println!("Candidate links: {}", puzzle.links().len());

    let mut solver = Solver::new();
    let vars = puzzle.build_model(&mut solver)?;
    let no_crossing = puzzle.no_crossing(&vars);
    let connectivity = puzzle.connectivity(&vars);
    solver.add_external_constraint(&no_crossing)?;
    solver.add_external_constraint(&connectivity)?;

    match solver.solve()? {
        SolveOutcome::Solved => {
            let bridges = puzzle.bridges(&solver, &vars)?;
            fs::write(&args.output, puzzle.render_dot(&bridges))
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
