//! Burr Puzzle Solver
//!
//! Loads an interlocking polycube puzzle from a text file and searches for a
//! sequence of axis-aligned slides that takes it apart. Set `RUST_LOG=debug`
//! to follow the search.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};

use burr_solver::{grid, loader, Outcome, PuzzleView, Session};

/// Finds a disassembly sequence for a burr puzzle.
#[derive(Parser)]
#[command(name = "burr-solver")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Edge length of the cubic lattice the puzzle lives in.
    #[arg(long, global = true, default_value_t = 48)]
    dim: i32,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a disassembly and print a summary.
    Solve {
        /// Puzzle file to load.
        path: PathBuf,
        /// Also print every state of the solution.
        #[arg(long)]
        steps: bool,
    },
    /// Print the assembled puzzle.
    Show {
        /// Puzzle file to load.
        path: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Solve { path, steps }) => run_solve(&path, cli.dim, steps),
        Some(Command::Show { path }) => run_show(&path, cli.dim),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    }
}

fn open_session(path: &Path, dim: i32) -> Result<Session> {
    let puzzle = loader::load_puzzle(path, dim)
        .with_context(|| format!("failed to load {}", path.display()))?;
    Ok(Session::new(puzzle))
}

/// Solves the puzzle and prints the outcome, optionally with every step.
fn run_solve(path: &Path, dim: i32, steps: bool) -> Result<()> {
    let mut session = open_session(path, dim)?;
    let report = session.solve();

    match &report.outcome {
        Outcome::Solved(states) => println!("Solved in {} moves", states.len() - 1),
        Outcome::Exhausted => println!("No disassembly found using slides only"),
    }
    println!(
        "Visited {} states in {:.3?}",
        report.states_visited, report.elapsed
    );

    if steps && session.is_solved() {
        println!();
        print!("{}", render_steps(&mut session));
    }
    Ok(())
}

/// Prints the assembled layout as z-slices.
fn run_show(path: &Path, dim: i32) -> Result<()> {
    let session = open_session(path, dim)?;
    println!(
        "{} pieces on a {}^3 lattice",
        session.num_pieces(),
        session.dim()
    );
    print!("{}", grid::format_pieces(&session.piece_voxels()));
    Ok(())
}

/// Plays the solution back from the first state, rendering each one.
fn render_steps(session: &mut Session) -> String {
    let mut output = String::new();
    loop {
        output.push_str(&format!(
            "Step {}/{}: {} of {} pieces free\n",
            session.current_step(),
            session.max_step(),
            session.displayed().free_count(),
            session.num_pieces()
        ));
        output.push_str(&grid::format_pieces(&session.piece_voxels()));
        output.push('\n');

        if session.current_step() == session.max_step() {
            break;
        }
        session.step_solution(true);
    }
    output
}
