use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand};
use log::{error, info};

use percent_sudoku_solver::dimacs::parse_cnf_file;
use percent_sudoku_solver::solver::dpll::{solve, Satisfiability, SolveConfig};
use percent_sudoku_solver::sudoku::{encoder, generator, native, pipeline, GenerateConfig, SolveStats};
use percent_sudoku_solver::{io, SolverError};

#[derive(Parser)]
#[command(name = "percent-sudoku-solver", about = "A DPLL SAT solver and Percent Sudoku toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Parse and solve a DIMACS CNF file, writing a `.res` sibling file.
    Cnf {
        path: PathBuf,
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
    /// Percent Sudoku puzzle generation and solving.
    #[command(subcommand)]
    PercentSudoku(PercentSudokuCommand),
}

#[derive(Subcommand)]
enum PercentSudokuCommand {
    /// Generate a puzzle at the given difficulty (1-5) and save it.
    Generate {
        difficulty: u8,
        #[arg(long, default_value_t = 300)]
        timeout: u64,
        #[arg(long, default_value = "puzzle.txt")]
        out: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
        /// Print formula size statistics (clause-length histogram) after encoding.
        #[arg(long)]
        verbose: bool,
    },
    /// Solve a saved puzzle file via the CNF/DPLL path.
    Solve {
        path: PathBuf,
        #[arg(long, default_value_t = 300)]
        timeout: u64,
    },
    /// Generate and solve a handful of puzzles across all difficulties,
    /// verifying each solution against the generator's own answer.
    Test,
    /// Generate one puzzle per difficulty and print them.
    Demo,
}

fn main() -> ExitCode {
    pretty_env_logger::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Cnf { path, timeout } => run_cnf(&path, timeout),
        Command::PercentSudoku(cmd) => run_percent_sudoku(cmd),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_cnf(path: &PathBuf, timeout_secs: u64) -> Result<(), SolverError> {
    let formula = parse_cnf_file(path)?;
    let config = SolveConfig {
        timeout: Duration::from_secs(timeout_secs),
    };

    let start = Instant::now();
    let outcome = solve(&formula, &config);
    let elapsed = start.elapsed();

    match &outcome {
        Satisfiability::Sat(_) => println!("SATISFIABLE"),
        Satisfiability::Unsat => println!("UNSATISFIABLE"),
        Satisfiability::Timeout => println!("TIMEOUT"),
    }
    println!("time: {:?}", elapsed);

    let res_path = path.with_extension("res");
    if let Err(err) = io::write_res_file(&res_path, &outcome, elapsed) {
        // A failed result-file write is a warning, not a fatal error
        // (spec §7): the solve itself already printed its summary.
        error!("failed to write {}: {err}", res_path.display());
    }

    Ok(())
}

fn run_percent_sudoku(cmd: PercentSudokuCommand) -> Result<(), SolverError> {
    match cmd {
        PercentSudokuCommand::Generate { difficulty, timeout, out, seed, verbose } => {
            let config = GenerateConfig {
                difficulty,
                seed,
                timeout: Duration::from_secs(timeout),
            };
            let game = generator::generate(&config)?;
            io::save_game(&game, &out)?;
            println!(
                "generated difficulty {} puzzle with {} givens -> {}",
                game.difficulty,
                game.num_givens,
                out.display()
            );
            if verbose {
                print_formula_stats(&encoder::encode(&game.puzzle));
            }
            Ok(())
        }
        PercentSudokuCommand::Solve { path, timeout } => {
            let game = io::load_game(&path)?;
            let config = SolveConfig {
                timeout: Duration::from_secs(timeout),
            };
            let (outcome, stats) = pipeline::solve_loaded_game(&game, &config);

            match outcome {
                Satisfiability::Sat(assignment) => {
                    let decoded = encoder::decode(&game.puzzle, &assignment);
                    print_grid(&decoded);
                    if decoded != game.solution {
                        info!("decoded grid differs from the puzzle file's stored solution");
                    }
                    print_solving_stats(&stats);
                    Ok(())
                }
                Satisfiability::Unsat => Err(SolverError::Unsatisfiable),
                Satisfiability::Timeout => {
                    println!("TIMEOUT");
                    print_solving_stats(&stats);
                    Ok(())
                }
            }
        }
        PercentSudokuCommand::Test => run_test(),
        PercentSudokuCommand::Demo => run_demo(),
    }
}

fn run_test() -> Result<(), SolverError> {
    for difficulty in 1..=5u8 {
        let generate_config = GenerateConfig {
            difficulty,
            seed: None,
            timeout: Duration::from_secs(60),
        };
        let solve_config = SolveConfig::default();
        let (game, outcome, stats) =
            pipeline::generate_and_solve(&generate_config, &solve_config)?;

        match outcome {
            Satisfiability::Sat(assignment) => {
                let decoded = encoder::decode(&game.puzzle, &assignment);
                let ok = decoded == game.solution && native::has_unique_solution(&game.puzzle);
                println!(
                    "difficulty {difficulty}: givens={} decoder_matches_generator={ok} total_time={:?}",
                    game.num_givens,
                    stats.total_time()
                );
            }
            other => println!("difficulty {difficulty}: unexpected {other:?}"),
        }
    }
    Ok(())
}

fn run_demo() -> Result<(), SolverError> {
    for difficulty in 1..=5u8 {
        let config = GenerateConfig {
            difficulty,
            seed: None,
            timeout: Duration::from_secs(60),
        };
        let game = generator::generate(&config)?;
        println!("--- difficulty {difficulty} ({} givens) ---", game.num_givens);
        print_grid(&game.puzzle);
    }
    Ok(())
}

fn print_formula_stats(formula: &percent_sudoku_solver::cnf::Formula) {
    let stats = formula.stats();
    println!(
        "formula: {} vars, {} clauses",
        stats.num_vars, stats.num_clauses
    );
    for (len, count) in &stats.length_histogram {
        println!("  length {len}: {count} clauses");
    }
}

fn print_solving_stats(stats: &SolveStats) {
    println!(
        "stats: {} vars, {} clauses, {} givens, encode={:?} solve={:?} total={:?}",
        stats.num_variables,
        stats.num_clauses,
        stats.num_givens,
        stats.encode_time,
        stats.solving_time,
        stats.total_time()
    );
}

fn print_grid(grid: &percent_sudoku_solver::sudoku::Grid) {
    for row in 0..9 {
        let line: Vec<String> = (0..9)
            .map(|col| {
                let d = grid.get(row, col);
                if d == 0 { ".".to_string() } else { d.to_string() }
            })
            .collect();
        println!("{}", line.join(" "));
    }
}
