//! Driver-facing compositions of generate/encode/solve with timing,
//! mirroring `percent_sudoku_solver.c`'s `generate_and_solve_percent_sudoku`
//! and `solve_from_file` (spec `SPEC_FULL.md` §B). Not part of the
//! "hard part" core (spec §1) — thin glue so the CLI driver doesn't
//! duplicate this sequencing.

use std::time::Instant;

use crate::error::Result;
use crate::solver::dpll::{solve, Satisfiability, SolveConfig};
use crate::sudoku::encoder;
use crate::sudoku::generator::{self, GenerateConfig};
use crate::sudoku::grid::Game;
use crate::sudoku::stats::SolveStats;

/// Generates a puzzle at `generate_config.difficulty`, encodes it, and
/// solves it via DPLL, returning the game, the solve outcome, and
/// per-phase timing/size statistics.
pub fn generate_and_solve(
    generate_config: &GenerateConfig,
    solve_config: &SolveConfig,
) -> Result<(Game, Satisfiability, SolveStats)> {
    let mut stats = SolveStats::default();

    let gen_start = Instant::now();
    let game = generator::generate(generate_config)?;
    stats.generation_time = gen_start.elapsed();
    stats.num_givens = game.num_givens;

    let encode_start = Instant::now();
    let formula = encoder::encode(&game.puzzle);
    stats.encode_time = encode_start.elapsed();
    stats.num_variables = formula.num_vars();
    stats.num_clauses = formula.num_clauses();

    let solve_start = Instant::now();
    let outcome = solve(&formula, solve_config);
    stats.solving_time = solve_start.elapsed();

    Ok((game, outcome, stats))
}

/// Loads `game` (already read from a puzzle file by the caller),
/// encodes it, and solves it via DPLL, returning the solve outcome and
/// per-phase timing/size statistics. `generation_time` is left at zero
/// since the puzzle was loaded, not freshly generated.
pub fn solve_loaded_game(game: &Game, solve_config: &SolveConfig) -> (Satisfiability, SolveStats) {
    let mut stats = SolveStats {
        num_givens: game.num_givens,
        ..SolveStats::default()
    };

    let encode_start = Instant::now();
    let formula = encoder::encode(&game.puzzle);
    stats.encode_time = encode_start.elapsed();
    stats.num_variables = formula.num_vars();
    stats.num_clauses = formula.num_clauses();

    let solve_start = Instant::now();
    let outcome = solve(&formula, solve_config);
    stats.solving_time = solve_start.elapsed();

    (outcome, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn generate_and_solve_reports_matching_encoder_size() {
        let generate_config = GenerateConfig {
            difficulty: 1,
            seed: Some(7),
            timeout: Duration::from_secs(30),
        };
        let solve_config = SolveConfig::default();

        let (game, outcome, stats) =
            generate_and_solve(&generate_config, &solve_config).unwrap();

        assert!(outcome.is_sat());
        assert_eq!(stats.num_variables, 729);
        assert_eq!(stats.num_givens, game.num_givens);
    }
}
