//! Uniqueness-preserving Percent Sudoku generator (spec §4.5).

use std::time::{Duration, Instant};

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::{Result, SolverError};
use crate::sudoku::grid::{Game, SIZE};
use crate::sudoku::native;

pub const DEFAULT_DIFFICULTY: u8 = 2;
pub const DEFAULT_BLANK_COUNT: usize = 40;

/// Blank counts by difficulty, spec §4.5.
pub fn blank_count_for_difficulty(difficulty: u8) -> usize {
    match difficulty {
        1 => 30,
        2 => 40,
        3 => 50,
        4 => 55,
        5 => 60,
        _ => DEFAULT_BLANK_COUNT,
    }
}

#[derive(Debug, Clone)]
pub struct GenerateConfig {
    pub difficulty: u8,
    /// Injected seed for deterministic tests; `None` seeds from
    /// entropy (spec §4.5: "seeded from wall-clock time by default").
    pub seed: Option<u64>,
    pub timeout: Duration,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        GenerateConfig {
            difficulty: DEFAULT_DIFFICULTY,
            seed: None,
            timeout: Duration::from_secs(300),
        }
    }
}

fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    }
}

/// Generates a (puzzle, solution) pair at `config.difficulty`.
///
/// Synthesizes a full solved grid, then shuffles the 81 cell
/// positions and walks them, tentatively blanking each and accepting
/// the blank only if the puzzle still has exactly one completion.
/// Stops at the difficulty's target blank count or when positions are
/// exhausted (fewer blanks may result for heavily-constrained grids).
///
/// Returns `Err(SolverError::Timeout)` if `config.timeout` is
/// exhausted before either phase (full-grid synthesis or blanking)
/// completes (spec §5: "the current operation returns TIMEOUT
/// promptly; any partial assignment is discarded"), rather than
/// silently returning a puzzle blanked fewer times than requested.
pub fn generate(config: &GenerateConfig) -> Result<Game> {
    if !(1..=5).contains(&config.difficulty) {
        return Err(SolverError::InvalidInput(format!(
            "difficulty must be in [1, 5], got {}",
            config.difficulty
        )));
    }

    let deadline = Instant::now() + config.timeout;
    let mut rng = make_rng(config.seed);

    let solution = match native::generate_complete_grid(&mut rng, deadline) {
        Some(grid) => grid,
        None => {
            info!("generator timed out during full-grid synthesis");
            return Err(SolverError::Timeout);
        }
    };
    let mut puzzle = solution.clone();
    puzzle.recompute_given_mask();

    let target_blanks = blank_count_for_difficulty(config.difficulty);
    let mut positions: Vec<(usize, usize)> =
        (0..SIZE).flat_map(|r| (0..SIZE).map(move |c| (r, c))).collect();
    positions.shuffle(&mut rng);

    let mut blanked = 0;
    for &(row, col) in &positions {
        if blanked >= target_blanks {
            break;
        }
        if Instant::now() >= deadline {
            info!("generator timed out after blanking {blanked} cells");
            return Err(SolverError::Timeout);
        }

        let original = puzzle.get(row, col);
        puzzle.clear(row, col);

        if native::has_unique_solution(&puzzle) {
            blanked += 1;
            debug!("blanked ({row}, {col}); {blanked}/{target_blanks}");
        } else {
            puzzle.set(row, col, original);
        }
    }

    puzzle.recompute_given_mask();
    let game = Game::new(puzzle, solution, config.difficulty);

    debug_assert!(
        game.verify(),
        "generated puzzle failed verification against its own solution"
    );

    Ok(game)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_counts_match_spec_table() {
        assert_eq!(blank_count_for_difficulty(1), 30);
        assert_eq!(blank_count_for_difficulty(2), 40);
        assert_eq!(blank_count_for_difficulty(3), 50);
        assert_eq!(blank_count_for_difficulty(4), 55);
        assert_eq!(blank_count_for_difficulty(5), 60);
        assert_eq!(blank_count_for_difficulty(9), DEFAULT_BLANK_COUNT);
    }

    #[test]
    fn rejects_out_of_range_difficulty() {
        let config = GenerateConfig {
            difficulty: 0,
            seed: Some(1),
            timeout: Duration::from_secs(5),
        };
        assert!(generate(&config).is_err());
    }

    #[test]
    fn generated_puzzle_has_a_unique_completion_matching_the_solution() {
        let config = GenerateConfig {
            difficulty: 1,
            seed: Some(123),
            timeout: Duration::from_secs(30),
        };
        let game = generate(&config).unwrap();

        assert!(game.solution.is_solved());
        assert!(game.puzzle.agrees_with_givens_of(&game.solution));
        assert!(native::has_unique_solution(&game.puzzle));
        assert_eq!(game.num_givens, game.puzzle.num_givens());
    }

    #[test]
    fn same_seed_is_deterministic() {
        let config = GenerateConfig {
            difficulty: 1,
            seed: Some(99),
            timeout: Duration::from_secs(30),
        };
        let a = generate(&config).unwrap();
        let b = generate(&config).unwrap();
        assert_eq!(a.puzzle, b.puzzle);
        assert_eq!(a.solution, b.solution);
    }

    #[test]
    fn zero_budget_reports_timeout_instead_of_a_degraded_puzzle() {
        let config = GenerateConfig {
            difficulty: 1,
            seed: Some(42),
            timeout: Duration::from_nanos(0),
        };
        assert!(matches!(generate(&config), Err(SolverError::Timeout)));
    }
}
