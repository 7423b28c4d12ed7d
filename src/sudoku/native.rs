//! The recursive constraint-check backtracker used by the generator
//! (spec §4.6). Not used to solve caller-supplied puzzles at runtime —
//! that's the CNF/DPLL path in [`crate::solver`] — but fast for
//! synthesizing full grids and counting completions during uniqueness
//! checks.

use std::time::Instant;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::sudoku::grid::{Grid, MAX_DIGIT, MIN_DIGIT, SIZE};

/// Finds the first empty cell in row-major order.
fn first_empty(grid: &Grid) -> Option<(usize, usize)> {
    for row in 0..SIZE {
        for col in 0..SIZE {
            if grid.is_empty_at(row, col) {
                return Some((row, col));
            }
        }
    }
    None
}

/// Fills `grid` via depth-first backtracking, trying digits in the
/// order given by `digit_order` at every cell. Returns `true` iff a
/// completion was found (it always mutates `grid` toward one when it
/// returns `true`, and restores it to the state it was passed with
/// otherwise).
pub fn solve_recursive(grid: &mut Grid, digit_order: &[u8; 9]) -> bool {
    let (row, col) = match first_empty(grid) {
        Some(pos) => pos,
        None => return true,
    };

    for &digit in digit_order {
        if grid.is_valid_placement(row, col, digit) {
            grid.set(row, col, digit);
            if solve_recursive(grid, digit_order) {
                return true;
            }
            grid.clear(row, col);
        }
    }
    false
}

const ASCENDING_DIGITS: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

/// Solves `grid` in place using ascending digit order (deterministic,
/// used by the uniqueness checker).
pub fn solve(grid: &mut Grid) -> bool {
    solve_recursive(grid, &ASCENDING_DIGITS)
}

/// As [`solve_recursive`], but samples `deadline` at every node entry
/// and aborts with `Err(())` once it has passed (spec §5: "sample
/// elapsed time at least at every... node entry").
fn solve_recursive_checked(
    grid: &mut Grid,
    digit_order: &[u8; 9],
    deadline: Instant,
) -> Result<bool, ()> {
    if Instant::now() >= deadline {
        return Err(());
    }

    let (row, col) = match first_empty(grid) {
        Some(pos) => pos,
        None => return Ok(true),
    };

    for &digit in digit_order {
        if grid.is_valid_placement(row, col, digit) {
            grid.set(row, col, digit);
            if solve_recursive_checked(grid, digit_order, deadline)? {
                return Ok(true);
            }
            grid.clear(row, col);
        }
    }
    Ok(false)
}

/// Produces a full, valid, complete grid by backtracking from empty,
/// trying digits in a randomized order at every cell so repeated calls
/// explore different solutions (spec §4.5's "randomize digit order").
/// Returns `None` if `deadline` passes before a completion is found,
/// honoring the same top-level timeout budget as the rest of a
/// generate call (spec §5) rather than running unchecked.
pub fn generate_complete_grid<R: Rng + ?Sized>(rng: &mut R, deadline: Instant) -> Option<Grid> {
    let mut grid = Grid::new();
    let mut order = ASCENDING_DIGITS;
    order.shuffle(rng);
    match solve_recursive_checked(&mut grid, &order, deadline) {
        Ok(true) => Some(grid),
        Ok(false) => {
            debug_assert!(false, "Percent Sudoku constraints admit no full grid");
            None
        }
        Err(()) => None,
    }
}

/// Counts completions of `grid`, short-circuiting once 2 are found
/// (spec §4.5's uniqueness check never needs to know more than that).
pub fn count_solutions(grid: &Grid) -> u32 {
    let mut working = grid.clone();
    let mut count = 0;
    count_solutions_recursive(&mut working, &mut count);
    count
}

fn count_solutions_recursive(grid: &mut Grid, count: &mut u32) {
    if *count >= 2 {
        return;
    }
    let (row, col) = match first_empty(grid) {
        Some(pos) => pos,
        None => {
            *count += 1;
            return;
        }
    };

    for digit in MIN_DIGIT..=MAX_DIGIT {
        if grid.is_valid_placement(row, col, digit) {
            grid.set(row, col, digit);
            count_solutions_recursive(grid, count);
            grid.clear(row, col);
            if *count >= 2 {
                return;
            }
        }
    }
}

/// `count_solutions(grid) == 1`.
pub fn has_unique_solution(grid: &Grid) -> bool {
    count_solutions(grid) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::time::Duration;

    fn generous_deadline() -> Instant {
        Instant::now() + Duration::from_secs(30)
    }

    #[test]
    fn generated_grid_is_solved() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let grid = generate_complete_grid(&mut rng, generous_deadline()).unwrap();
        assert!(grid.is_solved());
    }

    #[test]
    fn empty_grid_has_at_least_one_solution() {
        let grid = Grid::new();
        assert!(count_solutions(&grid) >= 1);
    }

    #[test]
    fn a_grid_with_one_blank_cell_and_a_forced_digit_is_unique() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut grid = generate_complete_grid(&mut rng, generous_deadline()).unwrap();
        let (row, col) = (0, 0);
        grid.clear(row, col);
        assert!(has_unique_solution(&grid));
    }

    #[test]
    fn contradictory_grid_has_no_solution() {
        let mut grid = Grid::new();
        grid.set(0, 0, 5);
        grid.set(0, 1, 5);
        assert_eq!(count_solutions(&grid), 0);
    }

    #[test]
    fn an_already_expired_deadline_yields_no_grid() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(1);
        let expired = Instant::now() - Duration::from_secs(1);
        assert!(generate_complete_grid(&mut rng, expired).is_none());
    }
}
