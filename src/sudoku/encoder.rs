//! Percent Sudoku <-> CNF encoder/decoder (spec §4.4).
//!
//! 729 variables: `var(r, c, d) = (r * 9 + c) * 9 + d` encodes "cell
//! `(r, c)` holds digit `d`". At-least-one-per-cell plus
//! at-most-one-per-group (row/column/box/diagonal/window) clauses,
//! plus one unit clause per given, are exactly the formula's clauses.

use log::debug;

use crate::cnf::{Clause, Formula, Literal, LiteralValue};
use crate::sudoku::grid::{Grid, MAX_DIGIT, MIN_DIGIT, SIZE};

pub const NUM_VARIABLES: u32 = 729;

/// `var(r, c, d)` from spec §4.4, `1 <= var <= 729`.
pub fn var(row: usize, col: usize, digit: u8) -> u32 {
    debug_assert!(row < SIZE && col < SIZE);
    debug_assert!((MIN_DIGIT..=MAX_DIGIT).contains(&digit));
    ((row * SIZE + col) * SIZE) as u32 + digit as u32
}

/// Inverse of [`var`]: recovers `(row, col, digit)` from a 1-based
/// variable id in `[1, 729]`.
pub fn position_of(variable: u32) -> (usize, usize, u8) {
    debug_assert!((1..=NUM_VARIABLES).contains(&variable));
    let zero_based = variable - 1;
    let digit = (zero_based % SIZE as u32) as u8 + 1;
    let rest = zero_based / SIZE as u32;
    let col = (rest % SIZE as u32) as usize;
    let row = (rest / SIZE as u32) as usize;
    (row, col, digit)
}

fn at_most_one_over(formula: &mut Formula, cells: &[(usize, usize)]) {
    for digit in MIN_DIGIT..=MAX_DIGIT {
        for i in 0..cells.len() {
            for j in (i + 1)..cells.len() {
                let (r1, c1) = cells[i];
                let (r2, c2) = cells[j];
                formula.add_clause(
                    Clause::new()
                        .add_literal(Literal::new(-(var(r1, c1, digit) as i32)))
                        .add_literal(Literal::new(-(var(r2, c2, digit) as i32))),
                );
            }
        }
    }
}

fn add_cell_constraints(formula: &mut Formula) {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let clause = (MIN_DIGIT..=MAX_DIGIT)
                .map(|d| Literal::new(var(row, col, d) as i32))
                .collect();
            formula.add_clause(clause);
        }
    }
}

fn add_row_constraints(formula: &mut Formula) {
    for row in 0..SIZE {
        let cells: Vec<_> = (0..SIZE).map(|col| (row, col)).collect();
        at_most_one_over(formula, &cells);
    }
}

fn add_column_constraints(formula: &mut Formula) {
    for col in 0..SIZE {
        let cells: Vec<_> = (0..SIZE).map(|row| (row, col)).collect();
        at_most_one_over(formula, &cells);
    }
}

fn add_box_constraints(formula: &mut Formula) {
    for box_row in 0..3 {
        for box_col in 0..3 {
            let cells: Vec<_> = (0..3)
                .flat_map(|i| (0..3).map(move |j| (i, j)))
                .map(|(i, j)| (box_row * 3 + i, box_col * 3 + j))
                .collect();
            at_most_one_over(formula, &cells);
        }
    }
}

fn add_diagonal_constraints(formula: &mut Formula) {
    at_most_one_over(formula, &Grid::anti_diagonal_cells());
}

fn add_window_constraints(formula: &mut Formula) {
    at_most_one_over(formula, &Grid::upper_window_cells());
    at_most_one_over(formula, &Grid::lower_window_cells());
}

fn add_given_constraints(formula: &mut Formula, puzzle: &Grid) {
    for row in 0..SIZE {
        for col in 0..SIZE {
            let digit = puzzle.get(row, col);
            if digit != crate::sudoku::grid::EMPTY {
                formula.add_clause(Clause::new().add_literal(Literal::new(var(row, col, digit) as i32)));
            }
        }
    }
}

/// Builds the CNF formula for `puzzle`: 729 variables, ~9,801 clauses
/// plus one unit clause per given.
pub fn encode(puzzle: &Grid) -> Formula {
    // 81 + 3*(9*9*36) + 2*(9*36) + givens = 81 + 8748 + 648 + givens.
    let estimated_clauses = 81 + 3 * 9 * 9 * 36 + 2 * 9 * 36 + puzzle.num_givens();
    let mut formula = Formula::with_capacity(NUM_VARIABLES, estimated_clauses);

    add_cell_constraints(&mut formula);
    add_row_constraints(&mut formula);
    add_column_constraints(&mut formula);
    add_box_constraints(&mut formula);
    add_diagonal_constraints(&mut formula);
    add_window_constraints(&mut formula);
    add_given_constraints(&mut formula, puzzle);

    debug!(
        "encoded Percent Sudoku puzzle: {} vars, {} clauses",
        formula.num_vars(),
        formula.num_clauses()
    );
    formula
}

/// Fills in `puzzle`'s blanks from a satisfying [`crate::cnf::Assignment`].
/// Givens are copied verbatim first; every other cell is filled with
/// the unique digit `d` for which `var(r, c, d)` is true.
pub fn decode(puzzle: &Grid, assignment: &crate::cnf::Assignment) -> Grid {
    let mut solution = puzzle.clone();
    for row in 0..SIZE {
        for col in 0..SIZE {
            if !solution.is_empty_at(row, col) {
                continue;
            }
            for digit in MIN_DIGIT..=MAX_DIGIT {
                let variable = var(row, col, digit);
                if variable <= assignment.num_vars()
                    && assignment.value_of(variable) == LiteralValue::True
                {
                    solution.set(row, col, digit);
                    break;
                }
            }
        }
    }
    solution
}
