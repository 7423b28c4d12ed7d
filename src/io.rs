//! Driver-layer I/O: puzzle file save/load (spec §6.4) and `.res`
//! result-file writing (spec §6.3). Deliberately outside the solver
//! core — these are thin text formats, not solving logic.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Result, SolverError};
use crate::solver::dpll::Satisfiability;
use crate::sudoku::grid::{Game, Grid, SIZE};

fn io_err(path: &Path, source: std::io::Error) -> SolverError {
    SolverError::IoFailure {
        path: path.to_path_buf(),
        source,
    }
}

/// Writes `game` in the line-oriented format from spec §6.4: a
/// `# Percent Sudoku Game File` header, `difficulty`/`num_givens`
/// fields, then `# Puzzle` and `# Solution` sections of nine
/// space-separated rows each.
pub fn save_game(game: &Game, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut out = String::new();
    let _ = writeln!(out, "# Percent Sudoku Game File");
    let _ = writeln!(out, "difficulty {}", game.difficulty);
    let _ = writeln!(out, "num_givens {}", game.num_givens);
    let _ = writeln!(out, "\n# Puzzle");
    write_grid(&mut out, &game.puzzle);
    let _ = writeln!(out, "\n# Solution");
    write_grid(&mut out, &game.solution);

    fs::write(path, out).map_err(|e| io_err(path, e))
}

fn write_grid(out: &mut String, grid: &Grid) {
    for row in 0..SIZE {
        for col in 0..SIZE {
            if col > 0 {
                out.push(' ');
            }
            let _ = write!(out, "{}", grid.get(row, col));
        }
        out.push('\n');
    }
}

/// Loads a game file saved by [`save_game`]. Comment lines (`#`) are
/// skipped; `difficulty`/`num_givens` fields and the two nine-row grid
/// sections are read positionally, matching the original format's
/// lenient line-by-line parse.
pub fn load_game(path: impl AsRef<Path>) -> Result<Game> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| io_err(path, e))?;

    let mut difficulty: u8 = 1;
    let mut rows: Vec<Vec<u8>> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("difficulty") {
            difficulty = rest.trim().parse().map_err(|_| {
                SolverError::InvalidInput(format!("malformed difficulty line: {line:?}"))
            })?;
            continue;
        }
        if trimmed.starts_with("num_givens") {
            continue;
        }

        let digits: Vec<u8> = trimmed
            .split_whitespace()
            .map(|tok| {
                tok.parse::<u8>()
                    .map_err(|_| SolverError::InvalidInput(format!("bad grid digit {tok:?}")))
            })
            .collect::<Result<_>>()?;
        if digits.len() != SIZE {
            return Err(SolverError::InvalidInput(format!(
                "expected {SIZE} digits per row, got {} in {line:?}",
                digits.len()
            )));
        }
        rows.push(digits);
    }

    if rows.len() != 2 * SIZE {
        return Err(SolverError::InvalidInput(format!(
            "expected {} grid rows (puzzle + solution), got {}",
            2 * SIZE,
            rows.len()
        )));
    }

    let mut puzzle = Grid::new();
    for (row, digits) in rows[..SIZE].iter().enumerate() {
        for (col, &digit) in digits.iter().enumerate() {
            puzzle.set(row, col, digit);
        }
    }
    puzzle.recompute_given_mask();

    let mut solution = Grid::new();
    for (row, digits) in rows[SIZE..].iter().enumerate() {
        for (col, &digit) in digits.iter().enumerate() {
            solution.set(row, col, digit);
        }
    }

    Ok(Game::new(puzzle, solution, difficulty))
}

/// Writes the `.res` sibling file for a CNF solve (spec §6.3): a
/// status line, a value line (only on SAT, unassigned variables
/// defaulted to `FALSE` and printed negated), and a timing line
/// rounded to integer milliseconds.
pub fn write_res_file(
    path: impl AsRef<Path>,
    outcome: &Satisfiability,
    elapsed: Duration,
) -> Result<()> {
    let path = path.as_ref();
    let mut out = String::new();

    match outcome {
        Satisfiability::Sat(assignment) => {
            let _ = writeln!(out, "s 1");
            let _ = write!(out, "v");
            for lit in assignment.to_literals() {
                let _ = write!(out, " {lit}");
            }
            out.push('\n');
        }
        Satisfiability::Unsat => {
            let _ = writeln!(out, "s 0");
        }
        Satisfiability::Timeout => {
            let _ = writeln!(out, "s -1");
        }
    }
    let _ = writeln!(out, "t {}", elapsed.as_millis());

    fs::write(path, out).map_err(|e| io_err(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::{Assignment, LiteralValue};
    use tempfile::tempdir;

    #[test]
    fn game_round_trips_through_save_and_load() {
        let mut puzzle = Grid::new();
        puzzle.set(0, 0, 5);
        puzzle.recompute_given_mask();
        let mut solution = Grid::new();
        for row in 0..SIZE {
            for col in 0..SIZE {
                solution.set(row, col, ((row + col) % 9 + 1) as u8);
            }
        }
        let game = Game::new(puzzle, solution, 3);

        let dir = tempdir().unwrap();
        let path = dir.path().join("game.txt");
        save_game(&game, &path).unwrap();
        let loaded = load_game(&path).unwrap();

        assert_eq!(loaded.difficulty, 3);
        assert_eq!(loaded.puzzle.get(0, 0), 5);
        assert_eq!(loaded.solution, game.solution);
    }

    #[test]
    fn res_file_reports_sat_with_negated_defaults() {
        let mut assignment = Assignment::new(3);
        assignment.set(1, LiteralValue::True);
        // var 2 left unassigned; write_res_file must default it to FALSE.
        assignment.set(3, LiteralValue::False);
        let outcome = Satisfiability::Sat(assignment);

        let dir = tempdir().unwrap();
        let path = dir.path().join("out.res");
        write_res_file(&path, &outcome, Duration::from_millis(42)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("s 1"));
        assert_eq!(lines.next(), Some("v 1 -2 -3"));
        assert_eq!(lines.next(), Some("t 42"));
    }

    #[test]
    fn res_file_reports_unsat_with_no_value_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.res");
        write_res_file(&path, &Satisfiability::Unsat, Duration::from_millis(7)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("s 0"));
        assert_eq!(lines.next(), Some("t 7"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn load_rejects_files_missing_a_solution_section() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.txt");
        fs::write(&path, "# Percent Sudoku Game File\ndifficulty 1\nnum_givens 0\n").unwrap();
        assert!(load_game(&path).is_err());
    }
}
