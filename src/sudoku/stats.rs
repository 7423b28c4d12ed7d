//! Timing and size statistics for a generate-and-solve or
//! solve-from-file run, mirroring `percent_sudoku_solver.c`'s
//! `PercentSudokuStats` / `initialize_solving_stats` /
//! `update_solving_stats` (spec `SPEC_FULL.md` §B).

use std::time::Duration;

#[derive(Debug, Clone, Default)]
pub struct SolveStats {
    pub generation_time: Duration,
    pub encode_time: Duration,
    pub solving_time: Duration,
    pub num_variables: u32,
    pub num_clauses: usize,
    pub num_givens: usize,
}

impl SolveStats {
    pub fn total_time(&self) -> Duration {
        self.generation_time + self.encode_time + self.solving_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_time_sums_the_three_phases() {
        let stats = SolveStats {
            generation_time: Duration::from_millis(10),
            encode_time: Duration::from_millis(20),
            solving_time: Duration::from_millis(30),
            num_variables: 729,
            num_clauses: 9801,
            num_givens: 30,
        };
        assert_eq!(stats.total_time(), Duration::from_millis(60));
    }
}
