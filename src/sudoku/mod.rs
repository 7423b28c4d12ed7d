//! Percent Sudoku: grid model, CNF encoding, a native backtracker for
//! generation, and the uniqueness-preserving generator (spec §4.3-4.5).

pub mod encoder;
pub mod generator;
pub mod grid;
pub mod native;
pub mod pipeline;
pub mod stats;

pub use generator::{generate, GenerateConfig};
pub use grid::{Game, Grid};
pub use stats::SolveStats;
