//! Plain recursive DPLL: unit propagation, conflict detection,
//! deterministic branching, and a cooperatively-checked timeout.
//!
//! No clause learning, no watched literals, no restarts, no
//! multi-threaded search — see spec §1's Non-goals.

pub mod dpll;

pub use dpll::{solve, Satisfiability, SolveConfig};
