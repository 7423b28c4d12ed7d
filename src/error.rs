//! Error kinds surfaced at API boundaries, per the design's §7.
//!
//! [`Satisfiability`](crate::solver::dpll::Satisfiability)'s own
//! SAT/UNSAT/TIMEOUT is never wrapped in [`SolverError`] — per the
//! propagation policy, that tri-valued result is not an error. The
//! generator's top-level `generate()` call has no equivalent tri-state
//! outcome type of its own (it returns a plain `Game` on success), so
//! it surfaces an exhausted timeout budget (spec §5) as
//! `SolverError::Timeout` instead.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SolverError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O failure on {path}: {source}")]
    IoFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("formula is unsatisfiable")]
    Unsatisfiable,

    #[error("timeout budget exceeded")]
    Timeout,

    #[error("internal invariant violated: {0}")]
    InternalError(String),
}

pub type Result<T> = std::result::Result<T, SolverError>;
