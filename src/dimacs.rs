//! DIMACS CNF parser: reads the textual format described in spec §6.2
//! into a [`Formula`].
//! https://www.cs.ubc.ca/~hoos/SATLIB/Benchmarks/SAT/satformat.ps
//!
//! Line classification follows the first non-whitespace character:
//! `c` starts a comment, `p cnf N M` is the problem header (must
//! precede every clause line), blank lines are ignored, anything else
//! is a clause line of signed integers terminated by a literal `0`. A
//! clause may in principle span several lines; tokens are accumulated
//! across lines until a `0` closes the clause, matching the original
//! source's token-stream behavior rather than assuming one line per
//! clause.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info, warn};

use crate::cnf::{Clause, Formula, Literal};
use crate::error::{Result, SolverError};

/// Parses a DIMACS CNF file at `path` into a [`Formula`].
pub fn parse_cnf_file<P: AsRef<Path>>(path: P) -> Result<Formula> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SolverError::IoFailure {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    let lines: Vec<Result<String>> = reader
        .lines()
        .map(|l| {
            l.map_err(|source| SolverError::IoFailure {
                path: path.to_path_buf(),
                source,
            })
        })
        .collect();
    parse_cnf_lines(lines)
}

/// Parses DIMACS CNF text already in memory (e.g. for round-trip tests).
pub fn parse_cnf_str(text: &str) -> Result<Formula> {
    parse_cnf_lines(text.lines().map(|l| Ok(l.to_string())))
}

struct Header {
    num_vars: u32,
    num_clauses: usize,
}

fn parse_header(line: &str) -> Result<Header> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 4 || parts[0] != "p" || parts[1] != "cnf" {
        return Err(SolverError::InvalidInput(format!(
            "malformed DIMACS header: {line:?}"
        )));
    }
    let num_vars: u32 = parts[2].parse().map_err(|_| {
        SolverError::InvalidInput(format!("bad variable count in header: {line:?}"))
    })?;
    let num_clauses: usize = parts[3].parse().map_err(|_| {
        SolverError::InvalidInput(format!("bad clause count in header: {line:?}"))
    })?;
    Ok(Header {
        num_vars,
        num_clauses,
    })
}

fn parse_cnf_lines<I>(lines: I) -> Result<Formula>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut header: Option<Header> = None;
    let mut formula: Option<Formula> = None;
    let mut pending = Clause::new();
    let mut pending_has_literals = false;

    for line in lines {
        let line = line?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        if line.starts_with('p') {
            if header.is_some() {
                return Err(SolverError::InvalidInput(
                    "duplicate 'p cnf' header".to_string(),
                ));
            }
            let h = parse_header(line)?;
            debug!(
                "DIMACS header: {} vars, {} clauses",
                h.num_vars, h.num_clauses
            );
            formula = Some(Formula::with_capacity(h.num_vars, h.num_clauses));
            header = Some(h);
            continue;
        }

        let formula_ref = formula.as_mut().ok_or_else(|| {
            SolverError::InvalidInput("clause line encountered before 'p cnf' header".to_string())
        })?;

        for token in line.split_whitespace() {
            let lit: i32 = token
                .parse()
                .map_err(|_| SolverError::InvalidInput(format!("malformed literal: {token:?}")))?;
            if lit == 0 {
                formula_ref.add_clause(std::mem::take(&mut pending));
                pending_has_literals = false;
            } else {
                pending.push(Literal::new(lit));
                pending_has_literals = true;
            }
        }
    }

    let header =
        header.ok_or_else(|| SolverError::InvalidInput("missing 'p cnf N M' header".to_string()))?;
    let mut formula = formula
        .ok_or_else(|| SolverError::InvalidInput("missing 'p cnf N M' header".to_string()))?;

    if pending_has_literals {
        warn!("clause not terminated by trailing 0; accepting as-is");
        formula.add_clause(pending);
    }

    if formula.num_clauses() != header.num_clauses {
        warn!(
            "declared {} clauses but parsed {}",
            header.num_clauses,
            formula.num_clauses()
        );
    }

    info!(
        "parsed CNF: {} vars, {} clauses",
        formula.num_vars(),
        formula.num_clauses()
    );

    Ok(formula)
}
