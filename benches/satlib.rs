//! Benchmarks the DPLL solver against DIMACS CNF instances bundled in
//! `benches/fixtures/`, following the teacher's `satlib.rs` shape (one
//! criterion group per file) but against this crate's single solver
//! rather than its parallel variants, which this crate does not carry
//! (the spec's Non-goals exclude multi-threaded search).

use std::fs;
use std::path::Path;

use criterion::{criterion_group, criterion_main, Criterion};
use percent_sudoku_solver::dimacs::parse_cnf_file;
use percent_sudoku_solver::solver::dpll::{solve, SolveConfig};

pub fn criterion_benchmark(c: &mut Criterion) {
    let fixtures_dir = Path::new("benches/fixtures");
    let entries = match fs::read_dir(fixtures_dir) {
        Ok(entries) => entries,
        Err(_) => return,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some("cnf") {
            continue;
        }
        let formula = match parse_cnf_file(&path) {
            Ok(f) => f,
            Err(_) => continue,
        };

        let label = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("cnf")
            .to_string();
        let config = SolveConfig::default();
        let mut group = c.benchmark_group(label);
        group.bench_function("dpll", |b| b.iter(|| solve(&formula, &config)));
        group.finish();
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);


