use std::time::{Duration, Instant};

use log::{debug, trace};

use crate::cnf::{Assignment, Formula, LiteralValue, VarId};

/// Timeout budget and any other future per-solve knobs. Replaces the
/// original implementation's global volatile timeout flag with an
/// explicit deadline threaded through the recursion (spec §9).
#[derive(Debug, Clone, Copy)]
pub struct SolveConfig {
    pub timeout: Duration,
}

impl Default for SolveConfig {
    fn default() -> Self {
        // Matches the original source's 300-second default budget.
        SolveConfig {
            timeout: Duration::from_secs(300),
        }
    }
}

/// Outcome of a top-level solve.
#[derive(Debug)]
pub enum Satisfiability {
    Sat(Assignment),
    Unsat,
    Timeout,
}

impl Satisfiability {
    pub fn is_sat(&self) -> bool {
        matches!(self, Satisfiability::Sat(_))
    }
}

/// Solves `formula`, returning SAT (with a total assignment), UNSAT,
/// or TIMEOUT. See spec §4.2 for the contract.
pub fn solve(formula: &Formula, config: &SolveConfig) -> Satisfiability {
    let deadline = Instant::now() + config.timeout;
    let mut assignment = Assignment::new(formula.num_vars());

    match dpll(formula, &mut assignment, deadline) {
        NodeOutcome::Sat => {
            assignment.default_unassigned_to_false();
            Satisfiability::Sat(assignment)
        }
        NodeOutcome::Unsat => Satisfiability::Unsat,
        NodeOutcome::Timeout => Satisfiability::Timeout,
    }
}

enum NodeOutcome {
    Sat,
    Unsat,
    Timeout,
}

enum PropagateOutcome {
    Sat,
    Conflict,
    Quiescent,
    Timeout,
}

/// Unit-propagates to a fixpoint, in clause-stored order, re-scanning
/// from the top of the clause list every pass until a full pass makes
/// no assignment (spec §4.2). Assignments made are recorded in `trail`
/// so the caller can undo them on backtrack.
fn propagate(
    formula: &Formula,
    assignment: &mut Assignment,
    trail: &mut Vec<VarId>,
    deadline: Instant,
) -> PropagateOutcome {
    loop {
        if Instant::now() >= deadline {
            return PropagateOutcome::Timeout;
        }

        let mut progressed = false;
        for clause in formula.clauses() {
            if clause.is_conflicting(assignment) {
                trace!("conflict in clause {:?}", clause.literals());
                return PropagateOutcome::Conflict;
            }
            if let Some(unit) = clause.unit_literal(assignment) {
                let value = LiteralValue::from_bool(unit.is_positive());
                trace!("unit propagation: {:?} -> {:?}", unit, value);
                assignment.set(unit.var(), value);
                trail.push(unit.var());
                progressed = true;

                if formula.is_satisfied(assignment) {
                    return PropagateOutcome::Sat;
                }
            }
        }

        if !progressed {
            return PropagateOutcome::Quiescent;
        }
    }
}

fn undo(assignment: &mut Assignment, trail: &[VarId]) {
    for &var in trail {
        assignment.set(var, LiteralValue::Unassigned);
    }
}

/// Lowest-numbered unassigned variable, per the required deterministic
/// branching policy.
fn select_branch_variable(formula: &Formula, assignment: &Assignment) -> Option<VarId> {
    (1..=formula.num_vars()).find(|&v| assignment.value_of(v) == LiteralValue::Unassigned)
}

fn dpll(formula: &Formula, assignment: &mut Assignment, deadline: Instant) -> NodeOutcome {
    // Checked first, on every call, the way the teacher's dpll_recursive
    // checks formula evaluation before doing anything else: a branch
    // decision made by the *parent* node (or, for M=0, the initial
    // all-unassigned assignment) can already satisfy or falsify the
    // formula before this node has propagated or branched at all.
    // Skipping this would force branching over every remaining free
    // variable even once nothing further is constrained.
    if formula.is_satisfied(assignment) {
        return NodeOutcome::Sat;
    }
    if formula.has_conflict(assignment) {
        return NodeOutcome::Unsat;
    }

    if Instant::now() >= deadline {
        return NodeOutcome::Timeout;
    }

    let mut trail = Vec::new();
    match propagate(formula, assignment, &mut trail, deadline) {
        PropagateOutcome::Sat => return NodeOutcome::Sat,
        PropagateOutcome::Conflict => {
            undo(assignment, &trail);
            return NodeOutcome::Unsat;
        }
        PropagateOutcome::Timeout => {
            undo(assignment, &trail);
            return NodeOutcome::Timeout;
        }
        PropagateOutcome::Quiescent => {}
    }

    let branch_var = match select_branch_variable(formula, assignment) {
        Some(v) => v,
        None => {
            // No unassigned variable remains; propagation's own SAT
            // short-circuit should already have caught this, but an
            // unconstrained variable could leave us here without it.
            let outcome = if formula.is_satisfied(assignment) {
                NodeOutcome::Sat
            } else {
                NodeOutcome::Unsat
            };
            if !matches!(outcome, NodeOutcome::Sat) {
                undo(assignment, &trail);
            }
            return outcome;
        }
    };

    for &value in &[LiteralValue::True, LiteralValue::False] {
        debug!("branch: var {} = {:?}", branch_var, value);
        assignment.set(branch_var, value);
        match dpll(formula, assignment, deadline) {
            NodeOutcome::Sat => return NodeOutcome::Sat,
            NodeOutcome::Timeout => {
                assignment.set(branch_var, LiteralValue::Unassigned);
                undo(assignment, &trail);
                return NodeOutcome::Timeout;
            }
            NodeOutcome::Unsat => {
                assignment.set(branch_var, LiteralValue::Unassigned);
            }
        }
    }

    undo(assignment, &trail);
    NodeOutcome::Unsat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimacs::parse_cnf_str;

    fn solve_str(text: &str) -> Satisfiability {
        let formula = parse_cnf_str(text).unwrap();
        solve(&formula, &SolveConfig::default())
    }

    #[test]
    fn trivial_sat() {
        let outcome = solve_str("p cnf 1 1\n1 0\n");
        match outcome {
            Satisfiability::Sat(a) => assert_eq!(a.value_of(1), LiteralValue::True),
            _ => panic!("expected SAT"),
        }
    }

    #[test]
    fn trivial_unsat() {
        let outcome = solve_str("p cnf 1 2\n1 0\n-1 0\n");
        assert!(matches!(outcome, Satisfiability::Unsat));
    }

    #[test]
    fn unit_propagation_chain() {
        let outcome = solve_str("p cnf 3 3\n1 0\n-1 2 0\n-2 3 0\n");
        match outcome {
            Satisfiability::Sat(a) => {
                assert_eq!(a.value_of(1), LiteralValue::True);
                assert_eq!(a.value_of(2), LiteralValue::True);
                assert_eq!(a.value_of(3), LiteralValue::True);
            }
            _ => panic!("expected SAT"),
        }
    }

    #[test]
    fn branching_is_lowest_var_true_first() {
        let outcome = solve_str("p cnf 2 2\n1 2 0\n-1 -2 0\n");
        match outcome {
            Satisfiability::Sat(a) => {
                assert_eq!(a.value_of(1), LiteralValue::True);
                assert_eq!(a.value_of(2), LiteralValue::False);
            }
            _ => panic!("expected SAT"),
        }
    }

    #[test]
    fn pigeonhole_php_3_2_is_unsat() {
        // 3 pigeons (rows), 2 holes (columns). var(p, h) = p*2 + h + 1.
        let var = |p: usize, h: usize| p * 2 + h + 1;
        let mut clauses = Vec::new();
        for p in 0..3 {
            clauses.push(format!("{} {} 0", var(p, 0), var(p, 1)));
        }
        for h in 0..2 {
            for p1 in 0..3 {
                for p2 in (p1 + 1)..3 {
                    clauses.push(format!("-{} -{} 0", var(p1, h), var(p2, h)));
                }
            }
        }
        let text = format!("p cnf 6 {}\n{}\n", clauses.len(), clauses.join("\n"));
        assert!(matches!(solve_str(&text), Satisfiability::Unsat));
    }

    #[test]
    fn empty_formula_is_sat_with_defaults() {
        let outcome = solve_str("p cnf 3 0\n");
        match outcome {
            Satisfiability::Sat(a) => {
                assert!(a.is_complete());
                assert_eq!(a.value_of(1), LiteralValue::False);
            }
            _ => panic!("expected SAT"),
        }
    }

    #[test]
    fn formula_with_empty_clause_is_unsat() {
        let outcome = solve_str("p cnf 1 1\n0\n");
        assert!(matches!(outcome, Satisfiability::Unsat));
    }

    #[test]
    fn every_clause_is_satisfied_by_a_sat_result() {
        let formula = parse_cnf_str("p cnf 4 3\n1 2 0\n-2 3 0\n-3 -4 0\n").unwrap();
        if let Satisfiability::Sat(a) = solve(&formula, &SolveConfig::default()) {
            assert!(formula.is_satisfied(&a));
        } else {
            panic!("expected SAT");
        }
    }

    #[test]
    fn timeout_is_reported_for_zero_budget() {
        let formula = parse_cnf_str("p cnf 20 1\n1 2 3 4 5 6 7 8 9 10 11 12 13 14 15 16 17 18 19 20 0\n")
            .unwrap();
        let config = SolveConfig {
            timeout: Duration::from_nanos(0),
        };
        assert!(matches!(solve(&formula, &config), Satisfiability::Timeout));
    }
}
