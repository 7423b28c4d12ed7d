//! CNF data model: literals, clauses, formulas and partial assignments.
//!
//! Variables are identified by a 1-based [`VarId`]; a [`Literal`] is a
//! signed, nonzero `i32` whose magnitude names the variable and whose
//! sign names the polarity, matching the DIMACS convention used by
//! [`crate::dimacs`].

use std::fmt;

/// A 1-based variable identifier.
pub type VarId = u32;

/// A signed, nonzero literal. Magnitude is the variable id, sign is polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal(i32);

impl Literal {
    /// Builds a literal from a nonzero DIMACS-style integer.
    ///
    /// Panics if `raw` is zero — zero is the DIMACS clause terminator,
    /// never a literal, and a caller that reaches here with one has
    /// already violated the parser's contract.
    pub fn new(raw: i32) -> Literal {
        debug_assert_ne!(raw, 0, "0 is not a valid literal");
        Literal(raw)
    }

    pub fn var(self) -> VarId {
        self.0.unsigned_abs()
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn negate(self) -> Literal {
        Literal(-self.0)
    }

    pub fn raw(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Three-valued state of a single variable under a partial assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralValue {
    True,
    False,
    Unassigned,
}

impl LiteralValue {
    pub fn negate(self) -> LiteralValue {
        match self {
            LiteralValue::True => LiteralValue::False,
            LiteralValue::False => LiteralValue::True,
            LiteralValue::Unassigned => LiteralValue::Unassigned,
        }
    }

    pub fn from_bool(b: bool) -> LiteralValue {
        if b {
            LiteralValue::True
        } else {
            LiteralValue::False
        }
    }
}

/// A disjunction of literals, in the order they were added.
#[derive(Debug, Clone)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new() -> Clause {
        Clause {
            literals: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Clause {
        Clause {
            literals: Vec::with_capacity(capacity),
        }
    }

    pub fn add_literal(mut self, literal: Literal) -> Self {
        self.literals.push(literal);
        self
    }

    pub fn push(&mut self, literal: Literal) {
        self.literals.push(literal);
    }

    pub fn literals(&self) -> &[Literal] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True if some literal in the clause is satisfied by `assignment`.
    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .any(|&l| assignment.satisfies(l))
    }

    /// True if every literal in the clause is falsified by `assignment`
    /// (no unassigned literal remains to rescue it).
    pub fn is_conflicting(&self, assignment: &Assignment) -> bool {
        self.literals
            .iter()
            .all(|&l| assignment.falsifies(l))
    }

    /// If exactly one literal is unassigned and the rest are falsified,
    /// returns that unit literal.
    pub fn unit_literal(&self, assignment: &Assignment) -> Option<Literal> {
        let mut unit = None;
        for &l in &self.literals {
            match assignment.value_of_literal(l) {
                LiteralValue::True => return None,
                LiteralValue::Unassigned => {
                    if unit.is_some() {
                        return None;
                    }
                    unit = Some(l);
                }
                LiteralValue::False => {}
            }
        }
        unit
    }
}

impl Default for Clause {
    fn default() -> Self {
        Clause::new()
    }
}

impl FromIterator<Literal> for Clause {
    fn from_iter<T: IntoIterator<Item = Literal>>(iter: T) -> Self {
        Clause {
            literals: iter.into_iter().collect(),
        }
    }
}

/// A conjunction of clauses over `num_vars` variables.
///
/// Immutable once built: the solver never rewrites a [`Formula`], it
/// only reads it against an evolving [`Assignment`].
#[derive(Debug, Clone)]
pub struct Formula {
    num_vars: u32,
    clauses: Vec<Clause>,
}

/// Clause-length histogram and summary counts, per `percent_sudoku_cnf.c`'s
/// `print_cnf_statistics`.
#[derive(Debug, Clone, Default)]
pub struct FormulaStats {
    pub num_vars: u32,
    pub num_clauses: usize,
    pub length_histogram: Vec<(usize, usize)>,
}

impl Formula {
    pub fn new(num_vars: u32) -> Formula {
        Formula {
            num_vars,
            clauses: Vec::new(),
        }
    }

    pub fn with_capacity(num_vars: u32, clause_capacity: usize) -> Formula {
        Formula {
            num_vars,
            clauses: Vec::with_capacity(clause_capacity),
        }
    }

    pub fn add_clause(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn num_vars(&self) -> u32 {
        self.num_vars
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_satisfied(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(assignment))
    }

    pub fn has_conflict(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().any(|c| c.is_conflicting(assignment))
    }

    pub fn stats(&self) -> FormulaStats {
        let mut histogram: Vec<(usize, usize)> = Vec::new();
        for clause in &self.clauses {
            let len = clause.len();
            match histogram.iter_mut().find(|(l, _)| *l == len) {
                Some((_, count)) => *count += 1,
                None => histogram.push((len, 1)),
            }
        }
        histogram.sort_by_key(|(len, _)| *len);
        FormulaStats {
            num_vars: self.num_vars,
            num_clauses: self.clauses.len(),
            length_histogram: histogram,
        }
    }
}

/// A dense mapping from variable id to [`LiteralValue`], 0-indexed by
/// `var - 1`. Owned by the solve call that created it.
#[derive(Debug, Clone)]
pub struct Assignment {
    values: Vec<LiteralValue>,
}

impl Assignment {
    pub fn new(num_vars: u32) -> Assignment {
        Assignment {
            values: vec![LiteralValue::Unassigned; num_vars as usize],
        }
    }

    pub fn num_vars(&self) -> u32 {
        self.values.len() as u32
    }

    pub fn value_of(&self, var: VarId) -> LiteralValue {
        self.values[(var - 1) as usize]
    }

    pub fn set(&mut self, var: VarId, value: LiteralValue) {
        self.values[(var - 1) as usize] = value;
    }

    pub fn value_of_literal(&self, literal: Literal) -> LiteralValue {
        let value = self.value_of(literal.var());
        if literal.is_positive() {
            value
        } else {
            value.negate()
        }
    }

    pub fn satisfies(&self, literal: Literal) -> bool {
        self.value_of_literal(literal) == LiteralValue::True
    }

    pub fn falsifies(&self, literal: Literal) -> bool {
        self.value_of_literal(literal) == LiteralValue::False
    }

    pub fn is_complete(&self) -> bool {
        self.values.iter().all(|v| *v != LiteralValue::Unassigned)
    }

    /// Assigns every still-unassigned variable to `FALSE`, per §4.2's
    /// "implementations should default them to FALSE when producing
    /// external output".
    pub fn default_unassigned_to_false(&mut self) {
        for v in self.values.iter_mut() {
            if *v == LiteralValue::Unassigned {
                *v = LiteralValue::False;
            }
        }
    }

    /// Renders the assignment as a DIMACS-style literal vector: `+i` if
    /// true, `-i` if false (unassigned variables appear negated, per §6.3).
    pub fn to_literals(&self) -> Vec<i32> {
        self.values
            .iter()
            .enumerate()
            .map(|(idx, v)| {
                let var = idx as i32 + 1;
                match v {
                    LiteralValue::True => var,
                    LiteralValue::False | LiteralValue::Unassigned => -var,
                }
            })
            .collect()
    }
}
