pub mod dimacs;

use crate::assignment::Assignment;
use std::fmt::Debug;
use std::fmt::{self, Display, Formatter};

/// Zero-based index into the variable universe.
#[derive(Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, Debug)]
pub struct Variable(pub usize);

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Literal {
    Positive(Variable),
    Negative(Variable),
}

impl Literal {
    /// Signed integer form: magnitude minus one is the variable index, the sign is the polarity.
    /// `0` has no meaning under that convention and yields `None`.
    pub fn from_dimacs(l: i64) -> Option<Self> {
        if l == 0 {
            return None;
        }
        let var = Variable((l.unsigned_abs() - 1) as usize);
        if l > 0 {
            Some(Literal::Positive(var))
        } else {
            Some(Literal::Negative(var))
        }
    }

    pub fn variable(&self) -> &Variable {
        match self {
            Literal::Positive(v) => v,
            Literal::Negative(v) => v,
        }
    }

    pub fn is_positive(&self) -> bool {
        match self {
            Literal::Positive(_) => true,
            Literal::Negative(_) => false,
        }
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            Literal::Positive(Variable(x)) => write!(f, "{}", x + 1),
            Literal::Negative(Variable(x)) => write!(f, "-{}", x + 1),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Clause {
    literals: Vec<Literal>,
}

impl Clause {
    pub fn new(disjuncts: impl IntoIterator<Item = Literal>) -> Self {
        Self {
            literals: disjuncts.into_iter().collect(),
        }
    }

    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.literals.iter()
    }

    /// Sorted, deduplicated variables of this clause that fall inside a universe of
    /// `num_variables`. Inert literals contribute nothing.
    pub fn variables(&self, num_variables: usize) -> Vec<Variable> {
        let mut vars = self
            .literals
            .iter()
            .map(|l| *l.variable())
            .filter(|v| v.0 < num_variables)
            .collect::<Vec<_>>();
        vars.sort();
        vars.dedup();
        vars
    }

    /// A literal holds only when its variable is in range and carries a defined value equal to
    /// the literal's polarity. An empty clause never holds; a non-empty clause whose literals are
    /// all inert constrains nothing and holds.
    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        if self.literals.is_empty() {
            return false;
        }
        let mut constrained = false;
        for literal in &self.literals {
            let value = match assignment.get(*literal.variable()) {
                Some(value) => value,
                // inert
                None => continue,
            };
            constrained = true;
            if value.as_bool() == Some(literal.is_positive()) {
                return true;
            }
        }
        !constrained
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("(")?;
        for (i, literal) in self.literals.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", literal)?;
        }
        f.write_str(")")
    }
}

#[derive(Debug)]
pub enum FormulaError {
    /// A zero literal at `position` within clause `clause`.
    InvalidLiteral { clause: usize, position: usize },
}

impl Display for FormulaError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            FormulaError::InvalidLiteral { clause, position } => {
                write!(f, "invalid literal 0 in clause {} at position {}", clause, position)
            }
        }
    }
}

impl std::error::Error for FormulaError {}

#[derive(Clone)]
pub struct Formula {
    clauses: Vec<Clause>,
}

impl Formula {
    pub fn new(conjuncts: impl IntoIterator<Item = Clause>) -> Self {
        Self {
            clauses: conjuncts.into_iter().collect(),
        }
    }

    pub fn from_literals(clauses: &[Vec<i64>]) -> Result<Self, FormulaError> {
        let mut conjuncts = Vec::with_capacity(clauses.len());
        for (clause, literals) in clauses.iter().enumerate() {
            let mut disjuncts = Vec::with_capacity(literals.len());
            for (position, l) in literals.iter().enumerate() {
                let literal =
                    Literal::from_dimacs(*l).ok_or(FormulaError::InvalidLiteral { clause, position })?;
                disjuncts.push(literal);
            }
            conjuncts.push(Clause::new(disjuncts));
        }
        Ok(Self::new(conjuncts))
    }

    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }

    pub fn clause(&self, idx: usize) -> &Clause {
        &self.clauses[idx]
    }

    pub fn clauses(&self) -> impl Iterator<Item = &Clause> {
        self.clauses.iter()
    }

    /// Does `assignment` satisfy every clause with index `<= last`?
    pub fn prefix_satisfied_by(&self, last: usize, assignment: &Assignment) -> bool {
        self.clauses[..=last].iter().all(|c| c.is_satisfied_by(assignment))
    }

    pub fn is_satisfied_by(&self, assignment: &Assignment) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied_by(assignment))
    }
}

impl Debug for Formula {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        let mut first_clause = true;
        for clause in &self.clauses {
            if first_clause {
                first_clause = false;
            } else {
                f.write_str(" & ")?;
            }
            if clause.literals.len() > 1 {
                f.write_str("(")?;
            }
            let mut first_literal = true;
            for literal in &clause.literals {
                if first_literal {
                    first_literal = false;
                } else {
                    f.write_str(" | ")?;
                }
                match literal {
                    Literal::Positive(Variable(x)) => f.write_fmt(format_args!("{}", x + 1))?,
                    Literal::Negative(Variable(x)) => f.write_fmt(format_args!("!{}", x + 1))?,
                }
            }
            if clause.literals.len() > 1 {
                f.write_str(")")?;
            }
        }
        Ok(())
    }
}

/// The ordered external identifiers of the tracked variables. Position in this list is the
/// variable's index; the identifiers themselves are only labels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Universe {
    identifiers: Vec<i64>,
}

impl Universe {
    pub fn new(identifiers: impl IntoIterator<Item = i64>) -> Self {
        Self {
            identifiers: identifiers.into_iter().collect(),
        }
    }

    /// `1..=n`, the universe implied by a DIMACS header.
    pub fn dense(num_variables: usize) -> Self {
        Self::new((1..=num_variables as i64).collect::<Vec<_>>())
    }

    pub fn len(&self) -> usize {
        self.identifiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    pub fn identifier(&self, v: Variable) -> Option<i64> {
        self.identifiers.get(v.0).copied()
    }
}

#[cfg(test)]
pub(crate) fn p(x: usize) -> Literal {
    Literal::Positive(Variable(x))
}

#[cfg(test)]
pub(crate) fn n(x: usize) -> Literal {
    Literal::Negative(Variable(x))
}

/// Small random CNF instances over a dense universe. Literal magnitudes may exceed the universe
/// by one so that inert literals show up too.
#[cfg(test)]
pub(crate) fn cnf_strategy() -> impl proptest::strategy::Strategy<Value = (Formula, Universe)> {
    use proptest::prelude::*;

    (1usize..=6)
        .prop_flat_map(|num_vars| {
            let literal = (1..=num_vars as i64 + 1, any::<bool>()).prop_map(|(m, pos)| if pos { m } else { -m });
            let clause = prop::collection::vec(literal, 1..=3);
            (prop::collection::vec(clause, 0..=8), Just(num_vars))
        })
        .prop_map(|(clauses, num_vars)| {
            let f = Formula::from_literals(&clauses).expect("strategy never produces 0");
            (f, Universe::dense(num_vars))
        })
}
