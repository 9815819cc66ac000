use crate::formula::{Formula, Variable};
use std::collections::BTreeSet;

/// The variables referenced by each clause prefix `0..=k`, sorted and deduplicated. Computed once
/// per formula; only in-range variables are counted.
#[derive(Clone, Debug)]
pub struct ActiveVars {
    prefixes: Vec<Vec<Variable>>,
}

impl ActiveVars {
    pub fn new(formula: &Formula, num_variables: usize) -> Self {
        let mut seen = BTreeSet::new();
        let prefixes: Vec<Vec<Variable>> = formula
            .clauses()
            .map(|clause| {
                seen.extend(clause.variables(num_variables));
                seen.iter().copied().collect::<Vec<_>>()
            })
            .collect();
        Self { prefixes }
    }

    pub fn at(&self, clause: usize) -> &[Variable] {
        &self.prefixes[clause]
    }
}

/// Direct recomputation over the prefix, without the table.
#[cfg(test)]
pub(crate) fn active_vars(formula: &Formula, num_variables: usize, last: usize) -> Vec<Variable> {
    let mut vars = formula
        .clauses()
        .take(last + 1)
        .flat_map(|c| c.variables(num_variables))
        .collect::<Vec<_>>();
    vars.sort();
    vars.dedup();
    vars
}
