use crate::assignment::{Assignment, Value};
use crate::formula::{Formula, Variable};
use crate::search::combinations::Combinations;
use log::trace;

/// Walk the clauses in order and give every still-unknown variable of a clause the value it takes
/// in the first combination that satisfies the prefix ending at that clause. Variables that are
/// already set are left alone, as are variables no clause mentions. Returns how many were filled.
pub fn fill_unknowns(formula: &Formula, clause_vars: &[Vec<Variable>], assignment: &mut Assignment) -> usize {
    let mut filled = 0;
    for (clause, vars) in clause_vars.iter().enumerate() {
        for combination in Combinations::new(vars.len()) {
            let candidate = assignment.with_combination(vars, &combination);
            if !formula.prefix_satisfied_by(clause, &candidate) {
                continue;
            }
            for v in vars {
                if assignment.get(*v) != Some(Value::Unknown) {
                    continue;
                }
                if let Some(value) = candidate.get(*v) {
                    trace!("reconstruct: clause {} fills x{} = {:?}", clause, v.0 + 1, value);
                    assignment.set(*v, value);
                    filled += 1;
                }
            }
            break;
        }
    }
    filled
}
