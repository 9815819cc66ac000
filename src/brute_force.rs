use crate::*;

// Exhaustive oracle for the tests: tries every total assignment over the universe.
#[cfg(test)]
pub(crate) fn solve_brute_force(f: &Formula, num_variables: usize) -> Option<Assignment> {
    assert!(num_variables <= 15); // just for safety

    fn assignment_for(bits: u32, num_variables: usize) -> Assignment {
        let mut assignment = Assignment::unknown(num_variables);
        for x in 0..num_variables {
            assignment.set(Variable(x), Value::from(bits & (1 << x) != 0));
        }
        assignment
    }

    'search: for bits in 0..2u32.pow(num_variables as u32) {
        let assignment = assignment_for(bits, num_variables);
        for clause in f.clauses() {
            if !clause.is_satisfied_by(&assignment) {
                // this assignment is bogus
                continue 'search;
            }
        }
        // every clause was satisfied
        return Some(assignment);
    }
    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{n, p};

    #[test]
    fn finds_model_forced_by_unit() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let f = Formula::new(vec![c1, c2]);

        let model = solve_brute_force(&f, 2).expect("satisfiable");
        assert!(f.is_satisfied_by(&model));
    }

    #[test]
    fn no_model_when_units_contradict() {
        let c1 = Clause::new(vec![p(0), p(1)]);
        let c2 = Clause::new(vec![n(0)]);
        let c3 = Clause::new(vec![n(1)]);
        let f = Formula::new(vec![c1, c2, c3]);

        assert!(solve_brute_force(&f, 2).is_none());
    }

    #[test]
    fn inert_only_clause() {
        let f = Formula::new(vec![Clause::new(vec![p(3)]), Clause::new(vec![n(0)])]);
        assert!(solve_brute_force(&f, 1).is_some());
    }

    #[test]
    fn empty_formula() {
        let model = solve_brute_force(&Formula::new(vec![]), 0).expect("satisfiable");
        assert!(model.is_empty());
    }
}
