//! Memoized clause-by-clause search.
//!
//! Clauses are visited strictly in order. At each clause the engine tries the truth combinations
//! of that clause's variables, on top of the shared assignment, until one satisfies every clause
//! seen so far; that candidate replaces the shared assignment and the engine moves on to the next
//! clause. A failed descent is not rolled back, so the next sibling combination starts from
//! whatever the deeper levels left behind. Every outcome is cached under
//! `(clause, active variables)`, which does not include the assignment itself: a later visit with
//! different values reuses the earlier verdict. `SearchOpts::strict_memo` adds the assignment to
//! the key.
//!
//! This is not a complete decision procedure. A satisfiable verdict always comes with a model of
//! the formula, but an unsatisfiable verdict can be wrong.

pub mod active;
pub mod combinations;
pub mod memo;
pub mod reconstruct;

use crate::assignment::Assignment;
use crate::formula::{Formula, FormulaError, Universe, Variable};
use active::ActiveVars;
use combinations::Combinations;
use log::{debug, trace};
use memo::{MemoKey, MemoTable};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOpts {
    /// Also key memo entries on the full assignment at clause entry.
    pub strict_memo: bool,
    /// Give up after this many combination trials.
    pub step_limit: Option<u64>,
}

impl Default for SearchOpts {
    fn default() -> Self {
        Self {
            strict_memo: false,
            step_limit: None,
        }
    }
}

impl SearchOpts {
    pub fn check(&self) -> bool {
        self.step_limit != Some(0)
    }
}

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SearchOutcome {
    Satisfiable(Assignment),
    Unsatisfiable,
    /// The step limit ran out before a verdict.
    Aborted { steps: u64 },
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SearchStats {
    pub trials: u64,
    pub memo_hits: u64,
    pub memo_entries: usize,
}

#[derive(Debug)]
struct Aborted;

/// One clause whose combinations are still being tried.
#[derive(Debug)]
struct Frame {
    clause: usize,
    key: MemoKey,
    combinations: Combinations,
}

enum Step {
    Enter(usize),
    Return(bool),
    Advance,
}

pub struct Engine<'f> {
    formula: &'f Formula,
    num_variables: usize,
    opts: SearchOpts,
    active: ActiveVars,
    clause_vars: Vec<Vec<Variable>>,
    assignment: Assignment,
    memo: MemoTable,
    stats: SearchStats,
}

impl<'f> Engine<'f> {
    pub fn new(formula: &'f Formula, num_variables: usize, opts: SearchOpts) -> Self {
        Self {
            formula,
            num_variables,
            opts,
            active: ActiveVars::new(formula, num_variables),
            clause_vars: formula.clauses().map(|c| c.variables(num_variables)).collect(),
            assignment: Assignment::unknown(num_variables),
            memo: MemoTable::default(),
            stats: SearchStats::default(),
        }
    }

    /// Each run starts from an all-unknown assignment and an empty memo table.
    pub fn run(&mut self) -> SearchOutcome {
        self.assignment = Assignment::unknown(self.num_variables);
        self.memo = MemoTable::default();
        self.stats = SearchStats::default();

        let outcome = match self.solve() {
            Ok(true) => {
                let filled = reconstruct::fill_unknowns(self.formula, &self.clause_vars, &mut self.assignment);
                trace!("reconstruction filled {} variables", filled);
                SearchOutcome::Satisfiable(self.assignment.clone())
            }
            Ok(false) => SearchOutcome::Unsatisfiable,
            Err(Aborted) => SearchOutcome::Aborted {
                steps: self.stats.trials,
            },
        };
        self.stats.memo_entries = self.memo.len();

        debug!(
            "search finished: {:?} after {} trials, {} memo hits, {} memo entries",
            outcome, self.stats.trials, self.stats.memo_hits, self.stats.memo_entries
        );
        outcome
    }

    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    fn key(&self, clause: usize) -> MemoKey {
        MemoKey {
            clause,
            active: self.active.at(clause).to_vec(),
            snapshot: if self.opts.strict_memo {
                Some(self.assignment.clone())
            } else {
                None
            },
        }
    }

    // The recursion over clauses, with an explicit stack of frames so depth is bounded only by
    // memory.
    fn solve(&mut self) -> Result<bool, Aborted> {
        let num_clauses = self.formula.num_clauses();
        let mut stack: Vec<Frame> = vec![];
        let mut step = Step::Enter(0);

        loop {
            step = match step {
                Step::Enter(clause) if clause == num_clauses => Step::Return(true),
                Step::Enter(clause) => {
                    let key = self.key(clause);
                    match self.memo.get(&key) {
                        Some(outcome) => {
                            self.stats.memo_hits += 1;
                            trace!("clause {}: memo hit, outcome {}", clause, outcome);
                            Step::Return(outcome)
                        }
                        None => {
                            trace!(
                                "clause {} {}: enter with {}",
                                clause,
                                self.formula.clause(clause),
                                self.assignment
                            );
                            stack.push(Frame {
                                clause,
                                key,
                                combinations: Combinations::new(self.clause_vars[clause].len()),
                            });
                            Step::Advance
                        }
                    }
                }
                Step::Return(outcome) => {
                    if stack.is_empty() {
                        return Ok(outcome);
                    }
                    if outcome {
                        if let Some(frame) = stack.pop() {
                            self.memo.record(frame.key, true);
                        }
                        Step::Return(true)
                    } else {
                        Step::Advance
                    }
                }
                Step::Advance => {
                    let frame = match stack.last_mut() {
                        Some(frame) => frame,
                        None => return Ok(false),
                    };
                    let vars = &self.clause_vars[frame.clause];

                    let mut committed = false;
                    while let Some(combination) = frame.combinations.next() {
                        if let Some(limit) = self.opts.step_limit {
                            if self.stats.trials >= limit {
                                return Err(Aborted);
                            }
                        }
                        self.stats.trials += 1;

                        let candidate = self.assignment.with_combination(vars, &combination);
                        if self.formula.prefix_satisfied_by(frame.clause, &candidate) {
                            self.assignment = candidate;
                            committed = true;
                            break;
                        }
                    }

                    if committed {
                        trace!("clause {}: commit {}", frame.clause, self.assignment);
                        Step::Enter(frame.clause + 1)
                    } else {
                        if let Some(frame) = stack.pop() {
                            trace!("clause {}: exhausted", frame.clause);
                            self.memo.record(frame.key, false);
                        }
                        Step::Return(false)
                    }
                }
            };
        }
    }
}

/// Decide `clauses` over the universe `variables`: `(true, model)` or `(false, None)`. The model is
/// positionally aligned with `variables`. Literals are signed integers whose magnitude minus one
/// indexes into `variables`; a literal past the end is inert. Zero literals are rejected.
pub fn search(clauses: &[Vec<i64>], variables: &[i64]) -> Result<(bool, Option<Assignment>), FormulaError> {
    let formula = Formula::from_literals(clauses)?;
    let universe = Universe::new(variables.iter().copied());

    let mut engine = Engine::new(&formula, universe.len(), SearchOpts::default());
    match engine.run() {
        SearchOutcome::Satisfiable(model) => Ok((true, Some(model))),
        outcome => {
            // without a step limit the run always reaches a verdict
            debug_assert_eq!(outcome, SearchOutcome::Unsatisfiable);
            Ok((false, None))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::Value;
    use crate::brute_force::solve_brute_force;
    use crate::formula::cnf_strategy;
    use proptest::prelude::*;
    use test_env_log::test;

    fn formula(clauses: &[Vec<i64>]) -> Formula {
        Formula::from_literals(clauses).unwrap()
    }

    fn run(f: &Formula, num_variables: usize, opts: SearchOpts) -> (SearchOutcome, SearchStats) {
        let mut engine = Engine::new(f, num_variables, opts);
        let outcome = engine.run();
        (outcome, engine.stats())
    }

    fn strict() -> SearchOpts {
        SearchOpts {
            strict_memo: true,
            ..SearchOpts::default()
        }
    }

    #[test]
    fn unit_conflict() {
        let f = formula(&[vec![1], vec![-1]]);
        let (outcome, stats) = run(&f, 1, SearchOpts::default());
        assert_eq!(outcome, SearchOutcome::Unsatisfiable);
        // [1]: F, T; [-1]: F, T
        assert_eq!(stats.trials, 4);
        assert_eq!(stats.memo_entries, 2);
    }

    #[test]
    fn first_combinations_win() {
        let f = formula(&[vec![1, 2], vec![-1, -2]]);
        match run(&f, 2, SearchOpts::default()).0 {
            SearchOutcome::Satisfiable(model) => {
                assert_eq!(model.to_options(), vec![Some(false), Some(true)]);
            }
            other => panic!("expected a model, got {:?}", other),
        }
    }

    #[test]
    fn exactly_one_of_three() {
        let f = formula(&[vec![1, 2, 3], vec![-1, -2], vec![-2, -3], vec![-1, -3]]);
        match run(&f, 3, SearchOpts::default()).0 {
            SearchOutcome::Satisfiable(model) => {
                assert_eq!(model.to_options(), vec![Some(false), Some(false), Some(true)]);
            }
            other => panic!("expected a model, got {:?}", other),
        }
    }

    // Clause 1 fails under x1 = F, x2 = T and is cached as a failure. The sibling combination
    // x1 = T, x2 = F would succeed, but it reaches clause 1 with the same key.
    #[test]
    fn cached_failure_is_reused_across_siblings() {
        let f = formula(&[vec![1, 2], vec![-2]]);
        assert!(solve_brute_force(&f, 2).is_some());

        let (outcome, stats) = run(&f, 2, SearchOpts::default());
        assert_eq!(outcome, SearchOutcome::Unsatisfiable);
        assert_eq!(stats.memo_hits, 2);

        let (outcome, _) = run(&f, 2, strict());
        match outcome {
            SearchOutcome::Satisfiable(model) => {
                assert_eq!(model.to_options(), vec![Some(true), Some(false)]);
            }
            other => panic!("strict memo should find the model, got {:?}", other),
        }
    }

    #[test]
    fn empty_formula() {
        let f = Formula::new(vec![]);
        let (outcome, stats) = run(&f, 3, SearchOpts::default());
        assert_eq!(outcome, SearchOutcome::Satisfiable(Assignment::unknown(3)));
        assert_eq!(stats.trials, 0);
    }

    #[test]
    fn inert_clause_holds() {
        let f = formula(&[vec![5, -7], vec![-1]]);
        match run(&f, 2, SearchOpts::default()).0 {
            SearchOutcome::Satisfiable(model) => {
                assert_eq!(model.get(Variable(0)), Some(Value::False));
                assert_eq!(model.get(Variable(1)), Some(Value::Unknown));
            }
            other => panic!("expected a model, got {:?}", other),
        }
    }

    #[test]
    fn step_limit_aborts() {
        let f = formula(&[vec![1, 2], vec![-2]]);
        let opts = SearchOpts {
            step_limit: Some(3),
            ..SearchOpts::default()
        };
        assert!(opts.check());
        let (outcome, stats) = run(&f, 2, opts);
        assert_eq!(outcome, SearchOutcome::Aborted { steps: 3 });
        assert_eq!(stats.trials, 3);

        assert!(!SearchOpts {
            step_limit: Some(0),
            ..SearchOpts::default()
        }
        .check());
    }

    #[test]
    fn search_pairs() {
        assert_eq!(search(&[vec![1], vec![-1]], &[1]).unwrap(), (false, None));

        let (sat, model) = search(&[], &[4, 5]).unwrap();
        assert!(sat);
        assert_eq!(model, Some(Assignment::unknown(2)));

        assert!(matches!(
            search(&[vec![0]], &[1]),
            Err(FormulaError::InvalidLiteral { clause: 0, position: 0 })
        ));
    }

    #[test]
    fn deep_formula_does_not_overflow() {
        let clauses = (1..=3_000).map(|i| vec![i]).collect::<Vec<_>>();
        let variables = (1..=3_000).collect::<Vec<_>>();
        let (sat, model) = search(&clauses, &variables).unwrap();
        assert!(sat);
        assert!(model.unwrap().iter().all(|v| *v == Value::True));
    }

    proptest! {
        #[test]
        fn models_are_models((f, universe) in cnf_strategy()) {
            for opts in vec![SearchOpts::default(), strict()] {
                if let SearchOutcome::Satisfiable(model) = run(&f, universe.len(), opts).0 {
                    prop_assert_eq!(model.len(), universe.len());
                    prop_assert!(f.is_satisfied_by(&model));
                }
            }
        }

        #[test]
        fn never_sat_without_a_model((f, universe) in cnf_strategy()) {
            if solve_brute_force(&f, universe.len()).is_none() {
                prop_assert_eq!(run(&f, universe.len(), SearchOpts::default()).0, SearchOutcome::Unsatisfiable);
                prop_assert_eq!(run(&f, universe.len(), strict()).0, SearchOutcome::Unsatisfiable);
            }
        }

        #[test]
        fn repeated_runs_agree((f, universe) in cnf_strategy()) {
            let mut engine = Engine::new(&f, universe.len(), SearchOpts::default());
            let first = engine.run();
            let first_stats = engine.stats();
            prop_assert_eq!(engine.run(), first);
            prop_assert_eq!(engine.stats(), first_stats);
        }
    }
}
