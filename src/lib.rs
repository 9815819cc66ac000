mod assignment;
pub mod formula;
pub mod search;

#[cfg(test)]
mod brute_force;

pub use assignment::{Assignment, Value};
pub use formula::{Clause, Formula, FormulaError, Literal, Universe, Variable};
pub use search::{search, Engine, SearchOpts, SearchOutcome, SearchStats};
