use crate::assignment::Assignment;
use crate::formula::Variable;
use std::collections::HashMap;

/// Outcomes are keyed by clause index and the active variables of that clause's prefix. The
/// values held by those variables are *not* part of the key unless `snapshot` is set, so two
/// visits that differ only in the assignment share an entry.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemoKey {
    pub clause: usize,
    pub active: Vec<Variable>,
    pub snapshot: Option<Assignment>,
}

/// Append-only for the lifetime of one search.
#[derive(Default, Debug)]
pub struct MemoTable {
    entries: HashMap<MemoKey, bool>,
}

impl MemoTable {
    pub fn get(&self, key: &MemoKey) -> Option<bool> {
        self.entries.get(key).copied()
    }

    /// The first outcome written for a key stays.
    pub fn record(&mut self, key: MemoKey, outcome: bool) {
        debug_assert!(!self.entries.contains_key(&key), "memo entry written twice: {:?}", key);
        self.entries.entry(key).or_insert(outcome);
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
