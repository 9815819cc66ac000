use crate::formula::{Universe, Variable};
use std::fmt::{self, Display, Formatter};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Value {
    True,
    False,
    Unknown,
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::True => Some(true),
            Value::False => Some(false),
            Value::Unknown => None,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        if b {
            Value::True
        } else {
            Value::False
        }
    }
}

/// The shared tri-state buffer the search threads through every clause. Its length is fixed at
/// construction and always equals the size of the variable universe.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct Assignment {
    values: Vec<Value>,
}

impl Assignment {
    pub fn unknown(num_variables: usize) -> Self {
        Self {
            values: vec![Value::Unknown; num_variables],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `None` if the variable lies outside the universe.
    pub fn get(&self, v: Variable) -> Option<Value> {
        self.values.get(v.0).copied()
    }

    pub fn set(&mut self, v: Variable, value: Value) {
        self.values[v.0] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.values.iter()
    }

    /// A copy of this assignment with `variables` overwritten pairwise from `combination`.
    /// Every other slot keeps its current value.
    pub fn with_combination(&self, variables: &[Variable], combination: &[bool]) -> Assignment {
        debug_assert_eq!(variables.len(), combination.len());
        let mut candidate = self.clone();
        for (v, b) in variables.iter().zip(combination) {
            candidate.set(*v, Value::from(*b));
        }
        candidate
    }

    pub fn to_options(&self) -> Vec<Option<bool>> {
        self.values.iter().map(|v| v.as_bool()).collect()
    }

    /// Render as a DIMACS `v` line using the universe's identifiers. Unknown variables are left out.
    pub fn dimacs_model(&self, universe: &Universe) -> String {
        let mut line = String::from("v");
        for (idx, value) in self.values.iter().enumerate() {
            let id = match universe.identifier(Variable(idx)) {
                Some(id) => id,
                None => continue,
            };
            match value {
                Value::True => line.push_str(&format!(" {}", id)),
                Value::False => line.push_str(&format!(" -{}", id)),
                Value::Unknown => {}
            }
        }
        line.push_str(" 0");
        line
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        f.write_str("[")?;
        for (idx, value) in self.values.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            match value {
                Value::True => f.write_str("T")?,
                Value::False => f.write_str("F")?,
                Value::Unknown => f.write_str("?")?,
            }
        }
        f.write_str("]")
    }
}
