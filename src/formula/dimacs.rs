use crate::formula::{Clause, Formula, Literal, Universe};
use std::fmt::{self, Display, Formatter};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// A parsed DIMACS instance: the clauses plus the dense universe declared by its `p` line.
#[derive(Clone, Debug)]
pub struct Problem {
    pub formula: Formula,
    pub universe: Universe,
}

pub fn parse<R: Read>(reader: R) -> Result<Problem, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut clauses = vec![];
    let mut header = None;

    for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | Some(&"%") | None => continue,
            Some(&"p") => {
                let _ = line.next();

                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_variables = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                let num_clauses = line
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?;

                header = Some((num_variables, num_clauses));
            }
            Some(_) => {
                let num_clauses = match header {
                    Some((_, num_clauses)) => num_clauses,
                    None => return Err(DimacsParseError::Format("missing 'p' line before clauses".into())),
                };

                let mut clause = vec![];
                for x in line {
                    match parse_literal(x)? {
                        Some(l) => clause.push(l),
                        None => break,
                    }
                }
                if !clause.is_empty() {
                    clauses.push(Clause::new(clause));
                }

                if clauses.len() >= num_clauses {
                    break;
                }
            }
        }
    }

    let (num_variables, _) =
        header.ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;

    log::debug!("parsed {} clauses over {} variables", clauses.len(), num_variables);

    Ok(Problem {
        formula: Formula::new(clauses),
        universe: Universe::dense(num_variables),
    })
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Problem, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<Option<Literal>, DimacsParseError> {
    let l = s
        .parse::<i64>()
        .map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))?;
    Ok(Literal::from_dimacs(l))
}

#[derive(Debug)]
pub enum DimacsParseError {
    Io(std::io::Error),
    Format(String),
}

impl From<std::io::Error> for DimacsParseError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl Display for DimacsParseError {
    fn fmt(&self, f: &mut Formatter) -> Result<(), fmt::Error> {
        match self {
            DimacsParseError::Io(e) => write!(f, "i/o error: {}", e),
            DimacsParseError::Format(msg) => write!(f, "format error: {}", msg),
        }
    }
}

impl std::error::Error for DimacsParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DimacsParseError::Io(e) => Some(e),
            DimacsParseError::Format(_) => None,
        }
    }
}
