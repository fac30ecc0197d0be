//! DIMACS CNF reader.
//!
//! Produces an [`Instance`] from text before any search state exists, so
//! the engine never sees a malformed formula. Accepted input:
//!
//! - `c` lines are comments, blank lines are skipped
//! - one `p cnf <variables> <clauses>` header before the first clause
//! - clauses are whitespace-separated literals terminated by `0`, and may
//!   span lines
//! - a line starting with `%` ends the formula (SATLIB benchmark files)

use std::{fs, io, num, path::Path};

use thiserror::Error;

use crate::model::{Clause, Instance};

#[derive(Error, Debug)]
pub enum DimacsError {
    #[error("malformed header")]
    MalformedHeader,
    #[error("invalid line {0}: {1}")]
    InvalidLine(usize, String),
    #[error("expected {expected} clauses but found {found}")]
    ClauseCountMismatch { expected: usize, found: usize },
    #[error("literal {literal} exceeds variable count {variables}")]
    LiteralOutOfRange { literal: i64, variables: usize },
    #[error("io error")]
    Io(#[from] io::Error),
    #[error("not a valid value")]
    ParseInt(#[from] num::ParseIntError),
}

type Result<T> = std::result::Result<T, DimacsError>;

/// Reads a DIMACS file.
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let text = fs::read_to_string(path)?;
    parse_str(&text)
}

/// Parses DIMACS text.
pub fn parse_str(text: &str) -> Result<Instance> {
    let mut header: Option<DimacsHeader> = None;
    let mut clauses: Vec<Clause> = Vec::new();
    let mut current: Vec<i32> = Vec::new();

    for (lineno, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }
        if line.starts_with('%') {
            break;
        }
        if line.starts_with('p') {
            if header.is_some() {
                return Err(DimacsError::InvalidLine(lineno + 1, line.to_string()));
            }
            header = Some(DimacsHeader::parse(line)?);
            continue;
        }

        let variables = match &header {
            Some(h) => h.var_count,
            None => return Err(DimacsError::MalformedHeader),
        };

        for word in line.split_ascii_whitespace() {
            match word.parse::<i64>()? {
                0 => clauses.push(Clause::new(std::mem::take(&mut current))),
                literal => {
                    if literal.unsigned_abs() as usize > variables {
                        return Err(DimacsError::LiteralOutOfRange { literal, variables });
                    }
                    current.push(literal as i32);
                }
            }
        }
    }

    let header = header.ok_or(DimacsError::MalformedHeader)?;

    // A trailing clause without its terminating 0
    if !current.is_empty() {
        clauses.push(Clause::new(current));
    }

    if clauses.len() != header.clause_count {
        return Err(DimacsError::ClauseCountMismatch {
            expected: header.clause_count,
            found: clauses.len(),
        });
    }

    Ok(Instance::new(header.var_count, clauses))
}

#[derive(Debug, Clone)]
struct DimacsHeader {
    var_count: usize,
    clause_count: usize,
}

impl DimacsHeader {
    fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_ascii_whitespace();
        let mut next = || words.next().ok_or(DimacsError::MalformedHeader);

        let p = next()?;
        let cnf = next()?;
        if p != "p" || cnf != "cnf" {
            return Err(DimacsError::MalformedHeader);
        }
        let var_count = next()?.parse::<usize>()?;
        let clause_count = next()?.parse::<usize>()?;
        if var_count > i32::MAX as usize {
            return Err(DimacsError::MalformedHeader);
        }
        Ok(Self {
            var_count,
            clause_count,
        })
    }
}
