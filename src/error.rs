//! Crate-wide error type.
//!
//! Configuration problems surface here before any search state exists.
//! Cancellation and budget exhaustion are not errors: they are reported
//! through [`SearchOutcome`](crate::ga::SearchOutcome).

use thiserror::Error;

use crate::dimacs::DimacsError;

#[derive(Error, Debug)]
pub enum SatGaError {
    #[error("unknown {family} strategy: {name}")]
    UnknownStrategy { family: &'static str, name: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("local-search crossover requires a configured local search")]
    MissingLocalSearch,
    #[error("failed to read instance")]
    Dimacs(#[from] DimacsError),
    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, SatGaError>;
