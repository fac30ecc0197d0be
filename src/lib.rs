//! Memetic genetic algorithm for Boolean satisfiability.
//!
//! Searches for a truth assignment satisfying every clause of a CNF formula
//! by evolving a population of assignments, optionally refining offspring
//! with a local search:
//!
//! - **Model**: clauses, instances, candidate assignments and pure-literal
//!   simplification.
//! - **DIMACS**: reader for the standard CNF text format.
//! - **Fitness**: clause counting, weighted, amplified, penalty, conflict,
//!   dynamic-weight, multi-objective and adaptive scoring.
//! - **Genetic Algorithm (GA)**: pluggable selection, crossover, mutation and
//!   population seeding, stagnation restarts, cooperative cancellation and a
//!   multi-worker race.
//! - **Local Search**: hill climbing, tabu search, simulated annealing, VNS,
//!   guided and iterated local search, and clause repair.
//! - **Settings**: flat string-keyed configuration resolved into typed
//!   strategy values.
//!
//! # Architecture
//!
//! Each strategy family is a closed enum: a serializable `*Kind` value in
//! the configuration, built into fresh operator state per run. Every run
//! owns its RNG, population and stateful operators; only the instance and
//! the cancellation flag are shared between parallel workers.

pub mod dimacs;
pub mod error;
pub mod fitness;
pub mod ga;
pub mod local_search;
pub mod model;
pub mod random;
pub mod settings;

pub use error::{Result, SatGaError};
