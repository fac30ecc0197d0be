//! Memetic Genetic Algorithm for SAT.
//!
//! Candidates are truth assignments over one shared [`Instance`](crate::model::Instance).
//! Every operator family is a closed enum: a config value ([`Selection`],
//! [`CrossoverKind`], [`MutationKind`], [`GeneratorKind`], plus
//! [`FitnessKind`](crate::fitness::FitnessKind) and
//! [`LocalSearchKind`](crate::local_search::LocalSearchKind)) that the engine
//! builds into fresh, run-owned operator state.
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters and one strategy per family
//! - [`GaRunner`]: Executes the evolutionary loop with stagnation restarts
//! - [`ParallelRunner`]: Races independently seeded engines on a rayon pool
//! - [`GaResult`] / [`SearchOutcome`]: Satisfied, exhausted or cancelled
//! - [`ProgressObserver`]: Structured per-generation and final reporting
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Marchiori & Rossi (1999), "A Flipping Genetic Algorithm for Hard 3-SAT Problems"
//! - Gottlieb, Marchiori & Rossi (2002), "Evolutionary Algorithms for the Satisfiability Problem"

mod config;
mod crossover;
mod mutation;
mod parallel;
mod population;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use crossover::{
    clause_biased_crossover, n_point_crossover, uniform_crossover, Crossover, CrossoverKind,
};
pub use mutation::MutationKind;
pub use parallel::ParallelRunner;
pub use population::{
    ClauseProbabilityGenerator, DiversityGenerator, GeneratorKind, PopulationGenerator,
    PopulationSource, RandomGenerator,
};
pub use runner::GaRunner;
pub use selection::Selection;
pub use types::{
    FinalReport, GaResult, GenerationProgress, NoopObserver, ProgressObserver, SearchOutcome,
};
