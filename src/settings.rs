//! Flat, string-keyed solver settings.
//!
//! [`SolverSettings`] mirrors what a command line or settings file carries:
//! scalar parameters plus one strategy name per operator family. Names are
//! matched case-insensitively and resolved once into a typed [`GaConfig`];
//! nothing past this boundary sees a string key.
//!
//! | Family | Keys |
//! |---|---|
//! | selection | `Tournament`, `Roulette`, `Rank` |
//! | crossover | `Uniform`, `Clause`, `1Point`, `2Point`, `NPoint`, `LocalSearch` |
//! | mutation | `BitFlip`, `Guided`, `1Bit`, `2Bit`, `NBit` |
//! | fitness | `MaxSat`, `Weighted`, `Amplified`, `Penalty`, `VariableConflict`, `DynamicWeight`, `MultiObjective`, `Adaptive` |
//! | local search | `None`, `Tabu`, `HillClimbing`, `SimulatedAnnealing`, `VariableNeighborhood`, `GuidedLocalSearch`, `IteratedLocalSearch`, `ClauseSearch` |
//! | generator | `Random`, `Clause`, `Diversity` |

use std::path::Path;
use std::sync::Arc;

use crate::dimacs;
use crate::error::{Result, SatGaError};
use crate::fitness::FitnessKind;
use crate::ga::{
    CrossoverKind, GaConfig, GaResult, GaRunner, GeneratorKind, MutationKind, ParallelRunner,
    Selection,
};
use crate::local_search::{AnnealingConfig, LocalSearchKind};
use crate::model::Instance;

/// Solver parameters as supplied by a caller.
///
/// # Examples
///
/// ```
/// use sat_ga::settings::SolverSettings;
/// use sat_ga::ga::{MutationKind, Selection};
///
/// let settings = SolverSettings {
///     selection: "rank".into(),
///     mutation: "2bit".into(),
///     ..SolverSettings::default()
/// };
/// let config = settings.resolve().unwrap();
/// assert_eq!(config.selection, Selection::Rank);
/// assert_eq!(config.mutation, MutationKind::NBit(2));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SolverSettings {
    pub population_size: usize,
    pub generations: usize,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub elitism_rate: f64,
    pub seed: Option<u64>,
    pub tournament_size: usize,
    pub tabu_tenure: usize,
    /// Exponent of the `Amplified` fitness.
    pub amplification: f64,
    /// Bits flipped by `NBit` mutation.
    pub mutation_bits: usize,
    /// Cut points of `NPoint` crossover.
    pub crossover_points: usize,
    pub local_search_iterations: usize,
    /// Stagnant generations before a restart; 0 disables restarts.
    pub restart_threshold: usize,
    /// Engines raced in parallel; 1 runs a single engine on the calling thread.
    pub workers: usize,

    pub selection: String,
    pub crossover: String,
    pub mutation: String,
    pub fitness: String,
    pub local_search: String,
    pub generator: String,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            population_size: 100,
            generations: 500,
            mutation_rate: 0.01,
            crossover_rate: 0.9,
            elitism_rate: 0.1,
            seed: None,
            tournament_size: 3,
            tabu_tenure: 5,
            amplification: 2.0,
            mutation_bits: 1,
            crossover_points: 2,
            local_search_iterations: 10,
            restart_threshold: 100,
            workers: 1,
            selection: "Tournament".into(),
            crossover: "Uniform".into(),
            mutation: "BitFlip".into(),
            fitness: "MaxSat".into(),
            local_search: "Tabu".into(),
            generator: "Random".into(),
        }
    }
}

impl SolverSettings {
    /// Resolves the strategy names and validates the result.
    pub fn resolve(&self) -> Result<GaConfig> {
        let config = GaConfig {
            population_size: self.population_size,
            max_generations: self.generations,
            mutation_rate: self.mutation_rate,
            crossover_rate: self.crossover_rate,
            elitism_rate: self.elitism_rate,
            restart_threshold: self.restart_threshold,
            local_search_iterations: self.local_search_iterations,
            seed: self.seed,
            selection: self.selection()?,
            crossover: self.crossover()?,
            mutation: self.mutation()?,
            fitness: self.fitness()?,
            local_search: self.local_search()?,
            generator: self.generator()?,
            ..GaConfig::default()
        };
        if config.crossover == CrossoverKind::LocalSearchHybrid && config.local_search.is_none() {
            return Err(SatGaError::MissingLocalSearch);
        }
        config.validate().map_err(SatGaError::InvalidConfig)?;
        if self.workers == 0 {
            return Err(SatGaError::InvalidConfig("workers must be at least 1".into()));
        }
        Ok(config)
    }

    /// Resolves the settings and runs one engine, or a race of `workers`.
    pub fn run(&self, instance: Arc<Instance>) -> Result<GaResult> {
        let config = self.resolve()?;
        if self.workers > 1 {
            ParallelRunner::run(instance, &config, self.workers)
        } else {
            GaRunner::run(instance, &config)
        }
    }

    /// Reads a DIMACS CNF file and runs on it.
    pub fn run_file<P: AsRef<Path>>(&self, path: P) -> Result<GaResult> {
        let instance = dimacs::parse_file(path)?;
        self.run(Arc::new(instance))
    }

    fn selection(&self) -> Result<Selection> {
        match key(&self.selection).as_str() {
            "tournament" => Ok(Selection::Tournament(self.tournament_size)),
            "roulette" => Ok(Selection::Roulette),
            "rank" => Ok(Selection::Rank),
            _ => Err(unknown("selection", &self.selection)),
        }
    }

    fn crossover(&self) -> Result<CrossoverKind> {
        match key(&self.crossover).as_str() {
            "uniform" => Ok(CrossoverKind::Uniform),
            "clause" => Ok(CrossoverKind::ClauseBiased),
            "1point" => Ok(CrossoverKind::NPoint(1)),
            "2point" => Ok(CrossoverKind::NPoint(2)),
            "npoint" => Ok(CrossoverKind::NPoint(self.crossover_points)),
            "localsearch" => Ok(CrossoverKind::LocalSearchHybrid),
            _ => Err(unknown("crossover", &self.crossover)),
        }
    }

    fn mutation(&self) -> Result<MutationKind> {
        match key(&self.mutation).as_str() {
            "bitflip" => Ok(MutationKind::BitFlip),
            "guided" => Ok(MutationKind::Guided),
            "1bit" => Ok(MutationKind::NBit(1)),
            "2bit" => Ok(MutationKind::NBit(2)),
            "nbit" => Ok(MutationKind::NBit(self.mutation_bits)),
            _ => Err(unknown("mutation", &self.mutation)),
        }
    }

    fn fitness(&self) -> Result<FitnessKind> {
        match key(&self.fitness).as_str() {
            "maxsat" => Ok(FitnessKind::MaxSat),
            "weighted" => Ok(FitnessKind::Weighted),
            "amplified" => Ok(FitnessKind::Amplified {
                exponent: self.amplification,
            }),
            "penalty" => Ok(FitnessKind::penalty()),
            "variableconflict" => Ok(FitnessKind::variable_conflict()),
            "dynamicweight" => Ok(FitnessKind::dynamic_weight()),
            "multiobjective" => Ok(FitnessKind::multi_objective()),
            "adaptive" => Ok(FitnessKind::adaptive()),
            _ => Err(unknown("fitness", &self.fitness)),
        }
    }

    fn local_search(&self) -> Result<Option<LocalSearchKind>> {
        let kind = match key(&self.local_search).as_str() {
            "" | "none" => return Ok(None),
            "tabu" => LocalSearchKind::tabu(self.tabu_tenure),
            "hillclimbing" => LocalSearchKind::HillClimbing,
            "simulatedannealing" => LocalSearchKind::SimulatedAnnealing(AnnealingConfig::default()),
            "variableneighborhood" => LocalSearchKind::variable_neighborhood(),
            "guidedlocalsearch" => LocalSearchKind::guided(),
            "iteratedlocalsearch" => LocalSearchKind::iterated(LocalSearchKind::HillClimbing),
            "clausesearch" => LocalSearchKind::ClauseRepair,
            _ => return Err(unknown("local search", &self.local_search)),
        };
        Ok(Some(kind))
    }

    fn generator(&self) -> Result<GeneratorKind> {
        match key(&self.generator).as_str() {
            "random" => Ok(GeneratorKind::Random),
            "clause" => Ok(GeneratorKind::ClauseProbability),
            "diversity" => Ok(GeneratorKind::diversity()),
            _ => Err(unknown("generator", &self.generator)),
        }
    }
}

fn key(name: &str) -> String {
    name.trim().to_ascii_lowercase()
}

fn unknown(family: &'static str, name: &str) -> SatGaError {
    SatGaError::UnknownStrategy {
        family,
        name: name.to_string(),
    }
}
