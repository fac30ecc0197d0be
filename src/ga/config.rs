//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop,
//! including one typed strategy value per operator family.

use super::crossover::CrossoverKind;
use super::mutation::MutationKind;
use super::population::GeneratorKind;
use super::selection::Selection;
use crate::fitness::FitnessKind;
use crate::local_search::LocalSearchKind;

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use sat_ga::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// assert!(config.local_search.is_none());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use sat_ga::ga::{CrossoverKind, GaConfig, Selection};
/// use sat_ga::local_search::LocalSearchKind;
///
/// let config = GaConfig::default()
///     .with_population_size(200)
///     .with_selection(Selection::Tournament(5))
///     .with_crossover(CrossoverKind::ClauseBiased)
///     .with_local_search(LocalSearchKind::tabu(5))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Generation budget.
    pub max_generations: usize,

    /// Per-gene flip probability for bit-flip mutation.
    pub mutation_rate: f64,

    /// Probability that the clause-biased and hybrid crossovers actually
    /// recombine instead of cloning a parent.
    pub crossover_rate: f64,

    /// Fraction of the population carried over unchanged. The elite count
    /// is `⌈population_size · elitism_rate⌉`.
    pub elitism_rate: f64,

    /// Generations without improvement tolerated before the population is
    /// regenerated. 0 disables restarts.
    pub restart_threshold: usize,

    /// Iteration bound for the memetic local-search pass on children.
    pub local_search_iterations: usize,

    /// Iteration bound for the local search inside the hybrid crossover.
    pub hybrid_iterations: usize,

    /// Generations between progress notifications and debug logs.
    pub progress_interval: usize,

    /// Random seed. `None` draws one from the OS.
    pub seed: Option<u64>,

    pub selection: Selection,
    pub crossover: CrossoverKind,
    pub mutation: MutationKind,
    pub fitness: FitnessKind,
    /// Memetic local search applied to every child; `None` disables it.
    pub local_search: Option<LocalSearchKind>,
    pub generator: GeneratorKind,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            mutation_rate: 0.01,
            crossover_rate: 0.9,
            elitism_rate: 0.1,
            restart_threshold: 100,
            local_search_iterations: 10,
            hybrid_iterations: 1000,
            progress_interval: 10,
            seed: None,
            selection: Selection::default(),
            crossover: CrossoverKind::default(),
            mutation: MutationKind::default(),
            fitness: FitnessKind::default(),
            local_search: None,
            generator: GeneratorKind::default(),
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation threshold (0 to disable restarts).
    pub fn with_restart_threshold(mut self, generations: usize) -> Self {
        self.restart_threshold = generations;
        self
    }

    pub fn with_local_search_iterations(mut self, n: usize) -> Self {
        self.local_search_iterations = n;
        self
    }

    pub fn with_hybrid_iterations(mut self, n: usize) -> Self {
        self.hybrid_iterations = n;
        self
    }

    pub fn with_progress_interval(mut self, n: usize) -> Self {
        self.progress_interval = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    pub fn with_crossover(mut self, crossover: CrossoverKind) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: MutationKind) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_fitness(mut self, fitness: FitnessKind) -> Self {
        self.fitness = fitness;
        self
    }

    pub fn with_local_search(mut self, local_search: LocalSearchKind) -> Self {
        self.local_search = Some(local_search);
        self
    }

    pub fn without_local_search(mut self) -> Self {
        self.local_search = None;
        self
    }

    pub fn with_generator(mut self, generator: GeneratorKind) -> Self {
        self.generator = generator;
        self
    }

    /// Number of individuals carried over unchanged each generation.
    pub fn elite_count(&self) -> usize {
        ((self.population_size as f64 * self.elitism_rate).ceil() as usize)
            .min(self.population_size)
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        for (name, rate) in [
            ("mutation_rate", self.mutation_rate),
            ("crossover_rate", self.crossover_rate),
            ("elitism_rate", self.elitism_rate),
        ] {
            if !(0.0..=1.0).contains(&rate) {
                return Err(format!("{name} must be in [0, 1], got {rate}"));
            }
        }
        if self.elite_count() >= self.population_size {
            return Err("elitism_rate too high: elites fill entire population".into());
        }
        if self.progress_interval == 0 {
            return Err("progress_interval must be at least 1".into());
        }
        if let Selection::Tournament(0) = self.selection {
            return Err("tournament size must be at least 1".into());
        }
        if self.crossover == CrossoverKind::LocalSearchHybrid && self.local_search.is_none() {
            return Err("local-search crossover requires a local search".into());
        }
        self.fitness.validate()?;
        self.generator.validate()?;
        if let Some(ls) = &self.local_search {
            ls.validate()?;
        }
        Ok(())
    }
}
