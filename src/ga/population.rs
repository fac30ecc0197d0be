//! Population generators.
//!
//! A generator creates individuals for the initial population, for every
//! restart and for padding a short generation. Generators may search on a
//! simplified *working* instance; [`PopulationSource::override_solution`]
//! maps a finished candidate back onto the original instance before it is
//! reported.

use std::sync::Arc;

use log::warn;
use rand::Rng;

use crate::model::{Candidate, Instance};

/// Creates individuals.
pub trait PopulationSource {
    /// Instance the generated candidates reference.
    fn working_instance(&self) -> &Arc<Instance>;

    /// Creates one individual without regard to any population.
    fn create_individual<R: Rng>(&mut self, rng: &mut R) -> Candidate;

    /// Creates one individual for a population under construction.
    fn create_individual_for<R: Rng>(&mut self, population: &[Candidate], rng: &mut R) -> Candidate {
        let _ = population;
        self.create_individual(rng)
    }

    /// Creates `size` individuals, each one seeing those created before it.
    fn initialize<R: Rng>(&mut self, size: usize, rng: &mut R) -> Vec<Candidate> {
        let mut population = Vec::with_capacity(size);
        for _ in 0..size {
            let individual = self.create_individual_for(&population, rng);
            population.push(individual);
        }
        population
    }

    /// Prepares a finished candidate for reporting.
    fn override_solution(&self, candidate: &mut Candidate) {
        let _ = candidate;
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Generator variant, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeneratorKind {
    /// Fair coin per gene.
    #[default]
    Random,
    /// Per-variable polarity bias, with pure variables fixed and their
    /// clauses removed from the working instance.
    ClauseProbability,
    /// Greedy maximin Hamming-distance seeding over `trials` random draws.
    Diversity { trials: usize },
}

impl GeneratorKind {
    /// Diversity seeding with 10 trials per individual.
    pub fn diversity() -> Self {
        GeneratorKind::Diversity { trials: 10 }
    }

    pub fn name(&self) -> &'static str {
        match self {
            GeneratorKind::Random => "Random",
            GeneratorKind::ClauseProbability => "Clause",
            GeneratorKind::Diversity { .. } => "Diversity",
        }
    }

    pub fn build(&self, instance: Arc<Instance>) -> PopulationGenerator {
        match *self {
            GeneratorKind::Random => PopulationGenerator::Random(RandomGenerator::new(instance)),
            GeneratorKind::ClauseProbability => {
                PopulationGenerator::ClauseProbability(ClauseProbabilityGenerator::new(instance))
            }
            GeneratorKind::Diversity { trials } => {
                PopulationGenerator::Diversity(DiversityGenerator::new(instance, trials))
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            GeneratorKind::Diversity { trials: 0 } => {
                Err("diversity generator needs at least one trial".into())
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Generators
// ============================================================================

/// Each gene true with probability 0.5.
#[derive(Debug, Clone)]
pub struct RandomGenerator {
    instance: Arc<Instance>,
}

impl RandomGenerator {
    pub fn new(instance: Arc<Instance>) -> Self {
        Self { instance }
    }
}

impl PopulationSource for RandomGenerator {
    fn working_instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    fn create_individual<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        let genes = (0..self.instance.variable_count())
            .map(|_| rng.random_bool(0.5))
            .collect();
        Candidate::new(self.instance.clone(), genes)
    }
}

/// Polarity-biased generator on a pure-literal-simplified instance.
///
/// Variable `i` is true with probability `pos_i / (pos_i + neg_i)` taken
/// from the original instance; variables that never occur get a fair coin.
/// Pure variables are recorded with their forced value and every clause
/// mentioning them is dropped from the working instance. The original
/// instance is kept for [`override_solution`](PopulationSource::override_solution),
/// which writes the forced values back and rebinds the candidate to it.
#[derive(Debug, Clone)]
pub struct ClauseProbabilityGenerator {
    original: Arc<Instance>,
    working: Arc<Instance>,
    probabilities: Vec<f64>,
    fixed: Vec<(usize, bool)>,
}

impl ClauseProbabilityGenerator {
    pub fn new(instance: Arc<Instance>) -> Self {
        let stats = instance.statistics();
        let probabilities = stats
            .iter()
            .map(|s| s.positive_ratio().unwrap_or(0.5))
            .collect();
        let simplified = instance.simplify_pure();
        Self {
            working: Arc::new(simplified.instance),
            fixed: simplified.fixed,
            original: instance,
            probabilities,
        }
    }

    /// Pure variables and their forced values.
    pub fn fixed(&self) -> &[(usize, bool)] {
        &self.fixed
    }

    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    pub fn original_instance(&self) -> &Arc<Instance> {
        &self.original
    }
}

impl PopulationSource for ClauseProbabilityGenerator {
    fn working_instance(&self) -> &Arc<Instance> {
        &self.working
    }

    fn create_individual<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        let genes = self
            .probabilities
            .iter()
            .map(|&p| rng.random_bool(p))
            .collect();
        Candidate::new(self.working.clone(), genes)
    }

    fn override_solution(&self, candidate: &mut Candidate) {
        let was_satisfied = candidate.is_satisfied();
        {
            let genes = candidate.assignment_mut();
            for &(var, value) in &self.fixed {
                genes[var] = value;
            }
        }
        candidate.rebind(self.original.clone());
        if was_satisfied && !candidate.is_satisfied() {
            warn!("overridden solution fails verification against the original instance");
        }
    }
}

/// Random generator that keeps, per individual, the best of `trials` draws
/// by minimum Hamming distance to the population built so far.
#[derive(Debug, Clone)]
pub struct DiversityGenerator {
    inner: RandomGenerator,
    trials: usize,
}

impl DiversityGenerator {
    pub fn new(instance: Arc<Instance>, trials: usize) -> Self {
        Self {
            inner: RandomGenerator::new(instance),
            trials: trials.max(1),
        }
    }
}

impl PopulationSource for DiversityGenerator {
    fn working_instance(&self) -> &Arc<Instance> {
        self.inner.working_instance()
    }

    fn create_individual<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        self.inner.create_individual(rng)
    }

    fn create_individual_for<R: Rng>(&mut self, population: &[Candidate], rng: &mut R) -> Candidate {
        if population.is_empty() {
            return self.inner.create_individual(rng);
        }

        let mut best: Option<(usize, Candidate)> = None;
        for _ in 0..self.trials {
            let trial = self.inner.create_individual(rng);
            let distance = population
                .iter()
                .map(|other| trial.hamming_distance(other))
                .min()
                .unwrap_or(usize::MAX);
            if best.as_ref().map_or(true, |(d, _)| distance > *d) {
                best = Some((distance, trial));
            }
        }
        match best {
            Some((_, candidate)) => candidate,
            None => self.inner.create_individual(rng),
        }
    }
}

/// A built population generator.
#[derive(Debug, Clone)]
pub enum PopulationGenerator {
    Random(RandomGenerator),
    ClauseProbability(ClauseProbabilityGenerator),
    Diversity(DiversityGenerator),
}

impl PopulationSource for PopulationGenerator {
    fn working_instance(&self) -> &Arc<Instance> {
        match self {
            PopulationGenerator::Random(g) => g.working_instance(),
            PopulationGenerator::ClauseProbability(g) => g.working_instance(),
            PopulationGenerator::Diversity(g) => g.working_instance(),
        }
    }

    fn create_individual<R: Rng>(&mut self, rng: &mut R) -> Candidate {
        match self {
            PopulationGenerator::Random(g) => g.create_individual(rng),
            PopulationGenerator::ClauseProbability(g) => g.create_individual(rng),
            PopulationGenerator::Diversity(g) => g.create_individual(rng),
        }
    }

    fn create_individual_for<R: Rng>(&mut self, population: &[Candidate], rng: &mut R) -> Candidate {
        match self {
            PopulationGenerator::Random(g) => g.create_individual_for(population, rng),
            PopulationGenerator::ClauseProbability(g) => g.create_individual_for(population, rng),
            PopulationGenerator::Diversity(g) => g.create_individual_for(population, rng),
        }
    }

    fn override_solution(&self, candidate: &mut Candidate) {
        match self {
            PopulationGenerator::Random(g) => g.override_solution(candidate),
            PopulationGenerator::ClauseProbability(g) => g.override_solution(candidate),
            PopulationGenerator::Diversity(g) => g.override_solution(candidate),
        }
    }
}
