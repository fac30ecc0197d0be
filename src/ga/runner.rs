//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates one memetic search:
//! generate → evaluate → select → crossover → local search → mutate → repeat,
//! with a full population restart whenever the best-so-far stagnates.

use super::config::GaConfig;
use super::population::{PopulationGenerator, PopulationSource};
use super::types::{
    FinalReport, GaResult, GenerationProgress, NoopObserver, ProgressObserver, SearchOutcome,
};
use crate::error::{Result, SatGaError};
use crate::fitness::FitnessFunction;
use crate::local_search::LocalSearchStrategy;
use crate::model::{Candidate, Instance};
use crate::random::create_rng;
use log::{debug, info};
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use sat_ga::ga::{GaConfig, GaRunner};
/// use sat_ga::model::{Clause, Instance};
///
/// let instance = Arc::new(Instance::new(
///     3,
///     vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])],
/// ));
/// let config = GaConfig::default().with_population_size(10).with_seed(42);
/// let result = GaRunner::run(instance, &config).unwrap();
/// assert!(result.is_satisfied());
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA until a satisfying assignment is found or the generation
    /// budget is spent.
    pub fn run(instance: Arc<Instance>, config: &GaConfig) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// The flag is checked at every generation boundary; once it reads
    /// `true` the run ends with [`SearchOutcome::Cancelled`].
    pub fn run_with_cancel(
        instance: Arc<Instance>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        Self::run_with_observer(instance, config, cancel, &mut NoopObserver)
    }

    /// Runs the GA, reporting progress to `observer`.
    pub fn run_with_observer<O: ProgressObserver + ?Sized>(
        instance: Arc<Instance>,
        config: &GaConfig,
        cancel: Option<Arc<AtomicBool>>,
        observer: &mut O,
    ) -> Result<GaResult> {
        config.validate().map_err(SatGaError::InvalidConfig)?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);

        let mut generator = config.generator.build(instance.clone());
        let working = generator.working_instance().clone();
        let mut fitness = config.fitness.build(&working);
        let mut crossover = config.crossover.build(
            config.crossover_rate,
            config.local_search.as_ref(),
            config.hybrid_iterations,
        )?;
        let mut local_search = config.local_search.as_ref().map(|kind| kind.build());

        info!(
            "GA start: {} variables, {} clauses (working {}), population {}, seed {}, \
             {} / {} / {} / {} / {} / {}",
            instance.variable_count(),
            instance.clause_count(),
            working.clause_count(),
            config.population_size,
            seed,
            config.selection.name(),
            config.crossover.name(),
            config.mutation.name(),
            config.fitness.name(),
            config.local_search.as_ref().map_or("None", |ls| ls.name()),
            config.generator.name(),
        );

        let size = config.population_size;
        let elite_count = config.elite_count();
        // Pairs need an even number of parents.
        let parent_count = (size - elite_count).next_multiple_of(2);

        let mut population = generator.initialize(size, &mut rng);
        let mut best: Option<Candidate> = None;
        let mut best_uninterrupted: Option<Candidate> = None;
        let mut last_improvement = 0usize;
        let mut restarts = 0usize;
        let mut fitness_history = Vec::new();

        for generation in 0..config.max_generations {
            if is_cancelled(cancel.as_ref()) {
                info!("GA cancelled at generation {generation}");
                let result = GaResult {
                    outcome: SearchOutcome::Cancelled,
                    generations: generation,
                    restarts,
                    fitness_history,
                };
                observer.on_finish(&report(&result));
                return Ok(result);
            }

            // ---- Restart on stagnation ----
            if config.restart_threshold > 0
                && generation - last_improvement > config.restart_threshold
            {
                if let Some(previous) = best.take() {
                    if best_uninterrupted
                        .as_ref()
                        .map_or(true, |u| previous.score() > u.score())
                    {
                        best_uninterrupted = Some(previous);
                    }
                }
                population = generator.initialize(size, &mut rng);
                restarts += 1;
                last_improvement = generation;
                info!(
                    "restart #{restarts} at generation {generation}: no improvement for {} generations",
                    config.restart_threshold
                );
                observer.on_restart(generation, restarts);
                continue;
            }

            // ---- Evaluate ----
            for candidate in population.iter_mut() {
                fitness.evaluate(candidate);
            }

            let best_idx = best_index(&population);
            let generation_best = population[best_idx].score();
            fitness_history.push(generation_best);

            if best.as_ref().map_or(true, |b| generation_best > b.score()) {
                let mut record = population[best_idx].clone();
                record.generations_to_find = Some(generation);
                record.restarts_to_find = Some(restarts);
                best = Some(record);
                last_improvement = generation;
            }

            if let Some(winner) = population.iter().find(|c| c.is_satisfied()) {
                let winner = winner.clone();
                return Ok(succeed(
                    &generator, winner, generation, restarts, fitness_history, observer,
                ));
            }

            if generation % config.progress_interval == 0 {
                if let Some(b) = &best {
                    let progress = GenerationProgress {
                        generation,
                        restarts,
                        generation_best,
                        best_fitness: b.score(),
                        best_satisfied: b.satisfied_count(),
                        clause_count: working.clause_count(),
                    };
                    debug!(
                        "gen {generation}: best {:.4} ({} / {} clauses), generation best {generation_best:.4}, restarts {restarts}",
                        progress.best_fitness, progress.best_satisfied, progress.clause_count
                    );
                    observer.on_generation(&progress);
                }
            }

            // ---- Elitism ----
            let mut order: Vec<usize> = (0..population.len()).collect();
            order.sort_by(|&a, &b| population[b].score().total_cmp(&population[a].score()));
            let mut next: Vec<Candidate> = order[..elite_count]
                .iter()
                .map(|&i| population[i].clone())
                .collect();

            // ---- Selection, crossover, memetic local search ----
            let parents = config
                .selection
                .select_indices(&population, parent_count, &mut rng);
            let mut children = Vec::with_capacity(parent_count);
            for pair in parents.chunks_exact(2) {
                let mut brood =
                    crossover.crossover(&population[pair[0]], &population[pair[1]], &mut rng);
                if let Some(ls) = local_search.as_mut() {
                    for child in brood.iter_mut() {
                        ls.improve(child, config.local_search_iterations, &mut rng);
                        if child.is_satisfied() {
                            let mut winner = child.clone();
                            fitness.evaluate(&mut winner);
                            return Ok(succeed(
                                &generator, winner, generation, restarts, fitness_history,
                                observer,
                            ));
                        }
                    }
                }
                children.extend(brood);
            }

            // ---- Mutation ----
            for child in children.iter_mut() {
                config.mutation.mutate(child, config.mutation_rate, &mut rng);
            }

            // ---- Next population ----
            population =
                next_population(next, children, elite_count, size, &mut generator, &mut rng);
        }

        let chosen = match (best, best_uninterrupted) {
            (Some(b), Some(u)) => {
                if u.score() > b.score() {
                    u
                } else {
                    b
                }
            }
            (Some(b), None) => b,
            (None, Some(u)) => u,
            // Only reachable when every generation was a restart.
            (None, None) => {
                let mut any = population.swap_remove(0);
                fitness.evaluate(&mut any);
                any
            }
        };
        let chosen = finalize(&generator, chosen);
        info!(
            "GA exhausted after {} generations ({restarts} restarts): best satisfies {} / {} clauses",
            config.max_generations,
            chosen.satisfied_count(),
            instance.clause_count()
        );

        let result = GaResult {
            outcome: SearchOutcome::Exhausted(chosen),
            generations: config.max_generations,
            restarts,
            fitness_history,
        };
        observer.on_finish(&report(&result));
        Ok(result)
    }
}

fn is_cancelled(cancel: Option<&Arc<AtomicBool>>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

/// Index of the highest-scoring individual, first one on ties.
fn best_index(population: &[Candidate]) -> usize {
    assert!(!population.is_empty(), "population must not be empty");
    let mut best = 0;
    for (i, c) in population.iter().enumerate().skip(1) {
        if c.score() > population[best].score() {
            best = i;
        }
    }
    best
}

/// Maps a candidate back onto the original instance, keeping the fitness it
/// was scored with during the search.
fn finalize(generator: &PopulationGenerator, mut candidate: Candidate) -> Candidate {
    let fitness = candidate.fitness();
    generator.override_solution(&mut candidate);
    if let Some(f) = fitness {
        candidate.set_fitness(f);
    }
    candidate
}

/// Appends `children` to the elites at the front of `next`, dropping any
/// child equal to an elite, then pads with fresh individuals or trims
/// non-elites at random until the population has `size` members.
fn next_population<G: PopulationSource, R: Rng>(
    mut next: Vec<Candidate>,
    children: Vec<Candidate>,
    elite_count: usize,
    size: usize,
    generator: &mut G,
    rng: &mut R,
) -> Vec<Candidate> {
    for child in children {
        if !next[..elite_count].contains(&child) {
            next.push(child);
        }
    }
    while next.len() < size {
        let fresh = generator.create_individual_for(&next, rng);
        next.push(fresh);
    }
    while next.len() > size {
        let victim = rng.random_range(elite_count..next.len());
        next.remove(victim);
    }
    next
}

fn succeed<O: ProgressObserver + ?Sized>(
    generator: &PopulationGenerator,
    winner: Candidate,
    generation: usize,
    restarts: usize,
    fitness_history: Vec<f64>,
    observer: &mut O,
) -> GaResult {
    let mut winner = finalize(generator, winner);
    winner.generations_to_find = Some(generation);
    winner.restarts_to_find = Some(restarts);
    info!("satisfying assignment found at generation {generation} after {restarts} restarts");

    let result = GaResult {
        outcome: SearchOutcome::Satisfied(winner),
        generations: generation + 1,
        restarts,
        fitness_history,
    };
    observer.on_finish(&report(&result));
    result
}

fn report(result: &GaResult) -> FinalReport {
    FinalReport {
        satisfied: result.is_satisfied(),
        cancelled: result.cancelled(),
        generations: result.generations,
        restarts: result.restarts,
        assignment: result.best().map(Candidate::printable).unwrap_or_default(),
    }
}

// ============================================================================
// Tests
// ============================================================================
