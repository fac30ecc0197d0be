//! Multi-worker race.
//!
//! [`ParallelRunner`] launches independent engines on a dedicated rayon
//! pool. Every worker shares the instance and configuration but builds its
//! own population, RNG and operators, so stateful fitness strategies are
//! never shared. The first worker to satisfy the instance raises the shared
//! cancellation flag and the others stop at their next generation boundary.

use super::config::GaConfig;
use super::runner::GaRunner;
use super::types::GaResult;
use crate::error::{Result, SatGaError};
use crate::model::Instance;
use crate::random::worker_seed;
use log::info;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

const NO_WINNER: usize = usize::MAX;

/// Runs several seeded engines concurrently and returns the first
/// satisfying result.
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use sat_ga::ga::{GaConfig, ParallelRunner};
/// use sat_ga::model::{Clause, Instance};
///
/// let instance = Arc::new(Instance::new(
///     3,
///     vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])],
/// ));
/// let config = GaConfig::default().with_population_size(10).with_seed(7);
/// let result = ParallelRunner::run(instance, &config, 2).unwrap();
/// assert!(result.is_satisfied());
/// ```
pub struct ParallelRunner;

impl ParallelRunner {
    pub fn run(instance: Arc<Instance>, config: &GaConfig, workers: usize) -> Result<GaResult> {
        Self::run_with_cancel(instance, config, workers, None)
    }

    /// Runs `workers` engines sharing `cancel` (or a fresh flag).
    ///
    /// Worker `w` is seeded with `worker_seed(base, w)` where `base` is the
    /// configured seed or a random one. When no worker succeeds, the
    /// exhausted result satisfying the most clauses is returned; when every
    /// worker was cancelled, so is the result.
    pub fn run_with_cancel(
        instance: Arc<Instance>,
        config: &GaConfig,
        workers: usize,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GaResult> {
        if workers == 0 {
            return Err(SatGaError::InvalidConfig("workers must be at least 1".into()));
        }
        config.validate().map_err(SatGaError::InvalidConfig)?;

        let base_seed = config.seed.unwrap_or_else(rand::random);
        let cancel = cancel.unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
        let winner = AtomicUsize::new(NO_WINNER);

        let pool = rayon::ThreadPoolBuilder::new().num_threads(workers).build()?;
        info!("racing {workers} workers, base seed {base_seed}");

        let mut results: Vec<GaResult> = pool.install(|| {
            (0..workers)
                .into_par_iter()
                .map(|worker| {
                    let worker_config = config.clone().with_seed(worker_seed(base_seed, worker));
                    let result = GaRunner::run_with_cancel(
                        instance.clone(),
                        &worker_config,
                        Some(cancel.clone()),
                    )?;
                    if result.is_satisfied()
                        && winner
                            .compare_exchange(NO_WINNER, worker, Ordering::SeqCst, Ordering::Relaxed)
                            .is_ok()
                    {
                        cancel.store(true, Ordering::SeqCst);
                        info!("worker {worker} satisfied the instance");
                    }
                    Ok(result)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        let winner = winner.load(Ordering::SeqCst);
        if winner != NO_WINNER {
            return Ok(results.swap_remove(winner));
        }

        let best = results
            .iter()
            .enumerate()
            .filter_map(|(i, r)| r.best().map(|c| (i, c.satisfied_count(), c.score())))
            .max_by(|a, b| a.1.cmp(&b.1).then(a.2.total_cmp(&b.2)))
            .map(|(i, _, _)| i);
        Ok(results.swap_remove(best.unwrap_or(0)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::tests::uf20;
    use crate::local_search::LocalSearchKind;
    use crate::model::Clause;

    #[test]
    fn test_race_finds_solution() {
        let _ = env_logger::builder().is_test(true).try_init();
        let instance = uf20();
        let config = GaConfig::default()
            .with_population_size(20)
            .with_max_generations(500)
            .with_local_search(LocalSearchKind::HillClimbing)
            .with_local_search_iterations(30)
            .with_seed(5);
        let result = ParallelRunner::run(instance.clone(), &config, 4).unwrap();

        assert!(result.is_satisfied());
        assert!(instance.is_satisfied(result.best().unwrap().assignment()));
    }

    #[test]
    fn test_unsatisfiable_returns_best_exhausted() {
        let instance = Arc::new(Instance::new(
            2,
            vec![Clause::new(vec![1]), Clause::new(vec![-1]), Clause::new(vec![2])],
        ));
        let config = GaConfig::default()
            .with_population_size(8)
            .with_max_generations(10)
            .with_seed(1);
        let result = ParallelRunner::run(instance, &config, 3).unwrap();

        assert!(!result.is_satisfied());
        assert!(!result.cancelled());
        assert_eq!(result.best().unwrap().satisfied_count(), 2);
    }

    #[test]
    fn test_external_cancel() {
        let cancel = Arc::new(AtomicBool::new(true));
        let config = GaConfig::default().with_population_size(8).with_seed(1);
        let result = ParallelRunner::run_with_cancel(uf20(), &config, 2, Some(cancel)).unwrap();
        assert!(result.cancelled());
    }

    #[test]
    fn test_zero_workers_is_error() {
        let err = ParallelRunner::run(uf20(), &GaConfig::default(), 0).unwrap_err();
        assert!(matches!(err, SatGaError::InvalidConfig(_)));
    }
}
