//! Iterated local search around an inner kernel.
//!
//! The candidate is first improved by the inner kernel. Each iteration then
//! flips `⌊strength · n⌋` (at least one) random variables of the best
//! assignment, re-runs the inner kernel on the perturbed copy and keeps the
//! result only if it beats the best count.
//!
//! # References
//!
//! - Lourenço, Martin & Stützle (2003), "Iterated local search"

use rand::seq::index;
use rand::Rng;

use super::{install_best, LocalSearch, LocalSearchStrategy};
use crate::model::Candidate;

/// Iterated local search kernel.
#[derive(Debug, Clone)]
pub struct IteratedLocalSearch {
    inner: Box<LocalSearch>,
    strength: f64,
    inner_iterations: usize,
}

impl IteratedLocalSearch {
    pub fn new(inner: LocalSearch, strength: f64, inner_iterations: usize) -> Self {
        Self {
            inner: Box::new(inner),
            strength,
            inner_iterations,
        }
    }

    pub fn inner(&self) -> &LocalSearch {
        &self.inner
    }

    fn perturbation_size(&self, n: usize) -> usize {
        ((n as f64 * self.strength) as usize).clamp(1, n)
    }
}

impl LocalSearchStrategy for IteratedLocalSearch {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();

        let mut scratch = candidate.clone();
        self.inner.improve(&mut scratch, self.inner_iterations, rng);
        let mut best_count = scratch.satisfied_count();
        let mut best = scratch.assignment().to_vec();

        let flips = self.perturbation_size(n);
        for _ in 0..max_iterations {
            if best_count == total {
                break;
            }
            let mut trial = best.clone();
            for var in index::sample(rng, n, flips) {
                trial[var] = !trial[var];
            }
            scratch.set_assignment(trial);
            self.inner.improve(&mut scratch, self.inner_iterations, rng);

            let count = scratch.satisfied_count();
            if count > best_count {
                best_count = count;
                best.copy_from_slice(scratch.assignment());
            }
        }

        install_best(candidate, best);
    }
}
