//! Variable neighbourhood search over flip neighbourhoods.
//!
//! Neighbourhood `k` flips `k` distinct random variables of the best
//! assignment. The shaken assignment is driven to a local optimum by
//! first-improvement descent. An improvement resets `k` to 1; a failure
//! widens the neighbourhood, wrapping back to 1 after the last one. Each
//! shake-and-descend counts as one iteration.
//!
//! # References
//!
//! - Mladenović, N. & Hansen, P. (1997). "Variable neighborhood search",
//!   *Computers & Operations Research* 24(11), 1097-1100.

use rand::seq::index;
use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::{Candidate, Instance};

/// Variable neighbourhood search kernel.
#[derive(Debug, Clone)]
pub struct VariableNeighborhoodSearch {
    neighborhoods: usize,
}

impl Default for VariableNeighborhoodSearch {
    fn default() -> Self {
        Self::new(3)
    }
}

impl VariableNeighborhoodSearch {
    /// `neighborhoods` is the largest shake size; values below 1 are raised to 1.
    pub fn new(neighborhoods: usize) -> Self {
        Self {
            neighborhoods: neighborhoods.max(1),
        }
    }

    pub fn neighborhoods(&self) -> usize {
        self.neighborhoods
    }
}

/// Flips any variable that raises the satisfied count, sweeping until a
/// full pass finds nothing. Returns the final count.
pub(crate) fn descend(instance: &Instance, assignment: &mut [bool]) -> usize {
    let mut current = instance.satisfied_count(assignment);
    let total = instance.clause_count();
    let mut improved = true;
    while improved && current < total {
        improved = false;
        for var in 0..assignment.len() {
            assignment[var] = !assignment[var];
            let count = instance.satisfied_count(assignment);
            if count > current {
                current = count;
                improved = true;
            } else {
                assignment[var] = !assignment[var];
            }
        }
    }
    current
}

impl LocalSearchStrategy for VariableNeighborhoodSearch {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();

        let mut best = candidate.assignment().to_vec();
        let mut best_count = instance.satisfied_count(&best);
        let mut k = 1;

        for _ in 0..max_iterations {
            if best_count == total {
                break;
            }

            let mut trial = best.clone();
            for var in index::sample(rng, n, k.min(n)) {
                trial[var] = !trial[var];
            }
            let count = descend(&instance, &mut trial);

            if count > best_count {
                best = trial;
                best_count = count;
                k = 1;
            } else {
                k = if k >= self.neighborhoods { 1 } else { k + 1 };
            }
        }

        install_best(candidate, best);
    }
}
