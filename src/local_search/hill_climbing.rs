//! Random-walk hill climbing.

use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::Candidate;

/// Flips one random variable per iteration and keeps the flip unless it
/// lowers the satisfied-clause count. Sideways moves are kept, which lets
/// the walk drift across plateaus. The count never drops, so the final
/// assignment is also the best one seen.
#[derive(Debug, Clone, Copy, Default)]
pub struct HillClimbing;

impl LocalSearchStrategy for HillClimbing {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();
        let mut work = candidate.assignment().to_vec();
        let mut current = instance.satisfied_count(&work);

        for _ in 0..max_iterations {
            if current == total {
                break;
            }
            let var = rng.random_range(0..n);
            work[var] = !work[var];
            let count = instance.satisfied_count(&work);
            if count >= current {
                current = count;
            } else {
                work[var] = !work[var];
            }
        }

        install_best(candidate, work);
    }
}
