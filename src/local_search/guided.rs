//! Guided local search with per-variable penalties.
//!
//! Moves are judged on the augmented objective
//!
//! ```text
//! g(x) = satisfied(x) − λ · Σ_{i : x_i = true} p_i
//! ```
//!
//! Each iteration is one first-improvement sweep over all variables on
//! `g`. Afterwards every variable occurring in a still-violated clause has
//! its penalty incremented once per such clause. The best assignment by
//! *raw* satisfied count is installed at the end.
//!
//! Penalties persist across calls so later calls start from a reshaped
//! landscape; they reset when the variable count changes.
//!
//! # References
//!
//! - Voudouris & Tsang (1999), "Guided local search and its application to
//!   the traveling salesman problem"

use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::Candidate;

/// Guided local search kernel.
#[derive(Debug, Clone)]
pub struct GuidedLocalSearch {
    lambda: f64,
    penalties: Vec<u32>,
}

impl Default for GuidedLocalSearch {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl GuidedLocalSearch {
    pub fn new(lambda: f64) -> Self {
        Self {
            lambda,
            penalties: Vec::new(),
        }
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    pub fn penalties(&self) -> &[u32] {
        &self.penalties
    }

    fn penalty_of(&self, assignment: &[bool]) -> f64 {
        assignment
            .iter()
            .zip(&self.penalties)
            .filter(|(&value, _)| value)
            .map(|(_, &p)| p as f64)
            .sum()
    }
}

impl LocalSearchStrategy for GuidedLocalSearch {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, _rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        if self.penalties.len() != n {
            self.penalties = vec![0; n];
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();

        let mut work = candidate.assignment().to_vec();
        let mut best = work.clone();
        let mut best_count = instance.satisfied_count(&work);

        for _ in 0..max_iterations {
            if best_count == total {
                break;
            }

            let mut penalty = self.penalty_of(&work);
            let mut augmented = instance.satisfied_count(&work) as f64 - self.lambda * penalty;

            for var in 0..n {
                let delta_penalty = if work[var] {
                    -(self.penalties[var] as f64)
                } else {
                    self.penalties[var] as f64
                };
                work[var] = !work[var];
                let count = instance.satisfied_count(&work);
                let trial = count as f64 - self.lambda * (penalty + delta_penalty);
                if trial > augmented {
                    augmented = trial;
                    penalty += delta_penalty;
                    if count > best_count {
                        best_count = count;
                        best.copy_from_slice(&work);
                    }
                } else {
                    work[var] = !work[var];
                }
            }

            for clause in instance.unsatisfied_clauses(&work) {
                for var in clause.variables() {
                    self.penalties[var] += 1;
                }
            }
        }

        install_best(candidate, best);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::local_search::tests::{small_instance, uf20};
    use crate::random::create_rng;

    #[test]
    fn test_guided_solves_small_instance() {
        let mut c = Candidate::new(small_instance(), vec![true, false]);
        GuidedLocalSearch::default().improve(&mut c, 10, &mut create_rng(0));
        assert!(c.is_satisfied());
    }

    #[test]
    fn test_penalties_accumulate_on_violated_clauses() {
        let mut gls = GuidedLocalSearch::new(0.1);
        let mut c = Candidate::new(uf20(), vec![false; 20]);
        gls.improve(&mut c, 3, &mut create_rng(0));
        assert_eq!(gls.penalties().len(), 20);
        if !c.is_satisfied() {
            assert!(gls.penalties().iter().any(|&p| p > 0));
        }
    }

    #[test]
    fn test_penalties_reset_on_size_change() {
        let mut gls = GuidedLocalSearch::new(0.1);
        let mut big = Candidate::new(uf20(), vec![false; 20]);
        gls.improve(&mut big, 2, &mut create_rng(0));
        let mut small = Candidate::new(small_instance(), vec![false, false]);
        gls.improve(&mut small, 0, &mut create_rng(0));
        assert_eq!(gls.penalties(), &[0, 0]);
    }

    #[test]
    fn test_guided_never_returns_worse() {
        let mut gls = GuidedLocalSearch::new(0.5);
        for seed in 0..4 {
            let mut c = Candidate::new(uf20(), vec![seed % 2 == 1; 20]);
            let before = c.satisfied_count();
            gls.improve(&mut c, 20, &mut create_rng(seed));
            assert!(c.satisfied_count() >= before);
        }
    }
}
