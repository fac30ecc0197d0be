//! Clause-weighting scores with internal state.
//!
//! Both strategies here update their weights as a side effect of scoring:
//! calling `score` twice on the same candidate can return different values.
//! Each engine worker builds its own instance; never share one across
//! threads.

use super::FitnessFunction;
use crate::model::Candidate;

/// Weights grow ×`growth` for every evaluation that leaves a clause
/// unsatisfied and reset to 1 once the clause has stayed satisfied for a
/// whole history window.
#[derive(Debug, Clone)]
pub struct DynamicWeightFitness {
    history: usize,
    growth: f64,
    weights: Vec<f64>,
    satisfied_streak: Vec<usize>,
}

impl DynamicWeightFitness {
    pub fn new(history: usize) -> Self {
        Self {
            history,
            growth: 1.1,
            weights: Vec::new(),
            satisfied_streak: Vec::new(),
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    fn ensure_len(&mut self, clause_count: usize) {
        if self.weights.len() != clause_count {
            self.weights = vec![1.0; clause_count];
            self.satisfied_streak = vec![0; clause_count];
        }
    }
}

impl FitnessFunction for DynamicWeightFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let instance = candidate.instance();
        self.ensure_len(instance.clause_count());
        let assignment = candidate.assignment();

        let mut score = 0.0;
        for (i, clause) in instance.clauses().iter().enumerate() {
            if clause.is_satisfied(assignment) {
                self.satisfied_streak[i] += 1;
                if self.satisfied_streak[i] >= self.history {
                    self.weights[i] = 1.0;
                }
                score += self.weights[i];
            } else {
                self.satisfied_streak[i] = 0;
                self.weights[i] *= self.growth;
            }
        }
        score
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

/// Satisfied clauses contribute their current weight, which then decays
/// by `rate`; unsatisfied clause weights grow by `rate`.
#[derive(Debug, Clone)]
pub struct AdaptiveFitness {
    initial_weight: f64,
    rate: f64,
    weights: Vec<f64>,
}

impl AdaptiveFitness {
    pub fn new(initial_weight: f64, rate: f64) -> Self {
        Self {
            initial_weight,
            rate,
            weights: Vec::new(),
        }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl FitnessFunction for AdaptiveFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let instance = candidate.instance();
        if self.weights.len() != instance.clause_count() {
            self.weights = vec![self.initial_weight; instance.clause_count()];
        }
        let assignment = candidate.assignment();

        let mut score = 0.0;
        for (clause, weight) in instance.clauses().iter().zip(self.weights.iter_mut()) {
            if clause.is_satisfied(assignment) {
                score += *weight;
                *weight *= 1.0 - self.rate;
            } else {
                *weight *= 1.0 + self.rate;
            }
        }
        score
    }

    fn is_stateful(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clause, Instance};
    use std::sync::Arc;

    fn example() -> Arc<Instance> {
        Arc::new(Instance::new(
            3,
            vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])],
        ))
    }

    #[test]
    fn test_dynamic_weight_grows_for_unsatisfied() {
        let mut f = DynamicWeightFitness::new(10);
        let c = Candidate::new(example(), vec![false, false, false]);
        assert!((f.score(&c) - 1.0).abs() < 1e-12);
        assert!((f.weights()[1] - 1.1).abs() < 1e-12);
        f.score(&c);
        assert!((f.weights()[1] - 1.21).abs() < 1e-12);
        assert!((f.weights()[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_dynamic_weight_resets_after_window() {
        let inst = example();
        let mut f = DynamicWeightFitness::new(2);
        let bad = Candidate::new(inst.clone(), vec![false, false, false]);
        let good = Candidate::new(inst, vec![true, false, true]);
        f.score(&bad);
        f.score(&bad);
        assert!(f.weights()[1] > 1.0);
        // first satisfied evaluation scores the grown weight
        assert!(f.score(&good) > 2.0);
        // second one completes the window
        assert!((f.score(&good) - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_adaptive_scoring_is_not_idempotent() {
        let mut f = AdaptiveFitness::new(1.0, 0.1);
        let c = Candidate::new(example(), vec![false, false, false]);
        let first = f.score(&c);
        let second = f.score(&c);
        assert!((first - 1.0).abs() < 1e-12);
        assert!((second - 0.9).abs() < 1e-12);
        assert!((f.weights()[1] - 1.21).abs() < 1e-12);
        assert!(f.is_stateful());
    }
}
