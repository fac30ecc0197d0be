//! Structure-weighted MAX-SAT score.

use super::FitnessFunction;
use crate::model::{Candidate, Instance};

/// Sum of precomputed clause weights over satisfied clauses.
///
/// Each clause gets
///
/// ```text
/// w = 1 + 1/len + Σ_lit 1/(freq(var) + 1) + 0.5 · |pos − neg|
/// ```
///
/// so clauses over rarely occurring variables and clauses with lopsided
/// polarity count more. Weights are normalized to sum to 1 and fixed at
/// construction.
#[derive(Debug, Clone)]
pub struct WeightedFitness {
    weights: Vec<f64>,
}

impl WeightedFitness {
    pub fn new(instance: &Instance) -> Self {
        let stats = instance.statistics();
        let mut weights: Vec<f64> = instance
            .clauses()
            .iter()
            .map(|clause| {
                let len = clause.len();
                let mut w = 1.0;
                if len > 0 {
                    w += 1.0 / len as f64;
                }
                for var in clause.variables() {
                    w += 1.0 / (stats.get(var).total() as f64 + 1.0);
                }
                let pos = clause.positive_count() as f64;
                let neg = len as f64 - pos;
                w + (pos - neg).abs() * 0.5
            })
            .collect();

        let sum: f64 = weights.iter().sum();
        if sum > 0.0 {
            for w in &mut weights {
                *w /= sum;
            }
        }
        Self { weights }
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }
}

impl FitnessFunction for WeightedFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let assignment = candidate.assignment();
        candidate
            .instance()
            .clauses()
            .iter()
            .zip(&self.weights)
            .filter(|(c, _)| c.is_satisfied(assignment))
            .map(|(_, w)| w)
            .sum()
    }
}
