//! Stateless scores derived from the satisfied-clause count.

use super::FitnessFunction;
use crate::model::{literal_holds, Candidate};

/// Number of satisfied clauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxSatFitness;

impl FitnessFunction for MaxSatFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        candidate.satisfied_count() as f64
    }
}

/// `(satisfied / total)^k`.
///
/// Compresses the landscape so only near-complete assignments score
/// highly. An instance without clauses scores 1.
#[derive(Debug, Clone, Copy)]
pub struct AmplifiedFitness {
    exponent: f64,
}

impl AmplifiedFitness {
    pub fn new(exponent: f64) -> Self {
        Self { exponent }
    }
}

impl FitnessFunction for AmplifiedFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let total = candidate.instance().clause_count();
        if total == 0 {
            return 1.0;
        }
        (candidate.satisfied_count() as f64 / total as f64).powf(self.exponent)
    }
}

/// `satisfied − factor · unsatisfied²`.
#[derive(Debug, Clone, Copy)]
pub struct PenaltyFitness {
    factor: f64,
}

impl PenaltyFitness {
    pub fn new(factor: f64) -> Self {
        Self { factor }
    }
}

impl FitnessFunction for PenaltyFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let satisfied = candidate.satisfied_count();
        let unsatisfied = (candidate.instance().clause_count() - satisfied) as f64;
        satisfied as f64 - self.factor * unsatisfied * unsatisfied
    }
}

/// `satisfied − weight · falsified literal occurrences`.
///
/// Two assignments with the same clause count are told apart by how many
/// literals still disagree with them.
#[derive(Debug, Clone, Copy)]
pub struct VariableConflictFitness {
    weight: f64,
}

impl VariableConflictFitness {
    pub fn new(weight: f64) -> Self {
        Self { weight }
    }
}

impl FitnessFunction for VariableConflictFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let assignment = candidate.assignment();
        let mut satisfied = 0usize;
        let mut conflicts = 0usize;
        for clause in candidate.instance().clauses() {
            let falsified = clause
                .literals()
                .iter()
                .filter(|&&l| !literal_holds(l, assignment))
                .count();
            if falsified < clause.len() {
                satisfied += 1;
            }
            conflicts += falsified;
        }
        satisfied as f64 - self.weight * conflicts as f64
    }
}

/// Weighted blend of satisfaction ratio and assignment simplicity.
///
/// Simplicity is `1 − polarity changes between neighbouring genes / length`.
#[derive(Debug, Clone, Copy)]
pub struct MultiObjectiveFitness {
    satisfaction_weight: f64,
    simplicity_weight: f64,
}

impl MultiObjectiveFitness {
    pub fn new(satisfaction_weight: f64, simplicity_weight: f64) -> Self {
        Self {
            satisfaction_weight,
            simplicity_weight,
        }
    }
}

impl FitnessFunction for MultiObjectiveFitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        let total = candidate.instance().clause_count();
        let satisfaction = if total == 0 {
            1.0
        } else {
            candidate.satisfied_count() as f64 / total as f64
        };

        let genes = candidate.assignment();
        let simplicity = if genes.is_empty() {
            1.0
        } else {
            let changes = genes.windows(2).filter(|w| w[0] != w[1]).count();
            1.0 - changes as f64 / genes.len() as f64
        };

        self.satisfaction_weight * satisfaction + self.simplicity_weight * simplicity
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
    fn test_maxsat_counts() {
        let c = Candidate::new(example(), vec![false, false, false]);
        assert_eq!(MaxSatFitness.score(&c), 1.0);
    }

    #[test]
    fn test_amplified() {
        let c = Candidate::new(example(), vec![false, false, false]);
        let mut f = AmplifiedFitness::new(2.0);
        assert!((f.score(&c) - 0.25).abs() < 1e-12);
        let full = Candidate::new(example(), vec![true, false, true]);
        assert!((f.score(&full) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_amplified_empty_instance() {
        let c = Candidate::new(Arc::new(Instance::new(1, vec![])), vec![true]);
        assert_eq!(AmplifiedFitness::new(3.0).score(&c), 1.0);
    }

    #[test]
    fn test_penalty() {
        let c = Candidate::new(example(), vec![false, false, false]);
        // 1 satisfied, 1 unsatisfied: 1 - 0.5 * 1
        assert!((PenaltyFitness::new(0.5).score(&c) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_variable_conflict() {
        // [F,F,F]: clause 1 literals (1 false, -2 true), clause 2 (2 false, 3 false)
        let c = Candidate::new(example(), vec![false, false, false]);
        let score = VariableConflictFitness::new(0.1).score(&c);
        assert!((score - (1.0 - 0.3)).abs() < 1e-12);
    }

    #[test]
    fn test_multi_objective() {
        let c = Candidate::new(example(), vec![true, false, true]);
        // satisfaction 1.0, two polarity changes over three genes
        let expected = 0.7 + 0.3 * (1.0 - 2.0 / 3.0);
        assert!((MultiObjectiveFitness::new(0.7, 0.3).score(&c) - expected).abs() < 1e-12);
    }
}
