//! Fitness strategies.
//!
//! A fitness function scores a candidate; higher is better. All variants
//! share the [`FitnessFunction`] contract and are collected in the closed
//! [`Fitness`] enum that the engine dispatches on.
//!
//! | Variant | Score | State |
//! |---|---|---|
//! | `MaxSat` | satisfied clauses | none |
//! | `Weighted` | Σ normalized clause weights over satisfied clauses | fixed weights |
//! | `Amplified` | `(satisfied/total)^k` | none |
//! | `Penalty` | `satisfied − f·unsatisfied²` | none |
//! | `VariableConflict` | `satisfied − w·falsified literals` | none |
//! | `DynamicWeight` | Σ weights of satisfied clauses | adaptive |
//! | `MultiObjective` | satisfaction/simplicity blend | none |
//! | `Adaptive` | Σ weights of satisfied clauses | adaptive |
//!
//! Adaptive variants mutate their weights on every call to `score`; callers
//! must not assume scoring is idempotent, and each worker needs its own.

mod adaptive;
mod count;
mod weighted;

pub use adaptive::{AdaptiveFitness, DynamicWeightFitness};
pub use count::{
    AmplifiedFitness, MaxSatFitness, MultiObjectiveFitness, PenaltyFitness,
    VariableConflictFitness,
};
pub use weighted::WeightedFitness;

use crate::model::{Candidate, Instance};

/// Scores a candidate.
pub trait FitnessFunction {
    /// Computes the fitness of `candidate`. Higher is better.
    fn score(&mut self, candidate: &Candidate) -> f64;

    /// Whether scoring mutates internal state.
    fn is_stateful(&self) -> bool {
        false
    }

    /// Scores and caches the result on the candidate.
    fn evaluate(&mut self, candidate: &mut Candidate) -> f64 {
        let f = self.score(candidate);
        candidate.set_fitness(f);
        f
    }
}

/// Fitness variant and its parameters, as configured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitnessKind {
    MaxSat,
    Weighted,
    Amplified { exponent: f64 },
    Penalty { factor: f64 },
    VariableConflict { weight: f64 },
    DynamicWeight { history: usize },
    MultiObjective { satisfaction_weight: f64, simplicity_weight: f64 },
    Adaptive { initial_weight: f64, rate: f64 },
}

impl Default for FitnessKind {
    fn default() -> Self {
        FitnessKind::MaxSat
    }
}

impl FitnessKind {
    /// Amplified with exponent 2.
    pub fn amplified() -> Self {
        FitnessKind::Amplified { exponent: 2.0 }
    }

    /// Penalty with factor 0.5.
    pub fn penalty() -> Self {
        FitnessKind::Penalty { factor: 0.5 }
    }

    pub fn variable_conflict() -> Self {
        FitnessKind::VariableConflict { weight: 0.1 }
    }

    /// Dynamic weighting over a 10-evaluation window.
    pub fn dynamic_weight() -> Self {
        FitnessKind::DynamicWeight { history: 10 }
    }

    /// 0.7 satisfaction, 0.3 simplicity.
    pub fn multi_objective() -> Self {
        FitnessKind::MultiObjective {
            satisfaction_weight: 0.7,
            simplicity_weight: 0.3,
        }
    }

    pub fn adaptive() -> Self {
        FitnessKind::Adaptive {
            initial_weight: 1.0,
            rate: 0.1,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FitnessKind::MaxSat => "MaxSat",
            FitnessKind::Weighted => "Weighted",
            FitnessKind::Amplified { .. } => "Amplified",
            FitnessKind::Penalty { .. } => "Penalty",
            FitnessKind::VariableConflict { .. } => "VariableConflict",
            FitnessKind::DynamicWeight { .. } => "DynamicWeight",
            FitnessKind::MultiObjective { .. } => "MultiObjective",
            FitnessKind::Adaptive { .. } => "Adaptive",
        }
    }

    /// Builds a fresh strategy for `instance`.
    ///
    /// `Weighted` derives its weights from `instance`, so pass the instance
    /// the candidates will actually reference.
    pub fn build(&self, instance: &Instance) -> Fitness {
        match *self {
            FitnessKind::MaxSat => Fitness::MaxSat(MaxSatFitness),
            FitnessKind::Weighted => Fitness::Weighted(WeightedFitness::new(instance)),
            FitnessKind::Amplified { exponent } => {
                Fitness::Amplified(AmplifiedFitness::new(exponent))
            }
            FitnessKind::Penalty { factor } => Fitness::Penalty(PenaltyFitness::new(factor)),
            FitnessKind::VariableConflict { weight } => {
                Fitness::VariableConflict(VariableConflictFitness::new(weight))
            }
            FitnessKind::DynamicWeight { history } => {
                Fitness::DynamicWeight(DynamicWeightFitness::new(history))
            }
            FitnessKind::MultiObjective {
                satisfaction_weight,
                simplicity_weight,
            } => Fitness::MultiObjective(MultiObjectiveFitness::new(
                satisfaction_weight,
                simplicity_weight,
            )),
            FitnessKind::Adaptive {
                initial_weight,
                rate,
            } => Fitness::Adaptive(AdaptiveFitness::new(initial_weight, rate)),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match *self {
            FitnessKind::Amplified { exponent } if !(exponent >= 1.0) => {
                Err(format!("amplification exponent must be >= 1, got {exponent}"))
            }
            FitnessKind::Penalty { factor } if factor < 0.0 => {
                Err(format!("penalty factor must be non-negative, got {factor}"))
            }
            FitnessKind::DynamicWeight { history: 0 } => {
                Err("dynamic weight history must be at least 1".into())
            }
            FitnessKind::Adaptive { rate, .. } if !(0.0..1.0).contains(&rate) => {
                Err(format!("adaptive rate must be in [0, 1), got {rate}"))
            }
            _ => Ok(()),
        }
    }
}

/// A built fitness strategy.
#[derive(Debug, Clone)]
pub enum Fitness {
    MaxSat(MaxSatFitness),
    Weighted(WeightedFitness),
    Amplified(AmplifiedFitness),
    Penalty(PenaltyFitness),
    VariableConflict(VariableConflictFitness),
    DynamicWeight(DynamicWeightFitness),
    MultiObjective(MultiObjectiveFitness),
    Adaptive(AdaptiveFitness),
}

impl FitnessFunction for Fitness {
    fn score(&mut self, candidate: &Candidate) -> f64 {
        match self {
            Fitness::MaxSat(f) => f.score(candidate),
            Fitness::Weighted(f) => f.score(candidate),
            Fitness::Amplified(f) => f.score(candidate),
            Fitness::Penalty(f) => f.score(candidate),
            Fitness::VariableConflict(f) => f.score(candidate),
            Fitness::DynamicWeight(f) => f.score(candidate),
            Fitness::MultiObjective(f) => f.score(candidate),
            Fitness::Adaptive(f) => f.score(candidate),
        }
    }

    fn is_stateful(&self) -> bool {
        matches!(self, Fitness::DynamicWeight(_) | Fitness::Adaptive(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Clause;
    use std::sync::Arc;

    #[test]
    fn test_build_all_kinds() {
        let inst = Arc::new(Instance::new(
            3,
            vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])],
        ));
        let c = Candidate::new(inst.clone(), vec![true, false, true]);
        let kinds = [
            FitnessKind::MaxSat,
            FitnessKind::Weighted,
            FitnessKind::Amplified { exponent: 2.0 },
            FitnessKind::Penalty { factor: 0.5 },
            FitnessKind::VariableConflict { weight: 0.1 },
            FitnessKind::DynamicWeight { history: 10 },
            FitnessKind::MultiObjective {
                satisfaction_weight: 0.7,
                simplicity_weight: 0.3,
            },
            FitnessKind::Adaptive {
                initial_weight: 1.0,
                rate: 0.1,
            },
        ];
        for kind in kinds {
            assert!(kind.validate().is_ok(), "{kind:?}");
            let mut f = kind.build(&inst);
            let mut cand = c.clone();
            let score = f.evaluate(&mut cand);
            assert!(score.is_finite(), "{kind:?} produced {score}");
            assert_eq!(cand.fitness(), Some(score));
        }
    }

    #[test]
    fn test_statefulness_flag() {
        let inst = Instance::new(1, vec![]);
        assert!(!FitnessKind::MaxSat.build(&inst).is_stateful());
        assert!(FitnessKind::DynamicWeight { history: 3 }
            .build(&inst)
            .is_stateful());
        assert!(FitnessKind::Adaptive {
            initial_weight: 1.0,
            rate: 0.1
        }
        .build(&inst)
        .is_stateful());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(FitnessKind::Amplified { exponent: 0.5 }.validate().is_err());
        assert!(FitnessKind::Penalty { factor: -1.0 }.validate().is_err());
        assert!(FitnessKind::DynamicWeight { history: 0 }.validate().is_err());
        assert!(FitnessKind::Adaptive {
            initial_weight: 1.0,
            rate: 1.5
        }
        .validate()
        .is_err());
    }
}
