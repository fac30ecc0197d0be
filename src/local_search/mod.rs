//! Local-search kernels.
//!
//! Every kernel improves a single candidate in place over single-variable
//! flips, using the raw satisfied-clause count as its objective. Kernels
//! track the best assignment they visit and install it before returning, so
//! a kernel never hands back a candidate with fewer satisfied clauses than
//! it received.
//!
//! | Kernel | Move rule | State across calls |
//! |---|---|---|
//! | [`HillClimbing`] | random flip, keep if not worse | none |
//! | [`TabuSearch`] | best non-tabu flip, even if worse | none |
//! | [`SimulatedAnnealing`] | random flip, Metropolis acceptance | none |
//! | [`VariableNeighborhoodSearch`] | shake `k` flips, descend | none |
//! | [`GuidedLocalSearch`] | sweep on penalty-augmented objective | penalties |
//! | [`IteratedLocalSearch`] | perturb best, rerun inner kernel | inner kernel's |
//! | [`ClauseRepair`] | flip variables of violated clauses once | none |
//!
//! # References
//!
//! - Hoos & Stützle (2004), *Stochastic Local Search: Foundations and
//!   Applications*

mod annealing;
mod guided;
mod hill_climbing;
mod iterated;
mod repair;
mod tabu;
mod vns;

pub use annealing::{AnnealingConfig, CoolingSchedule, SimulatedAnnealing};
pub use guided::GuidedLocalSearch;
pub use hill_climbing::HillClimbing;
pub use iterated::IteratedLocalSearch;
pub use repair::ClauseRepair;
pub use tabu::{TabuConfig, TabuSearch};
pub use vns::VariableNeighborhoodSearch;

use log::{log_enabled, trace, Level};
use rand::Rng;

use crate::model::Candidate;

/// Improves a candidate in place.
pub trait LocalSearchStrategy {
    /// Runs at most `max_iterations` iterations on `candidate`.
    ///
    /// On return the candidate holds the best assignment visited. Its cached
    /// fitness is cleared whenever the assignment changed.
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R);
}

/// Installs `best` unless it equals the current assignment, which keeps the
/// cached fitness of an unchanged candidate.
fn install_best(candidate: &mut Candidate, best: Vec<bool>) {
    if candidate.assignment() != best.as_slice() {
        candidate.set_assignment(best);
    }
}

// ============================================================================
// Configuration
// ============================================================================

/// Local-search variant and its parameters, as configured.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LocalSearchKind {
    HillClimbing,
    Tabu(TabuConfig),
    SimulatedAnnealing(AnnealingConfig),
    VariableNeighborhood {
        neighborhoods: usize,
    },
    GuidedLocalSearch {
        lambda: f64,
    },
    IteratedLocalSearch {
        inner: Box<LocalSearchKind>,
        strength: f64,
        inner_iterations: usize,
    },
    ClauseRepair,
}

impl LocalSearchKind {
    /// Tabu search with the given tenure and otherwise default settings.
    pub fn tabu(tenure: usize) -> Self {
        LocalSearchKind::Tabu(TabuConfig::default().with_tenure(tenure))
    }

    /// Variable neighbourhood search over 3 neighbourhoods.
    pub fn variable_neighborhood() -> Self {
        LocalSearchKind::VariableNeighborhood { neighborhoods: 3 }
    }

    /// Guided local search with λ = 0.1.
    pub fn guided() -> Self {
        LocalSearchKind::GuidedLocalSearch { lambda: 0.1 }
    }

    /// Iterated local search around `inner`, perturbing 10% of the
    /// variables and giving the inner kernel 100 iterations per call.
    pub fn iterated(inner: LocalSearchKind) -> Self {
        LocalSearchKind::IteratedLocalSearch {
            inner: Box::new(inner),
            strength: 0.1,
            inner_iterations: 100,
        }
    }

    /// Short display name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            LocalSearchKind::HillClimbing => "HillClimbing",
            LocalSearchKind::Tabu(_) => "Tabu",
            LocalSearchKind::SimulatedAnnealing(_) => "SimulatedAnnealing",
            LocalSearchKind::VariableNeighborhood { .. } => "VariableNeighborhood",
            LocalSearchKind::GuidedLocalSearch { .. } => "GuidedLocalSearch",
            LocalSearchKind::IteratedLocalSearch { .. } => "IteratedLocalSearch",
            LocalSearchKind::ClauseRepair => "ClauseSearch",
        }
    }

    /// Builds a fresh kernel with empty state.
    pub fn build(&self) -> LocalSearch {
        match self {
            LocalSearchKind::HillClimbing => LocalSearch::HillClimbing(HillClimbing),
            LocalSearchKind::Tabu(config) => LocalSearch::Tabu(TabuSearch::new(*config)),
            LocalSearchKind::SimulatedAnnealing(config) => {
                LocalSearch::SimulatedAnnealing(SimulatedAnnealing::new(*config))
            }
            LocalSearchKind::VariableNeighborhood { neighborhoods } => {
                LocalSearch::VariableNeighborhood(VariableNeighborhoodSearch::new(*neighborhoods))
            }
            LocalSearchKind::GuidedLocalSearch { lambda } => {
                LocalSearch::Guided(GuidedLocalSearch::new(*lambda))
            }
            LocalSearchKind::IteratedLocalSearch {
                inner,
                strength,
                inner_iterations,
            } => LocalSearch::Iterated(IteratedLocalSearch::new(
                inner.build(),
                *strength,
                *inner_iterations,
            )),
            LocalSearchKind::ClauseRepair => LocalSearch::ClauseRepair(ClauseRepair),
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            LocalSearchKind::SimulatedAnnealing(config) => config.validate(),
            LocalSearchKind::VariableNeighborhood { neighborhoods: 0 } => {
                Err("variable neighborhood search needs at least one neighborhood".into())
            }
            LocalSearchKind::GuidedLocalSearch { lambda } if *lambda < 0.0 => {
                Err(format!("guided local search lambda must be non-negative, got {lambda}"))
            }
            LocalSearchKind::IteratedLocalSearch {
                inner,
                strength,
                inner_iterations,
            } => {
                if !(*strength > 0.0 && *strength <= 1.0) {
                    return Err(format!("perturbation strength must be in (0, 1], got {strength}"));
                }
                if *inner_iterations == 0 {
                    return Err("inner_iterations must be at least 1".into());
                }
                inner.validate()
            }
            _ => Ok(()),
        }
    }
}

// ============================================================================
// Built kernels
// ============================================================================

/// A built local-search kernel.
#[derive(Debug, Clone)]
pub enum LocalSearch {
    HillClimbing(HillClimbing),
    Tabu(TabuSearch),
    SimulatedAnnealing(SimulatedAnnealing),
    VariableNeighborhood(VariableNeighborhoodSearch),
    Guided(GuidedLocalSearch),
    Iterated(IteratedLocalSearch),
    ClauseRepair(ClauseRepair),
}

impl LocalSearchStrategy for LocalSearch {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, rng: &mut R) {
        let before = log_enabled!(Level::Trace).then(|| candidate.satisfied_count());
        match self {
            LocalSearch::HillClimbing(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::Tabu(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::SimulatedAnnealing(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::VariableNeighborhood(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::Guided(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::Iterated(ls) => ls.improve(candidate, max_iterations, rng),
            LocalSearch::ClauseRepair(ls) => ls.improve(candidate, max_iterations, rng),
        }
        if let Some(before) = before {
            trace!(
                "{}: {} -> {} satisfied",
                self.name(),
                before,
                candidate.satisfied_count()
            );
        }
    }
}

impl LocalSearch {
    pub fn name(&self) -> &'static str {
        match self {
            LocalSearch::HillClimbing(_) => "HillClimbing",
            LocalSearch::Tabu(_) => "Tabu",
            LocalSearch::SimulatedAnnealing(_) => "SimulatedAnnealing",
            LocalSearch::VariableNeighborhood(_) => "VariableNeighborhood",
            LocalSearch::Guided(_) => "GuidedLocalSearch",
            LocalSearch::Iterated(_) => "IteratedLocalSearch",
            LocalSearch::ClauseRepair(_) => "ClauseSearch",
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::model::{Clause, Instance};
    use crate::random::create_rng;
    use proptest::prelude::*;
    use rand::seq::index;
    use std::sync::Arc;

    /// `(x1 ∨ x2) ∧ (x1 ∨ ¬x2) ∧ (¬x1 ∨ x2)`, satisfied only by `[true, true]`.
    pub(crate) fn small_instance() -> Arc<Instance> {
        Arc::new(Instance::new(
            2,
            vec![
                Clause::new(vec![1, 2]),
                Clause::new(vec![1, -2]),
                Clause::new(vec![-1, 2]),
            ],
        ))
    }

    /// Random 3-SAT instance with a planted solution.
    pub(crate) fn planted_3sat(variables: usize, clauses: usize, seed: u64) -> Arc<Instance> {
        let mut rng = create_rng(seed);
        let planted: Vec<bool> = (0..variables).map(|_| rng.random_bool(0.5)).collect();
        let mut out = Vec::with_capacity(clauses);
        while out.len() < clauses {
            let lits: Vec<i32> = index::sample(&mut rng, variables, 3)
                .into_iter()
                .map(|v| {
                    let var = v as i32 + 1;
                    if rng.random_bool(0.5) {
                        var
                    } else {
                        -var
                    }
                })
                .collect();
            let clause = Clause::new(lits);
            if clause.is_satisfied(&planted) {
                out.push(clause);
            }
        }
        Arc::new(Instance::new(variables, out))
    }

    /// 20 variables, 91 clauses, satisfiable.
    pub(crate) fn uf20() -> Arc<Instance> {
        planted_3sat(20, 91, 2024)
    }

    pub(crate) fn all_kinds() -> Vec<LocalSearchKind> {
        vec![
            LocalSearchKind::HillClimbing,
            LocalSearchKind::tabu(5),
            LocalSearchKind::SimulatedAnnealing(AnnealingConfig::default()),
            LocalSearchKind::variable_neighborhood(),
            LocalSearchKind::guided(),
            LocalSearchKind::iterated(LocalSearchKind::HillClimbing),
            LocalSearchKind::ClauseRepair,
        ]
    }

    #[test]
    fn test_planted_instance_is_satisfiable_shape() {
        let inst = uf20();
        assert_eq!(inst.variable_count(), 20);
        assert_eq!(inst.clause_count(), 91);
        assert!(inst.clauses().iter().all(|c| c.len() == 3));
    }

    #[test]
    fn test_all_kinds_validate_and_build() {
        for kind in all_kinds() {
            assert!(kind.validate().is_ok(), "{}", kind.name());
            let mut ls = kind.build();
            let mut c = Candidate::new(small_instance(), vec![false, false]);
            ls.improve(&mut c, 50, &mut create_rng(42));
            assert!(c.satisfied_count() >= 2, "{}", kind.name());
        }
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        assert!(LocalSearchKind::VariableNeighborhood { neighborhoods: 0 }
            .validate()
            .is_err());
        assert!(LocalSearchKind::GuidedLocalSearch { lambda: -1.0 }
            .validate()
            .is_err());
        let bad_inner = LocalSearchKind::iterated(LocalSearchKind::SimulatedAnnealing(
            AnnealingConfig::default().with_cooling_rate(2.0),
        ));
        assert!(bad_inner.validate().is_err());
        let bad_strength = LocalSearchKind::IteratedLocalSearch {
            inner: Box::new(LocalSearchKind::HillClimbing),
            strength: 0.0,
            inner_iterations: 10,
        };
        assert!(bad_strength.validate().is_err());
    }

    #[test]
    fn test_unchanged_candidate_keeps_fitness() {
        let mut c = Candidate::new(small_instance(), vec![true, true]);
        c.set_fitness(3.0);
        for kind in all_kinds() {
            kind.build().improve(&mut c, 10, &mut create_rng(1));
            assert_eq!(c.fitness(), Some(3.0), "{}", kind.name());
        }
    }

    #[test]
    fn test_empty_candidate_is_noop() {
        let inst = Arc::new(Instance::new(0, vec![]));
        for kind in all_kinds() {
            let mut c = Candidate::new(inst.clone(), vec![]);
            kind.build().improve(&mut c, 10, &mut create_rng(1));
            assert!(c.is_empty());
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_local_search_never_worsens(
            seed in 0u64..1000,
            kind_index in 0usize..7,
            start in prop::collection::vec(any::<bool>(), 12),
        ) {
            let inst = planted_3sat(12, 50, seed);
            let mut c = Candidate::new(inst, start);
            let before = c.satisfied_count();
            let mut ls = all_kinds()[kind_index].build();
            ls.improve(&mut c, 20, &mut create_rng(seed));
            prop_assert!(c.satisfied_count() >= before);
            prop_assert_eq!(c.len(), 12);
        }
    }
}
