//! Crossover operators for boolean assignments.
//!
//! # Operators
//!
//! - [`uniform_crossover`]: per-gene coin flip, two complementary children
//! - [`n_point_crossover`]: alternate segments between `n` random cuts
//! - [`clause_biased_crossover`]: sample genes toward the parent that
//!   satisfies the other's failed clauses
//! - local-search hybrid: one uniform child polished by a local search
//!
//! Every child has the parents' length; parents of different lengths are a
//! programming error and panic.
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - De Jong & Spears (1992), "A formal analysis of the role of multi-point
//!   crossover in genetic algorithms"

use rand::Rng;

use crate::error::{Result, SatGaError};
use crate::local_search::{LocalSearch, LocalSearchKind, LocalSearchStrategy};
use crate::model::{Candidate, Instance};

// ============================================================================
// Gene-level operators
// ============================================================================

/// Uniform crossover.
///
/// At every position a coin decides which parent feeds the first child; the
/// second child takes the other parent's gene.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn uniform_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    parent1
        .iter()
        .zip(parent2)
        .map(|(&a, &b)| if rng.random_bool(0.5) { (a, b) } else { (b, a) })
        .unzip()
}

/// N-point crossover.
///
/// Draws `n` cut points in `0..len` (with replacement), sorts them and
/// appends `len`. Segments between consecutive cuts are copied alternately:
/// the first child starts with `parent1`, the second with `parent2`, and the
/// sources swap at every cut.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn n_point_crossover<R: Rng>(
    parent1: &[bool],
    parent2: &[bool],
    n: usize,
    rng: &mut R,
) -> (Vec<bool>, Vec<bool>) {
    let len = parent1.len();
    assert_eq!(len, parent2.len(), "parents must have equal length");
    if len == 0 {
        return (Vec::new(), Vec::new());
    }

    let mut cuts: Vec<usize> = (0..n).map(|_| rng.random_range(0..len)).collect();
    cuts.sort_unstable();
    cuts.push(len);

    let mut child1 = Vec::with_capacity(len);
    let mut child2 = Vec::with_capacity(len);
    let (mut top, mut bottom) = (parent1, parent2);
    let mut start = 0;
    for cut in cuts {
        child1.extend_from_slice(&top[start..cut]);
        child2.extend_from_slice(&bottom[start..cut]);
        start = cut;
        std::mem::swap(&mut top, &mut bottom);
    }
    (child1, child2)
}

/// Clause-satisfaction-biased crossover.
///
/// Each variable starts with a preference of 0.5 for `parent2`'s gene.
/// Every clause that `parent2` satisfies and `parent1` does not adds 0.1 for
/// each of its variables; every clause satisfied only by `parent1`
/// subtracts 0.1. The child takes `parent2`'s gene with the clamped
/// preference as probability and `parent1`'s otherwise.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn clause_biased_crossover<R: Rng>(
    instance: &Instance,
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> Vec<bool> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    const NUDGE: f64 = 0.1;

    let mut preference = vec![0.5; parent1.len()];
    for clause in instance.clauses() {
        let sat1 = clause.is_satisfied(parent1);
        let sat2 = clause.is_satisfied(parent2);
        let delta = match (sat1, sat2) {
            (false, true) => NUDGE,
            (true, false) => -NUDGE,
            _ => continue,
        };
        for var in clause.variables() {
            preference[var] += delta;
        }
    }

    preference
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            if rng.random::<f64>() < p.clamp(0.0, 1.0) {
                parent2[i]
            } else {
                parent1[i]
            }
        })
        .collect()
}

// ============================================================================
// Strategy
// ============================================================================

/// Crossover variant, as configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverKind {
    /// Two complementary children.
    #[default]
    Uniform,
    /// Two children from `n` cut points.
    NPoint(usize),
    /// One child; skips with probability `1 − crossover_rate`.
    ClauseBiased,
    /// One uniform child improved by the configured local search; skips
    /// with probability `1 − crossover_rate`.
    LocalSearchHybrid,
}

impl CrossoverKind {
    pub fn name(&self) -> &'static str {
        match self {
            CrossoverKind::Uniform => "Uniform",
            CrossoverKind::NPoint(_) => "NPoint",
            CrossoverKind::ClauseBiased => "Clause",
            CrossoverKind::LocalSearchHybrid => "LocalSearch",
        }
    }

    /// Builds the operator.
    ///
    /// The hybrid variant builds its own kernel from `local_search` and
    /// fails with [`SatGaError::MissingLocalSearch`] when none is given.
    pub fn build(
        &self,
        crossover_rate: f64,
        local_search: Option<&LocalSearchKind>,
        local_search_iterations: usize,
    ) -> Result<Crossover> {
        Ok(match *self {
            CrossoverKind::Uniform => Crossover::Uniform,
            CrossoverKind::NPoint(n) => Crossover::NPoint(n),
            CrossoverKind::ClauseBiased => Crossover::ClauseBiased { crossover_rate },
            CrossoverKind::LocalSearchHybrid => {
                let kind = local_search.ok_or(SatGaError::MissingLocalSearch)?;
                Crossover::LocalSearchHybrid {
                    crossover_rate,
                    local_search: kind.build(),
                    iterations: local_search_iterations,
                }
            }
        })
    }
}

/// A built crossover operator.
#[derive(Debug, Clone)]
pub enum Crossover {
    Uniform,
    NPoint(usize),
    ClauseBiased {
        crossover_rate: f64,
    },
    LocalSearchHybrid {
        crossover_rate: f64,
        local_search: LocalSearch,
        iterations: usize,
    },
}

impl Crossover {
    /// Combines two parents into one or two fresh, unevaluated children.
    ///
    /// # Panics
    /// Panics if the parents' assignments differ in length.
    pub fn crossover<R: Rng>(
        &mut self,
        parent1: &Candidate,
        parent2: &Candidate,
        rng: &mut R,
    ) -> Vec<Candidate> {
        let instance = parent1.instance();
        let make = |genes: Vec<bool>| Candidate::new(instance.clone(), genes);

        match self {
            Crossover::Uniform => {
                let (a, b) = uniform_crossover(parent1.assignment(), parent2.assignment(), rng);
                vec![make(a), make(b)]
            }
            Crossover::NPoint(n) => {
                let (a, b) =
                    n_point_crossover(parent1.assignment(), parent2.assignment(), *n, rng);
                vec![make(a), make(b)]
            }
            Crossover::ClauseBiased { crossover_rate } => {
                if let Some(clone) = skip(*crossover_rate, parent1, parent2, rng) {
                    return vec![make(clone)];
                }
                vec![make(clause_biased_crossover(
                    instance,
                    parent1.assignment(),
                    parent2.assignment(),
                    rng,
                ))]
            }
            Crossover::LocalSearchHybrid {
                crossover_rate,
                local_search,
                iterations,
            } => {
                if let Some(clone) = skip(*crossover_rate, parent1, parent2, rng) {
                    return vec![make(clone)];
                }
                let (genes, _) = uniform_crossover(parent1.assignment(), parent2.assignment(), rng);
                let mut child = make(genes);
                local_search.improve(&mut child, *iterations, rng);
                vec![child]
            }
        }
    }
}

/// With probability `1 − rate`, returns a copy of a random parent's genes.
fn skip<R: Rng>(
    rate: f64,
    parent1: &Candidate,
    parent2: &Candidate,
    rng: &mut R,
) -> Option<Vec<bool>> {
    assert_eq!(
        parent1.len(),
        parent2.len(),
        "parents must have equal length"
    );
    if rng.random::<f64>() > rate {
        let source = if rng.random_bool(0.5) { parent1 } else { parent2 };
        Some(source.assignment().to_vec())
    } else {
        None
    }
}
