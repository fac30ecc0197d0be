//! Parent selection.
//!
//! Strategies read the fitness cached on each candidate, so the population
//! must be evaluated first; an unevaluated candidate scores 0. Higher
//! fitness wins.
//!
//! # References
//!
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use log::warn;
use rand::Rng;

use crate::model::Candidate;

/// How parents are drawn from an evaluated population.
///
/// ```
/// use sat_ga::ga::Selection;
///
/// assert_eq!(Selection::default(), Selection::Tournament(3));
/// assert_eq!(Selection::Rank.name(), "Rank");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Best of `k` uniform draws (with replacement). `k = 1` is a uniform
    /// draw; larger `k` narrows the search toward the current leaders.
    Tournament(usize),

    /// Probability proportional to fitness.
    ///
    /// Negative fitness counts as zero. A non-positive total degrades to a
    /// uniform draw and logs a warning.
    Roulette,

    /// Probability proportional to rank: the worst candidate has weight 1,
    /// the best weight `n`.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    pub fn name(&self) -> &'static str {
        match self {
            Selection::Tournament(_) => "Tournament",
            Selection::Roulette => "Roulette",
            Selection::Rank => "Rank",
        }
    }

    /// Draws `count` parents from `population`.
    ///
    /// The returned references point into `population`; clone before
    /// mutating.
    ///
    /// # Panics
    /// Panics if `population` is empty and `count > 0`.
    pub fn select<'a, R: Rng>(
        &self,
        population: &'a [Candidate],
        count: usize,
        rng: &mut R,
    ) -> Vec<&'a Candidate> {
        self.select_indices(population, count, rng)
            .into_iter()
            .map(|i| &population[i])
            .collect()
    }

    /// Draws a single parent index.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select_one<R: Rng>(&self, population: &[Candidate], rng: &mut R) -> usize {
        self.select_indices(population, 1, rng)[0]
    }

    /// Draws `count` parent indices.
    pub fn select_indices<R: Rng>(
        &self,
        population: &[Candidate],
        count: usize,
        rng: &mut R,
    ) -> Vec<usize> {
        if count == 0 {
            return Vec::new();
        }
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => (0..count)
                .map(|_| tournament(population, *k, rng))
                .collect(),
            Selection::Roulette => {
                let weights: Vec<f64> = population.iter().map(|c| c.score().max(0.0)).collect();
                let total: f64 = weights.iter().sum();
                if total <= 0.0 {
                    warn!("roulette selection with non-positive total fitness, drawing uniformly");
                }
                (0..count).map(|_| spin(&weights, total, rng)).collect()
            }
            Selection::Rank => {
                let mut order: Vec<usize> = (0..population.len()).collect();
                order.sort_by(|&a, &b| population[a].score().total_cmp(&population[b].score()));
                let weights: Vec<f64> = (1..=order.len()).map(|r| r as f64).collect();
                let total = (order.len() * (order.len() + 1)) as f64 / 2.0;
                (0..count)
                    .map(|_| order[spin(&weights, total, rng)])
                    .collect()
            }
        }
    }
}

fn tournament<R: Rng>(population: &[Candidate], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut winner = rng.random_range(0..n);
    for _ in 1..k {
        let challenger = rng.random_range(0..n);
        if population[challenger].score() > population[winner].score() {
            winner = challenger;
        }
    }
    winner
}

/// Cumulative-sum draw over `weights`; uniform if `total` is not positive.
fn spin<R: Rng>(weights: &[f64], total: f64, rng: &mut R) -> usize {
    let n = weights.len();
    if n == 1 {
        return 0;
    }
    if total <= 0.0 {
        return rng.random_range(0..n);
    }

    let mut remaining = rng.random_range(0.0..total);
    for (i, &w) in weights.iter().enumerate() {
        if remaining < w {
            return i;
        }
        remaining -= w;
    }
    // rounding
    n - 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Clause, Instance};
    use crate::random::create_rng;
    use std::sync::Arc;

    fn make_population(fitnesses: &[f64]) -> Vec<Candidate> {
        let inst = Arc::new(Instance::new(1, vec![Clause::new(vec![1])]));
        fitnesses
            .iter()
            .map(|&f| {
                let mut c = Candidate::new(inst.clone(), vec![false]);
                c.set_fitness(f);
                c
            })
            .collect()
    }

    fn counts(pop: &[Candidate], sel: Selection, n: usize, seed: u64) -> Vec<u32> {
        let mut rng = create_rng(seed);
        let mut counts = vec![0u32; pop.len()];
        for idx in sel.select_indices(pop, n, &mut rng) {
            counts[idx] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[1.0, 5.0, 10.0, 8.0]);
        let counts = counts(&pop, Selection::Tournament(4), 10_000, 42);
        // Index 2 (fitness=10.0) should dominate
        assert!(
            counts[2] > 6000,
            "expected best to be selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[1.0, 5.0, 10.0, 8.0]);
        let counts = counts(&pop, Selection::Tournament(1), 10_000, 42);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_returns_population_members() {
        let pop = make_population(&[0.9, 0.7, 0.5]);
        let mut rng = create_rng(7);
        for _ in 0..50 {
            let chosen = Selection::Tournament(2).select(&pop, 2, &mut rng);
            assert_eq!(chosen.len(), 2);
            for c in chosen {
                let f = c.score();
                assert!([0.9, 0.7, 0.5].contains(&f), "fabricated fitness {f}");
            }
        }
    }

    #[test]
    fn test_roulette_favors_best() {
        let pop = make_population(&[1.0, 50.0, 100.0, 20.0]);
        let counts = counts(&pop, Selection::Roulette, 10_000, 42);
        assert!(
            counts[2] > counts[0],
            "best should be selected more often: {counts:?}"
        );
    }

    #[test]
    fn test_roulette_ignores_zero_weight() {
        let pop = make_population(&[0.0, 3.0, -2.0]);
        let counts = counts(&pop, Selection::Roulette, 1000, 42);
        assert_eq!(counts, vec![0, 1000, 0]);
    }

    #[test]
    fn test_roulette_zero_total_is_uniform() {
        let pop = make_population(&[0.0, 0.0, 0.0, 0.0]);
        let counts = counts(&pop, Selection::Roulette, 10_000, 42);
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got {counts:?}");
        }
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[1.0, 50.0, 100.0, 20.0]);
        let counts = counts(&pop, Selection::Rank, 10_000, 42);
        // rank weights 1..4 → best ≈ 40%, worst ≈ 10%
        assert!(counts[2] > counts[0], "{counts:?}");
        assert!(counts[0] > 0, "worst must keep a nonzero chance");
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        assert_eq!(Selection::Tournament(3).select_one(&pop, &mut rng), 0);
        assert_eq!(Selection::Roulette.select_one(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select_one(&pop, &mut rng), 0);
    }

    #[test]
    fn test_zero_count_on_empty_population() {
        let pop: Vec<Candidate> = vec![];
        let mut rng = create_rng(42);
        assert!(Selection::Rank.select(&pop, 0, &mut rng).is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<Candidate> = vec![];
        let mut rng = create_rng(42);
        Selection::Tournament(3).select(&pop, 1, &mut rng);
    }
}
