//! Steepest-ascent tabu search over single-variable flips.
//!
//! Every iteration evaluates all `n` flips from the current assignment and
//! takes the best one whose variable is not in the tabu list, even when that
//! move makes things worse. The flipped variable then becomes tabu for
//! `tenure` iterations. The best assignment seen is installed at the end.
//!
//! # References
//!
//! - Glover (1989), "Tabu Search, Part I"
//! - Mazure, Saïs & Grégoire (1997), "Tabu search for SAT"

use std::collections::VecDeque;

use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::Candidate;

/// Tabu search parameters.
///
/// # Examples
///
/// ```
/// use sat_ga::local_search::TabuConfig;
///
/// let config = TabuConfig::default()
///     .with_tenure(7)
///     .with_aspiration(true);
/// assert_eq!(config.tenure, 7);
/// assert!(config.aspiration);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabuConfig {
    /// How many iterations a flipped variable stays tabu. 0 disables the list.
    pub tenure: usize,
    /// Allow a tabu flip when it beats the best count seen so far.
    pub aspiration: bool,
    /// Stop as soon as the chosen move fails to improve on the best.
    pub stop_on_plateau: bool,
}

impl Default for TabuConfig {
    fn default() -> Self {
        Self {
            tenure: 5,
            aspiration: false,
            stop_on_plateau: false,
        }
    }
}

impl TabuConfig {
    pub fn with_tenure(mut self, tenure: usize) -> Self {
        self.tenure = tenure;
        self
    }

    pub fn with_aspiration(mut self, aspiration: bool) -> Self {
        self.aspiration = aspiration;
        self
    }

    pub fn with_stop_on_plateau(mut self, stop: bool) -> Self {
        self.stop_on_plateau = stop;
        self
    }
}

/// Tabu search kernel.
#[derive(Debug, Clone, Default)]
pub struct TabuSearch {
    config: TabuConfig,
}

impl TabuSearch {
    pub fn new(config: TabuConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TabuConfig {
        &self.config
    }
}

impl LocalSearchStrategy for TabuSearch {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, max_iterations: usize, _rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();

        let mut work = candidate.assignment().to_vec();
        let mut best = work.clone();
        let mut best_count = instance.satisfied_count(&work);

        let mut queue: VecDeque<usize> = VecDeque::with_capacity(self.config.tenure + 1);
        let mut is_tabu = vec![false; n];

        for _ in 0..max_iterations {
            if best_count == total {
                break;
            }

            // (variable, resulting count) of the best admissible move
            let mut chosen: Option<(usize, usize)> = None;
            for var in 0..n {
                work[var] = !work[var];
                let count = instance.satisfied_count(&work);
                work[var] = !work[var];

                if is_tabu[var] && !(self.config.aspiration && count > best_count) {
                    continue;
                }
                if chosen.map_or(true, |(_, c)| count > c) {
                    chosen = Some((var, count));
                }
            }

            let Some((var, count)) = chosen else {
                break;
            };
            work[var] = !work[var];

            if self.config.tenure > 0 {
                if queue.len() >= self.config.tenure {
                    if let Some(expired) = queue.pop_front() {
                        is_tabu[expired] = false;
                    }
                }
                queue.push_back(var);
                is_tabu[var] = true;
            }

            if count > best_count {
                best_count = count;
                best.copy_from_slice(&work);
            } else if self.config.stop_on_plateau {
                break;
            }
        }

        install_best(candidate, best);
    }
}
