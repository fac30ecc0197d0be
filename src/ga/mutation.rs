//! Mutation strategies.
//!
//! All mutations act in place on a child's assignment and clear its cached
//! fitness.

use rand::seq::index;
use rand::Rng;

use crate::model::{variable_index, Candidate};

/// Mutation strategy.
///
/// # Examples
///
/// ```
/// use sat_ga::ga::MutationKind;
///
/// let m = MutationKind::NBit(2);
/// assert_eq!(m.name(), "NBit");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MutationKind {
    /// Flip each gene independently with probability `rate`.
    #[default]
    BitFlip,
    /// Flip exactly `n` distinct genes chosen uniformly; `rate` is ignored.
    NBit(usize),
    /// Flip one variable of one random non-empty unsatisfied clause; `rate`
    /// is ignored. No-op when every unsatisfied clause is empty.
    Guided,
}

impl MutationKind {
    pub fn name(&self) -> &'static str {
        match self {
            MutationKind::BitFlip => "BitFlip",
            MutationKind::NBit(_) => "NBit",
            MutationKind::Guided => "Guided",
        }
    }

    /// Mutates `candidate` in place.
    pub fn mutate<R: Rng>(&self, candidate: &mut Candidate, rate: f64, rng: &mut R) {
        match *self {
            MutationKind::BitFlip => {
                let rate = rate.clamp(0.0, 1.0);
                for gene in candidate.assignment_mut() {
                    if rng.random_bool(rate) {
                        *gene = !*gene;
                    }
                }
            }
            MutationKind::NBit(n) => {
                let len = candidate.len();
                let amount = n.min(len);
                if amount == 0 {
                    return;
                }
                let genes = candidate.assignment_mut();
                for var in index::sample(rng, len, amount) {
                    genes[var] = !genes[var];
                }
            }
            MutationKind::Guided => {
                // empty clauses have no variable to flip
                let unsatisfied: Vec<_> = candidate
                    .unsatisfied_clauses()
                    .into_iter()
                    .filter(|c| !c.is_empty())
                    .collect();
                if unsatisfied.is_empty() {
                    return;
                }
                let clause = unsatisfied[rng.random_range(0..unsatisfied.len())];
                let literal = clause.literals()[rng.random_range(0..clause.len())];
                let var = variable_index(literal);
                candidate.flip(var);
            }
        }
    }
}
