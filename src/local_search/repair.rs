//! Clause-directed repair.

use rand::Rng;

use super::{install_best, LocalSearchStrategy};
use crate::model::Candidate;

/// One pass over the variables of the currently unsatisfied clauses.
///
/// Each distinct variable is tried once, in clause order; the flip is kept
/// unless it lowers the satisfied count. The iteration budget is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClauseRepair;

impl LocalSearchStrategy for ClauseRepair {
    fn improve<R: Rng>(&mut self, candidate: &mut Candidate, _max_iterations: usize, _rng: &mut R) {
        let n = candidate.len();
        if n == 0 {
            return;
        }
        let instance = candidate.instance().clone();
        let total = instance.clause_count();
        let mut work = candidate.assignment().to_vec();

        let mut seen = vec![false; n];
        let mut targets = Vec::new();
        for clause in instance.unsatisfied_clauses(&work) {
            for var in clause.variables() {
                if !seen[var] {
                    seen[var] = true;
                    targets.push(var);
                }
            }
        }

        let mut current = instance.satisfied_count(&work);
        for var in targets {
            if current == total {
                break;
            }
            work[var] = !work[var];
            let count = instance.satisfied_count(&work);
            if count >= current {
                current = count;
            } else {
                work[var] = !work[var];
            }
        }

        install_best(candidate, work);
    }
}
