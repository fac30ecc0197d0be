//! SAT instances and pure-literal simplification.

use super::clause::Clause;
use super::stats::ClauseStatistics;

/// An immutable CNF formula: a variable count and an ordered clause list.
///
/// Clause order is the clause index used by fitness weights and
/// diagnostics. Instances are shared read-only between candidates and
/// worker threads (wrap them in an `Arc`).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instance {
    variable_count: usize,
    clauses: Vec<Clause>,
}

impl Instance {
    /// Creates an instance.
    ///
    /// Literals are trusted to lie in `1..=variable_count`; the DIMACS
    /// reader is where that is checked.
    pub fn new(variable_count: usize, clauses: Vec<Clause>) -> Self {
        debug_assert!(
            clauses.iter().all(|c| c.max_variable() <= variable_count),
            "literal exceeds variable count"
        );
        Self {
            variable_count,
            clauses,
        }
    }

    pub fn variable_count(&self) -> usize {
        self.variable_count
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn clause_count(&self) -> usize {
        self.clauses.len()
    }

    pub fn satisfied_count(&self, assignment: &[bool]) -> usize {
        self.clauses
            .iter()
            .filter(|c| c.is_satisfied(assignment))
            .count()
    }

    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.clauses.iter().all(|c| c.is_satisfied(assignment))
    }

    /// Clauses falsified by `assignment`, in clause order.
    pub fn unsatisfied_clauses<'a>(&'a self, assignment: &'a [bool]) -> impl Iterator<Item = &'a Clause> + 'a {
        self.clauses.iter().filter(move |c| !c.is_satisfied(assignment))
    }

    /// Indices of the clauses falsified by `assignment`.
    pub fn unsatisfied_indices(&self, assignment: &[bool]) -> Vec<usize> {
        self.clauses
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_satisfied(assignment))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn statistics(&self) -> ClauseStatistics {
        ClauseStatistics::new(self)
    }

    /// Fixes every pure variable and drops the clauses mentioning one.
    ///
    /// Returns a new instance over the same variables; `self` is untouched
    /// and remains the reference for final verification. Purity is judged
    /// once on `self`, not iterated to a fixpoint.
    pub fn simplify_pure(&self) -> Simplified {
        let fixed = self.statistics().pure_variables();
        let mut is_fixed = vec![false; self.variable_count];
        for &(var, _) in &fixed {
            is_fixed[var] = true;
        }

        let clauses = self
            .clauses
            .iter()
            .filter(|c| !c.variables().any(|v| is_fixed[v]))
            .cloned()
            .collect();

        Simplified {
            instance: Instance::new(self.variable_count, clauses),
            fixed,
        }
    }
}

/// Result of [`Instance::simplify_pure`].
#[derive(Debug, Clone)]
pub struct Simplified {
    /// The working instance with pure-variable clauses removed.
    pub instance: Instance,
    /// `(zero-based variable, value)` pairs to re-apply to a final answer.
    pub fixed: Vec<(usize, bool)>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `p cnf 3 2 / 1 -2 0 / 2 3 0`
    fn example() -> Instance {
        Instance::new(3, vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])])
    }

    #[test]
    fn test_fully_satisfied_example() {
        let inst = example();
        let a = [true, false, true];
        assert_eq!(inst.satisfied_count(&a), 2);
        assert!(inst.is_satisfied(&a));
        assert_eq!(inst.unsatisfied_clauses(&a).count(), 0);
    }

    #[test]
    fn test_partially_satisfied_example() {
        let inst = example();
        let a = [false, false, false];
        assert_eq!(inst.satisfied_count(&a), 1);
        assert!(!inst.is_satisfied(&a));
        assert_eq!(inst.unsatisfied_indices(&a), vec![1]);
        let unsat: Vec<&Clause> = inst.unsatisfied_clauses(&a).collect();
        assert_eq!(unsat[0].literals(), &[2, 3]);
    }

    #[test]
    fn test_simplify_pure_keeps_original() {
        let inst = example();
        let simplified = inst.simplify_pure();
        // x1 only positive, x3 only positive: both clauses go
        assert_eq!(simplified.fixed, vec![(0, true), (2, true)]);
        assert_eq!(simplified.instance.clause_count(), 0);
        assert_eq!(simplified.instance.variable_count(), 3);
        assert_eq!(inst.clause_count(), 2);
    }

    #[test]
    fn test_simplify_pure_is_satisfiability_preserving() {
        let inst = Instance::new(
            3,
            vec![
                Clause::new(vec![1, -2]),
                Clause::new(vec![-1, 2]),
                Clause::new(vec![2, -3]),
            ],
        );
        let simplified = inst.simplify_pure();
        assert_eq!(simplified.fixed, vec![(2, false)]);
        assert_eq!(simplified.instance.clause_count(), 2);

        // Any model of the working instance plus the fixed values models the original
        let mut a = vec![true, true, true];
        assert!(simplified.instance.is_satisfied(&a));
        for &(v, value) in &simplified.fixed {
            a[v] = value;
        }
        assert!(inst.is_satisfied(&a));
    }

    #[test]
    fn test_empty_instance_trivially_satisfied() {
        let inst = Instance::new(2, vec![]);
        assert!(inst.is_satisfied(&[false, false]));
        assert_eq!(inst.satisfied_count(&[true, true]), 0);
    }
}
