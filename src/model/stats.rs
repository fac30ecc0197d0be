//! Per-variable literal statistics.

use super::instance::Instance;

/// Positive and negative occurrence counts of one variable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariableStats {
    pub positive: usize,
    pub negative: usize,
}

impl VariableStats {
    pub fn total(&self) -> usize {
        self.positive + self.negative
    }

    /// Occurs, but with one polarity only.
    pub fn is_pure(&self) -> bool {
        self.total() > 0 && (self.positive == 0 || self.negative == 0)
    }

    /// Share of positive occurrences, `None` for an unused variable.
    pub fn positive_ratio(&self) -> Option<f64> {
        match self.total() {
            0 => None,
            t => Some(self.positive as f64 / t as f64),
        }
    }
}

/// Literal occurrence counts for every variable of an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseStatistics {
    variables: Vec<VariableStats>,
}

impl ClauseStatistics {
    pub fn new(instance: &Instance) -> Self {
        let mut variables = vec![VariableStats::default(); instance.variable_count()];
        for clause in instance.clauses() {
            for &literal in clause.literals() {
                let stats = &mut variables[literal.unsigned_abs() as usize - 1];
                if literal > 0 {
                    stats.positive += 1;
                } else {
                    stats.negative += 1;
                }
            }
        }
        Self { variables }
    }

    /// Statistics of the zero-based variable `var`.
    pub fn get(&self, var: usize) -> VariableStats {
        self.variables[var]
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VariableStats> {
        self.variables.iter()
    }

    /// Pure variables and the value that satisfies every clause mentioning
    /// them, in variable order.
    pub fn pure_variables(&self) -> Vec<(usize, bool)> {
        self.variables
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_pure())
            .map(|(var, s)| (var, s.negative == 0))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Clause;

    fn instance() -> Instance {
        // x1 always positive, x2 mixed, x3 always negative, x4 unused
        Instance::new(
            4,
            vec![
                Clause::new(vec![1, 2]),
                Clause::new(vec![1, -2, -3]),
                Clause::new(vec![2, -3]),
            ],
        )
    }

    #[test]
    fn test_counts() {
        let stats = ClauseStatistics::new(&instance());
        assert_eq!(stats.get(0), VariableStats { positive: 2, negative: 0 });
        assert_eq!(stats.get(1), VariableStats { positive: 2, negative: 1 });
        assert_eq!(stats.get(2), VariableStats { positive: 0, negative: 2 });
        assert_eq!(stats.get(3).total(), 0);
    }

    #[test]
    fn test_pure_variables() {
        let stats = ClauseStatistics::new(&instance());
        assert_eq!(stats.pure_variables(), vec![(0, true), (2, false)]);
    }

    #[test]
    fn test_positive_ratio() {
        let stats = ClauseStatistics::new(&instance());
        assert!((stats.get(1).positive_ratio().unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(stats.get(3).positive_ratio(), None);
    }
}
