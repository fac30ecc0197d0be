//! Clauses and literals.

/// Zero-based assignment slot of a DIMACS literal (`±v` ↦ `v - 1`).
#[inline]
pub fn variable_index(literal: i32) -> usize {
    literal.unsigned_abs() as usize - 1
}

/// Whether `literal` is true under `assignment`.
#[inline]
pub fn literal_holds(literal: i32, assignment: &[bool]) -> bool {
    assignment[variable_index(literal)] == (literal > 0)
}

/// A disjunction of literals.
///
/// Literals are DIMACS-signed integers: the absolute value is a 1-based
/// variable index, the sign the required polarity. Zero never appears.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Clause {
    literals: Vec<i32>,
}

impl Clause {
    /// Creates a clause from DIMACS literals.
    ///
    /// # Panics
    /// Panics if any literal is zero.
    pub fn new(literals: Vec<i32>) -> Self {
        assert!(
            literals.iter().all(|&l| l != 0),
            "clause literals must be non-zero"
        );
        Self { literals }
    }

    pub fn literals(&self) -> &[i32] {
        &self.literals
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// True iff at least one literal matches its required polarity.
    pub fn is_satisfied(&self, assignment: &[bool]) -> bool {
        self.literals.iter().any(|&l| literal_holds(l, assignment))
    }

    /// Zero-based variable indices mentioned by this clause, in literal order.
    pub fn variables(&self) -> impl Iterator<Item = usize> + '_ {
        self.literals.iter().map(|&l| variable_index(l))
    }

    /// Whether the clause mentions the zero-based variable `var`.
    pub fn mentions(&self, var: usize) -> bool {
        self.variables().any(|v| v == var)
    }

    /// Highest 1-based variable mentioned, 0 for the empty clause.
    pub fn max_variable(&self) -> usize {
        self.literals
            .iter()
            .map(|l| l.unsigned_abs() as usize)
            .max()
            .unwrap_or(0)
    }

    /// Number of positive literals.
    pub fn positive_count(&self) -> usize {
        self.literals.iter().filter(|&&l| l > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_variable_index() {
        assert_eq!(variable_index(1), 0);
        assert_eq!(variable_index(-1), 0);
        assert_eq!(variable_index(-7), 6);
    }

    #[test]
    fn test_clause_satisfaction() {
        let clause = Clause::new(vec![1, -2]);
        assert!(clause.is_satisfied(&[true, true]));
        assert!(clause.is_satisfied(&[false, false]));
        assert!(!clause.is_satisfied(&[false, true]));
    }

    #[test]
    fn test_empty_clause_never_satisfied() {
        let clause = Clause::new(vec![]);
        assert!(!clause.is_satisfied(&[true, false]));
        assert_eq!(clause.max_variable(), 0);
    }

    #[test]
    fn test_mentions_and_counts() {
        let clause = Clause::new(vec![3, -1, 4]);
        assert!(clause.mentions(0));
        assert!(clause.mentions(3));
        assert!(!clause.mentions(1));
        assert_eq!(clause.positive_count(), 2);
        assert_eq!(clause.max_variable(), 4);
    }

    #[test]
    #[should_panic(expected = "clause literals must be non-zero")]
    fn test_zero_literal_panics() {
        Clause::new(vec![1, 0]);
    }

    proptest! {
        #[test]
        fn prop_satisfied_iff_some_literal_holds(
            assignment in prop::collection::vec(any::<bool>(), 1..12),
            raw in prop::collection::vec((0usize..12, any::<bool>()), 0..6),
        ) {
            let n = assignment.len();
            let literals: Vec<i32> = raw
                .iter()
                .map(|&(v, pos)| {
                    let var = (v % n) as i32 + 1;
                    if pos { var } else { -var }
                })
                .collect();
            let clause = Clause::new(literals.clone());
            let expected = literals
                .iter()
                .any(|&l| assignment[(l.unsigned_abs() - 1) as usize] == (l > 0));
            prop_assert_eq!(clause.is_satisfied(&assignment), expected);
        }
    }
}
