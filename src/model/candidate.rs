//! Candidate assignments.

use std::fmt;
use std::sync::Arc;

use super::clause::Clause;
use super::instance::Instance;

/// One boolean assignment under evaluation.
///
/// Slot `i` holds the value of DIMACS variable `i + 1`. The instance is
/// shared, never owned. Any change to the assignment clears the cached
/// fitness, so a stale score is never read back.
///
/// Equality compares assignments element-wise and nothing else: duplicate
/// suppression in the engine must not let a near-miss through.
#[derive(Debug, Clone)]
pub struct Candidate {
    assignment: Vec<bool>,
    instance: Arc<Instance>,
    fitness: Option<f64>,
    /// Generation at which this candidate was found (terminal result only).
    pub generations_to_find: Option<usize>,
    /// Restarts performed before this candidate was found (terminal result only).
    pub restarts_to_find: Option<usize>,
}

impl Candidate {
    /// # Panics
    /// Panics if the assignment length differs from the variable count.
    pub fn new(instance: Arc<Instance>, assignment: Vec<bool>) -> Self {
        assert_eq!(
            assignment.len(),
            instance.variable_count(),
            "assignment length must equal variable count"
        );
        Self {
            assignment,
            instance,
            fitness: None,
            generations_to_find: None,
            restarts_to_find: None,
        }
    }

    pub fn assignment(&self) -> &[bool] {
        &self.assignment
    }

    /// Mutable access to the genes; clears the cached fitness.
    pub fn assignment_mut(&mut self) -> &mut [bool] {
        self.fitness = None;
        &mut self.assignment
    }

    /// Replaces the whole assignment.
    ///
    /// # Panics
    /// Panics on a length change.
    pub fn set_assignment(&mut self, assignment: Vec<bool>) {
        assert_eq!(
            assignment.len(),
            self.assignment.len(),
            "assignment length must not change"
        );
        self.assignment = assignment;
        self.fitness = None;
    }

    /// Flips the zero-based variable `var`.
    #[inline]
    pub fn flip(&mut self, var: usize) {
        self.assignment[var] = !self.assignment[var];
        self.fitness = None;
    }

    pub fn len(&self) -> usize {
        self.assignment.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assignment.is_empty()
    }

    pub fn instance(&self) -> &Arc<Instance> {
        &self.instance
    }

    /// Points the candidate at another instance over the same variables.
    pub fn rebind(&mut self, instance: Arc<Instance>) {
        assert_eq!(
            instance.variable_count(),
            self.assignment.len(),
            "rebind target must have the same variable count"
        );
        self.instance = instance;
        self.fitness = None;
    }

    /// Cached fitness, `None` until evaluated.
    pub fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    pub fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    /// Cached fitness, unevaluated candidates counting as zero.
    pub fn score(&self) -> f64 {
        self.fitness.unwrap_or(0.0)
    }

    pub fn satisfied_count(&self) -> usize {
        self.instance.satisfied_count(&self.assignment)
    }

    pub fn is_satisfied(&self) -> bool {
        self.instance.is_satisfied(&self.assignment)
    }

    pub fn unsatisfied_clauses(&self) -> Vec<&Clause> {
        self.instance.unsatisfied_clauses(&self.assignment).collect()
    }

    /// Number of differing genes.
    ///
    /// # Panics
    /// Panics if the candidates have different lengths.
    pub fn hamming_distance(&self, other: &Candidate) -> usize {
        assert_eq!(self.len(), other.len(), "candidates must have same length");
        self.assignment
            .iter()
            .zip(&other.assignment)
            .filter(|(a, b)| a != b)
            .count()
    }

    /// DIMACS model line, e.g. `v 1 -2 3 0`.
    pub fn printable(&self) -> String {
        let mut out = String::from("v");
        for (i, &value) in self.assignment.iter().enumerate() {
            let var = i as i64 + 1;
            out.push(' ');
            out.push_str(&(if value { var } else { -var }).to_string());
        }
        out.push_str(" 0");
        out
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.assignment == other.assignment
    }
}

impl Eq for Candidate {}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.fitness {
            Some(x) => write!(f, "{x} [")?,
            None => write!(f, "- [")?,
        }
        for &gene in &self.assignment {
            f.write_str(if gene { "1" } else { "0" })?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example() -> Arc<Instance> {
        Arc::new(Instance::new(
            3,
            vec![Clause::new(vec![1, -2]), Clause::new(vec![2, 3])],
        ))
    }

    #[test]
    fn test_flip_clears_fitness() {
        let mut c = Candidate::new(example(), vec![false, false, false]);
        c.set_fitness(1.0);
        c.flip(2);
        assert_eq!(c.fitness(), None);
        assert_eq!(c.assignment(), &[false, false, true]);
        assert!(c.is_satisfied());
    }

    #[test]
    fn test_equality_ignores_fitness() {
        let inst = example();
        let mut a = Candidate::new(inst.clone(), vec![true, false, true]);
        let b = Candidate::new(inst.clone(), vec![true, false, true]);
        a.set_fitness(2.0);
        assert_eq!(a, b);
        let c = Candidate::new(inst, vec![true, true, true]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_unsatisfied_clauses() {
        let c = Candidate::new(example(), vec![false, false, false]);
        assert_eq!(c.satisfied_count(), 1);
        let unsat = c.unsatisfied_clauses();
        assert_eq!(unsat.len(), 1);
        assert_eq!(unsat[0].literals(), &[2, 3]);
    }

    #[test]
    fn test_hamming_distance() {
        let inst = example();
        let a = Candidate::new(inst.clone(), vec![true, false, true]);
        let b = Candidate::new(inst, vec![false, false, false]);
        assert_eq!(a.hamming_distance(&b), 2);
        assert_eq!(a.hamming_distance(&a), 0);
    }

    #[test]
    fn test_display_and_printable() {
        let mut c = Candidate::new(example(), vec![true, false, true]);
        assert_eq!(c.to_string(), "- [101]");
        c.set_fitness(2.0);
        assert_eq!(c.to_string(), "2 [101]");
        assert_eq!(c.printable(), "v 1 -2 3 0");
    }

    #[test]
    #[should_panic(expected = "assignment length must equal variable count")]
    fn test_wrong_length_panics() {
        Candidate::new(example(), vec![true]);
    }
}
