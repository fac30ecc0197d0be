//! Run outcomes and the progress-reporting surface.
//!
//! The engine never renders anything itself: it hands structured
//! [`GenerationProgress`] and [`FinalReport`] values to a
//! [`ProgressObserver`] supplied by the caller.

use crate::model::Candidate;

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// A fully satisfying assignment, already mapped onto the original
    /// instance.
    Satisfied(Candidate),
    /// The generation budget ran out; carries the best candidate found.
    Exhausted(Candidate),
    /// The cancellation flag was observed at a generation boundary.
    Cancelled,
}

impl SearchOutcome {
    /// The reported candidate, if any.
    pub fn candidate(&self) -> Option<&Candidate> {
        match self {
            SearchOutcome::Satisfied(c) | SearchOutcome::Exhausted(c) => Some(c),
            SearchOutcome::Cancelled => None,
        }
    }

    pub fn into_candidate(self) -> Option<Candidate> {
        match self {
            SearchOutcome::Satisfied(c) | SearchOutcome::Exhausted(c) => Some(c),
            SearchOutcome::Cancelled => None,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, SearchOutcome::Satisfied(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SearchOutcome::Cancelled)
    }
}

/// Result of a GA run.
#[derive(Debug, Clone)]
pub struct GaResult {
    pub outcome: SearchOutcome,

    /// Generations started before the run ended.
    pub generations: usize,

    /// Restarts performed.
    pub restarts: usize,

    /// Best fitness of each evaluated generation, in order.
    pub fitness_history: Vec<f64>,
}

impl GaResult {
    pub fn best(&self) -> Option<&Candidate> {
        self.outcome.candidate()
    }

    pub fn is_satisfied(&self) -> bool {
        self.outcome.is_satisfied()
    }

    pub fn cancelled(&self) -> bool {
        self.outcome.is_cancelled()
    }
}

/// Snapshot passed to [`ProgressObserver::on_generation`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationProgress {
    pub generation: usize,
    pub restarts: usize,
    /// Best fitness in the current generation.
    pub generation_best: f64,
    /// Best fitness since the last restart.
    pub best_fitness: f64,
    /// Satisfied clauses of the best candidate since the last restart.
    pub best_satisfied: usize,
    pub clause_count: usize,
}

/// Summary passed to [`ProgressObserver::on_finish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalReport {
    pub satisfied: bool,
    pub cancelled: bool,
    pub generations: usize,
    pub restarts: usize,
    /// DIMACS `v` line of the reported assignment; empty when cancelled.
    pub assignment: String,
}

/// Receives progress from a running engine. All methods default to no-ops.
pub trait ProgressObserver {
    /// Called every `progress_interval` generations.
    fn on_generation(&mut self, progress: &GenerationProgress) {
        let _ = progress;
    }

    /// Called right after a restart regenerated the population.
    fn on_restart(&mut self, generation: usize, restarts: usize) {
        let _ = (generation, restarts);
    }

    /// Called once when the run ends.
    fn on_finish(&mut self, report: &FinalReport) {
        let _ = report;
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl ProgressObserver for NoopObserver {}
