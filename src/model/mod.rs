//! Candidate model: clauses, instances and assignments.
//!
//! Everything in the search reads the formula through three pure queries
//! on an immutable [`Instance`]: satisfied-clause count, full satisfaction
//! and the list of falsified clauses. No strategy mutates an instance;
//! simplification produces a new one.

mod candidate;
mod clause;
mod instance;
mod stats;

pub use candidate::Candidate;
pub use clause::{literal_holds, variable_index, Clause};
pub use instance::{Instance, Simplified};
pub use stats::{ClauseStatistics, VariableStats};
