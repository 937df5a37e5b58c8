//! Round-robin sports schedules via SAT.
//!
//! Encodes the single round-robin tournament problem (every pair of teams
//! meets exactly once, one match per team per week, at most two appearances
//! per team in any period) as CNF, hands the formula to an external DIMACS
//! solver, and decodes the assignment back into a validated week × period
//! schedule.

pub mod cardinality;
pub mod cnf;
pub mod constraints;
pub mod decode;
pub mod error;
pub mod schedule;
pub mod scheduler;
pub mod solver;
pub mod vars;

pub use crate::error::ScheduleError;
pub use crate::schedule::{Game, Schedule};
pub use crate::scheduler::{Scheduler, SolveOutcome};
pub use crate::solver::{ProcessSolver, SatSolver, Verdict};
pub use crate::vars::{Fact, VarIndexer};
