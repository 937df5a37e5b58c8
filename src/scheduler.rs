use log::*;

use crate::cnf::{self, CnfFormula};
use crate::constraints;
use crate::decode;
use crate::error::ScheduleError;
use crate::schedule::Schedule;
use crate::solver::{SatSolver, Verdict};
use crate::vars::VarIndexer;

/// The two successful outcomes of a solve attempt. A proven-infeasible
/// instance (e.g. 4 teams) is terminal but not an error.
#[derive(Debug)]
pub enum SolveOutcome {
    Solved(Schedule),
    Unsatisfiable,
}

/// Validate the team count and encode the instance. Used both by the solving
/// pipeline and by the CNF-dump path of the CLI.
pub fn encode(teams: u32) -> Result<(VarIndexer, CnfFormula), ScheduleError> {
    if teams < 4 || teams % 2 != 0 {
        return Err(ScheduleError::InvalidInput(teams));
    }
    let idx = VarIndexer::new(teams);
    let formula = constraints::build_formula(&idx)?;
    Ok((idx, formula))
}

/// Facade over the whole pipeline: encode, serialize, hand to the solver,
/// decode and validate. Owns its solver; each solve attempt builds its own
/// indexer and clause set, so independent attempts never share state.
pub struct Scheduler<S> {
    solver: S,
}

impl<S: SatSolver> Scheduler<S> {
    pub fn new(solver: S) -> Scheduler<S> {
        Scheduler { solver }
    }

    pub fn solve(&self, teams: u32) -> Result<SolveOutcome, ScheduleError> {
        let (idx, formula) = encode(teams)?;
        info!(
            "encoded {} teams as {} vars, {} clauses",
            teams,
            formula.num_vars,
            formula.clauses.len()
        );

        let dimacs = cnf::to_dimacs_string(&formula);
        match self.solver.solve(&dimacs)? {
            Verdict::Unsatisfiable => {
                info!("the instance is infeasible");
                Ok(SolveOutcome::Unsatisfiable)
            }
            Verdict::Satisfiable(model) => {
                let schedule = decode::schedule_from_model(&idx, &model)?;
                info!("feasible schedule found and verified");
                Ok(SolveOutcome::Solved(schedule))
            }
        }
    }
}
