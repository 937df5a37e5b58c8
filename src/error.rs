use std::time::Duration;
use thiserror::Error;

/// Everything that can go wrong between "give me a schedule for n teams" and
/// the answer. `Unsatisfiable` is deliberately not in here: a proven-infeasible
/// instance is a valid outcome, not a pipeline failure.
#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("number of teams must be even and at least 4, got {0}")]
    InvalidInput(u32),

    /// Inconsistent variable numbering in the generated formula. Indicates an
    /// indexer or builder bug; never expected on any input.
    #[error("inconsistent encoding: {0}")]
    Encoding(String),

    #[error("could not run solver `{program}`: {source}")]
    SolverInvocation {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("solver `{program}` exited abnormally ({status})")]
    SolverExit { program: String, status: String },

    #[error("solver exceeded the time budget of {:.1}s", .0.as_secs_f32())]
    SolverTimeout(Duration),

    #[error("could not parse solver output: {0}")]
    Parse(String),

    #[error("decoded schedule is invalid: {0}")]
    InvariantViolation(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
