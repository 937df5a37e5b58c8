use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use log::*;

use crate::decode;
use crate::error::ScheduleError;

/// The answer of a SAT oracle: a satisfying assignment or a proof of absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable(Vec<i32>),
    Unsatisfiable,
}

/// A SAT solver treated as an opaque oracle over DIMACS formula text. Any
/// concrete binary (or an in-memory test double) is interchangeable behind
/// this trait.
pub trait SatSolver {
    fn solve(&self, formula: &str) -> Result<Verdict, ScheduleError>;
}

/// Runs an external DIMACS solver binary on a temporary formula file.
///
/// The formula lives in a `NamedTempFile` that is removed on every exit path,
/// including solver failure and timeout. The solver call is blocking; stdout
/// is drained on a separate thread so a timed-out child can be killed without
/// deadlocking on a full pipe.
#[derive(Debug, Clone)]
pub struct ProcessSolver {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
}

impl ProcessSolver {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, timeout: Duration) -> ProcessSolver {
        ProcessSolver { program: program.into(), args, timeout }
    }
}

impl SatSolver for ProcessSolver {
    fn solve(&self, formula: &str) -> Result<Verdict, ScheduleError> {
        let program = self.program.display().to_string();

        let mut cnf_file = tempfile::Builder::new()
            .prefix("roundsat-")
            .suffix(".cnf")
            .tempfile()?;
        cnf_file.write_all(formula.as_bytes())?;
        cnf_file.flush()?;
        debug!("wrote formula to {:?}", cnf_file.path());

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(cnf_file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| ScheduleError::SolverInvocation {
                program: program.clone(),
                source,
            })?;

        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| ScheduleError::Parse("solver stdout was not captured".into()))?;

        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let mut buf = String::new();
            let result = stdout.read_to_string(&mut buf).map(|_| buf);
            let _ = tx.send(result);
        });

        let output = match rx.recv_timeout(self.timeout) {
            Ok(Ok(output)) => output,
            Ok(Err(err)) => {
                let _ = child.wait();
                return Err(err.into());
            }
            Err(_) => {
                warn!("solver exceeded {:?}, killing it", self.timeout);
                let _ = child.kill();
                let _ = child.wait();
                return Err(ScheduleError::SolverTimeout(self.timeout));
            }
        };

        let status = child.wait().map_err(|source| ScheduleError::SolverInvocation {
            program: program.clone(),
            source,
        })?;
        debug!("solver exited with {}", status);

        match decode::parse_verdict(&output) {
            Ok(verdict) => Ok(verdict),
            Err(parse_err) => {
                // DIMACS solvers conventionally exit 10 (sat) or 20 (unsat);
                // anything else with unreadable output is an abnormal exit.
                match status.code() {
                    Some(0) | Some(10) | Some(20) => Err(parse_err),
                    _ => Err(ScheduleError::SolverExit {
                        program,
                        status: status.to_string(),
                    }),
                }
            }
        }
    }
}
